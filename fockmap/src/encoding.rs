use crate::error::{EncodingError, Result};
use crate::indexed::IndexedEncoding;
use crate::ladder::{LadderOperator, MajoranaPair};
use crate::scheme::{IndexScheme, BRAVYI_KITAEV, JORDAN_WIGNER, PARITY};
use crate::tree::{TreeEncoding, TreeNode};
use derive_more::From;
use paulimer::PauliRegisterSequence;

/// Either kind of encoding; both yield Majorana strings on one qubit per mode.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Encoding {
    Indexed(IndexedEncoding),
    Tree(TreeEncoding),
}

impl Encoding {
    /// # Errors
    /// See [`IndexedEncoding::new`].
    pub fn from_scheme(scheme: &impl IndexScheme, mode_count: usize) -> Result<Self> {
        Ok(IndexedEncoding::new(scheme, mode_count)?.into())
    }

    /// # Errors
    /// See [`TreeEncoding::new`].
    pub fn from_tree(tree: &TreeNode, mode_count: usize) -> Result<Self> {
        Ok(TreeEncoding::new(tree, mode_count)?.into())
    }

    /// # Errors
    /// Never fails for the built-in scheme.
    pub fn jordan_wigner(mode_count: usize) -> Result<Self> {
        Self::from_scheme(&JORDAN_WIGNER, mode_count)
    }

    /// # Errors
    /// Never fails for the built-in scheme.
    pub fn bravyi_kitaev(mode_count: usize) -> Result<Self> {
        Self::from_scheme(&BRAVYI_KITAEV, mode_count)
    }

    /// # Errors
    /// Never fails for the built-in scheme.
    pub fn parity(mode_count: usize) -> Result<Self> {
        Self::from_scheme(&PARITY, mode_count)
    }

    /// # Errors
    /// Returns [`TreeError::Empty`](crate::TreeError::Empty) for zero modes.
    pub fn balanced_binary(mode_count: usize) -> Result<Self> {
        Ok(TreeEncoding::balanced_binary(mode_count)?.into())
    }

    /// # Errors
    /// Returns [`TreeError::Empty`](crate::TreeError::Empty) for zero modes.
    pub fn balanced_ternary(mode_count: usize) -> Result<Self> {
        Ok(TreeEncoding::balanced_ternary(mode_count)?.into())
    }

    /// The five built-in encodings on `mode_count` modes.
    ///
    /// # Errors
    /// Returns [`TreeError::Empty`](crate::TreeError::Empty) for zero modes.
    pub fn built_in(mode_count: usize) -> Result<Vec<Self>> {
        Ok(vec![
            Self::jordan_wigner(mode_count)?,
            Self::bravyi_kitaev(mode_count)?,
            Self::parity(mode_count)?,
            Self::balanced_binary(mode_count)?,
            Self::balanced_ternary(mode_count)?,
        ])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Encoding::Indexed(encoding) => encoding.name(),
            Encoding::Tree(encoding) => encoding.name(),
        }
    }

    /// Number of modes, which is also the number of qubits.
    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.majorana_pairs().len()
    }

    #[must_use]
    pub fn majorana_pairs(&self) -> &[MajoranaPair] {
        match self {
            Encoding::Indexed(encoding) => encoding.majorana_pairs(),
            Encoding::Tree(encoding) => encoding.majorana_pairs(),
        }
    }

    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn majorana_pair(&self, mode: usize) -> Result<&MajoranaPair> {
        self.majorana_pairs().get(mode).ok_or(EncodingError::ModeOutOfRange {
            mode,
            mode_count: self.mode_count(),
        })
    }

    /// Qubit image of one ladder operator.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn ladder(&self, operator: LadderOperator) -> Result<PauliRegisterSequence> {
        self.majorana_pair(operator.mode)?.ladder(operator.kind)
    }

    #[must_use]
    pub fn as_indexed(&self) -> Option<&IndexedEncoding> {
        match self {
            Encoding::Indexed(encoding) => Some(encoding),
            Encoding::Tree(_) => None,
        }
    }
}
