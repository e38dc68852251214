use crate::encoding::Encoding;
use crate::error::{EncodingError, Result};
use crate::parallel::map_slice;
use derive_more::Display;
use paulimer::error::check_widths;
use paulimer::{exact, PauliRegister, PauliRegisterSequence};
use quantum_core::subscript_digits;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum LadderKind {
    #[display("†")]
    Create,
    #[display("")]
    Annihilate,
}

impl LadderKind {
    #[must_use]
    pub fn adjoint(self) -> Self {
        match self {
            LadderKind::Create => LadderKind::Annihilate,
            LadderKind::Annihilate => LadderKind::Create,
        }
    }
}

/// Creation or annihilation operator of one fermionic mode, displayed as `a₃†` or `a₃`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("a{}{kind}", subscript_digits(*mode))]
pub struct LadderOperator {
    pub kind: LadderKind,
    pub mode: usize,
}

impl LadderOperator {
    #[must_use]
    pub fn create(mode: usize) -> Self {
        LadderOperator {
            kind: LadderKind::Create,
            mode,
        }
    }

    #[must_use]
    pub fn annihilate(mode: usize) -> Self {
        LadderOperator {
            kind: LadderKind::Annihilate,
            mode,
        }
    }

    #[must_use]
    pub fn adjoint(self) -> Self {
        LadderOperator {
            kind: self.kind.adjoint(),
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum MajoranaKind {
    #[display("c")]
    C,
    #[display("d")]
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{kind}{}", subscript_digits(*mode))]
pub struct MajoranaIndex {
    pub mode: usize,
    pub kind: MajoranaKind,
}

/// The two Majorana strings of one mode, serialized as dense Pauli strings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MajoranaPair {
    pub c: PauliRegister,
    pub d: PauliRegister,
}

impl MajoranaPair {
    #[must_use]
    pub fn get(&self, kind: MajoranaKind) -> &PauliRegister {
        match kind {
            MajoranaKind::C => &self.c,
            MajoranaKind::D => &self.d,
        }
    }

    /// `a† = (c - 𝑖d)/2` or `a = (c + 𝑖d)/2`.
    ///
    /// # Errors
    /// Returns [`EncodingError::Algebra`] if the two strings differ in width.
    pub fn ladder(&self, kind: LadderKind) -> Result<PauliRegisterSequence> {
        let d_coefficient = match kind {
            LadderKind::Create => exact((0, 1), (-1, 2)),
            LadderKind::Annihilate => exact((0, 1), (1, 2)),
        };
        let sequence = PauliRegisterSequence::try_from_terms(
            self.c.width(),
            [(self.c.clone(), exact((1, 2), (0, 1))), (self.d.clone(), d_coefficient)],
        )?;
        Ok(sequence)
    }
}

/// Fails on the first pair of Majorana strings that commute.
pub(crate) fn check_anticommuting(pairs: &[MajoranaPair]) -> Result<()> {
    let strings: Vec<(MajoranaIndex, &PauliRegister)> = pairs
        .iter()
        .enumerate()
        .flat_map(|(mode, pair)| {
            [MajoranaKind::C, MajoranaKind::D].map(|kind| (MajoranaIndex { mode, kind }, pair.get(kind)))
        })
        .collect();
    for (position, (first, first_string)) in strings.iter().enumerate() {
        for (second, second_string) in &strings[position + 1..] {
            if first_string.commutes_with(second_string)? {
                return Err(EncodingError::MajoranasCommute {
                    first: *first,
                    second: *second,
                });
            }
        }
    }
    Ok(())
}

/// Creation and annihilation operators of every mode of an encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderTable {
    width: usize,
    creation: Vec<PauliRegisterSequence>,
    annihilation: Vec<PauliRegisterSequence>,
}

impl LadderTable {
    /// Derives all operators; modes are independent and, with the `parallel` feature, derived concurrently.
    ///
    /// # Errors
    /// Propagates algebra errors, which only occur for malformed encodings.
    pub fn build(encoding: &Encoding) -> Result<Self> {
        let table = Self::from_pairs(encoding.majorana_pairs())?;
        log::debug!("built ladder operators of {} modes for {}", table.mode_count(), encoding.name());
        Ok(table)
    }

    /// Ladder operators of arbitrary Majorana pairs, which need not anticommute.
    ///
    /// # Errors
    /// Returns [`EncodingError::Algebra`] if the strings differ in width.
    pub fn from_pairs(pairs: &[MajoranaPair]) -> Result<Self> {
        let width = pairs.first().map_or(0, |pair| pair.c.width());
        for pair in pairs {
            check_widths(width, pair.c.width())?;
        }
        let operators = map_slice(pairs, |pair| -> Result<_> {
            Ok((pair.ladder(LadderKind::Create)?, pair.ladder(LadderKind::Annihilate)?))
        });
        let (creation, annihilation) = operators.into_iter().collect::<Result<Vec<_>>>()?.into_iter().unzip();
        Ok(LadderTable {
            width,
            creation,
            annihilation,
        })
    }

    /// Table of given creation and annihilation operators, `creation[j]` and `annihilation[j]`
    /// belonging to mode `j`. Nothing is assumed about their algebra, so the table can be checked.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeCountMismatch`] if the two lists differ in length and
    /// [`EncodingError::Algebra`] if the operators differ in width.
    pub fn from_operators(
        creation: Vec<PauliRegisterSequence>,
        annihilation: Vec<PauliRegisterSequence>,
    ) -> Result<Self> {
        if creation.len() != annihilation.len() {
            return Err(EncodingError::ModeCountMismatch {
                expected: creation.len(),
                found: annihilation.len(),
            });
        }
        let width = creation.first().map_or(0, PauliRegisterSequence::width);
        for operator in creation.iter().chain(&annihilation) {
            check_widths(width, operator.width())?;
        }
        Ok(LadderTable {
            width,
            creation,
            annihilation,
        })
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.creation.len()
    }

    /// Number of qubits of every operator.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`] for a mode outside the table.
    pub fn get(&self, operator: LadderOperator) -> Result<&PauliRegisterSequence> {
        let operators = match operator.kind {
            LadderKind::Create => &self.creation,
            LadderKind::Annihilate => &self.annihilation,
        };
        operators.get(operator.mode).ok_or(EncodingError::ModeOutOfRange {
            mode: operator.mode,
            mode_count: self.mode_count(),
        })
    }

    /// Product of `operators` from left to right; the identity for an empty slice.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`] for a mode outside the table.
    pub fn product(&self, operators: &[LadderOperator]) -> Result<PauliRegisterSequence> {
        operators
            .iter()
            .try_fold(PauliRegisterSequence::identity(self.width), |product, operator| {
                Ok(product.checked_mul(self.get(*operator)?)?)
            })
    }
}
