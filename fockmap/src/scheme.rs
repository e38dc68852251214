//! Encodings given by three index-set functions.
//!
//! For mode `j` of an `n`-mode system:
//! - the update set `U(j)` lists the qubits whose value depends on the occupation of `j`,
//! - the parity set `P(j)` lists the qubits whose combined value is the parity of modes `0..j`,
//! - the occupation set `Occ(j)` lists the qubits whose combined value is the occupation of `j`.
//!
//! A scheme is only meaningful when `U(j)` lies above `j`, `P(j)` lies below `j` and `Occ(j)`
//! contains `j` and otherwise lies below it; [`validate`] rejects anything else.

use crate::error::{EncodingError, Result};
use crate::index_set::IndexSet;
use derive_more::Display;
use fenwick::structure::{ancestors, children, prefix_cover};
use std::fmt::{self, Debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SetKind {
    #[display("update")]
    Update,
    #[display("parity")]
    Parity,
    #[display("occupation")]
    Occupation,
}

/// The three set functions of an encoding.
pub trait IndexScheme {
    fn name(&self) -> &str;

    fn update_set(&self, mode: usize, mode_count: usize) -> IndexSet;

    fn parity_set(&self, mode: usize) -> IndexSet;

    fn occupation_set(&self, mode: usize) -> IndexSet;

    /// Qubits below `mode` that carry Z in the second Majorana operator of `mode`:
    /// `(P(j) Δ Occ(j)) \ {j}`.
    fn remainder_set(&self, mode: usize) -> IndexSet {
        self.parity_set(mode)
            .symmetric_difference(&self.occupation_set(mode))
            .difference(&IndexSet::singleton(mode))
    }
}

pub type UpdateFn = fn(usize, usize) -> IndexSet;
pub type ModeSetFn = fn(usize) -> IndexSet;

pub type DynUpdateFn = Box<dyn Fn(usize, usize) -> IndexSet + Send + Sync>;
pub type DynModeSetFn = Box<dyn Fn(usize) -> IndexSet + Send + Sync>;

/// An encoding as a plain value holding its three set functions.
///
/// The built-in schemes are constants of the default parameterization, which uses function
/// pointers; user closures keep their concrete types unless erased with [`EncodingScheme::into_dyn`].
///
/// ```
/// use fockmap::{EncodingScheme, IndexScheme, IndexSet};
///
/// let scheme = EncodingScheme::new(
///     "no parity",
///     |_, _| IndexSet::new(),
///     |_| IndexSet::new(),
///     IndexSet::singleton,
/// );
/// assert_eq!(scheme.occupation_set(2), IndexSet::from([2]));
/// ```
#[derive(Clone, Copy)]
pub struct EncodingScheme<Update = UpdateFn, Parity = ModeSetFn, Occupation = ModeSetFn> {
    name: &'static str,
    update: Update,
    parity: Parity,
    occupation: Occupation,
}

pub type DynEncodingScheme = EncodingScheme<DynUpdateFn, DynModeSetFn, DynModeSetFn>;

pub const JORDAN_WIGNER: EncodingScheme = EncodingScheme {
    name: "Jordan-Wigner",
    update: jordan_wigner_update,
    parity: jordan_wigner_parity,
    occupation: IndexSet::singleton,
};

pub const BRAVYI_KITAEV: EncodingScheme = EncodingScheme {
    name: "Bravyi-Kitaev",
    update: bravyi_kitaev_update,
    parity: bravyi_kitaev_parity,
    occupation: bravyi_kitaev_occupation,
};

pub const PARITY: EncodingScheme = EncodingScheme {
    name: "Parity",
    update: parity_update,
    parity: parity_parity,
    occupation: parity_occupation,
};

impl<Update, Parity, Occupation> EncodingScheme<Update, Parity, Occupation>
where
    Update: Fn(usize, usize) -> IndexSet,
    Parity: Fn(usize) -> IndexSet,
    Occupation: Fn(usize) -> IndexSet,
{
    pub fn new(name: &'static str, update: Update, parity: Parity, occupation: Occupation) -> Self {
        EncodingScheme {
            name,
            update,
            parity,
            occupation,
        }
    }

    /// Same scheme behind boxed trait objects, so schemes built from different closures have one type.
    pub fn into_dyn(self) -> DynEncodingScheme
    where
        Update: Send + Sync + 'static,
        Parity: Send + Sync + 'static,
        Occupation: Send + Sync + 'static,
    {
        EncodingScheme {
            name: self.name,
            update: Box::new(self.update),
            parity: Box::new(self.parity),
            occupation: Box::new(self.occupation),
        }
    }
}

impl<Update, Parity, Occupation> IndexScheme for EncodingScheme<Update, Parity, Occupation>
where
    Update: Fn(usize, usize) -> IndexSet,
    Parity: Fn(usize) -> IndexSet,
    Occupation: Fn(usize) -> IndexSet,
{
    fn name(&self) -> &str {
        self.name
    }

    fn update_set(&self, mode: usize, mode_count: usize) -> IndexSet {
        (self.update)(mode, mode_count)
    }

    fn parity_set(&self, mode: usize) -> IndexSet {
        (self.parity)(mode)
    }

    fn occupation_set(&self, mode: usize) -> IndexSet {
        (self.occupation)(mode)
    }
}

impl<Update, Parity, Occupation> Debug for EncodingScheme<Update, Parity, Occupation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingScheme").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Sets of one mode, checked against the ordering constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSets {
    pub update: IndexSet,
    pub parity: IndexSet,
    pub occupation: IndexSet,
    pub remainder: IndexSet,
}

/// Evaluates `scheme` on every mode and checks that each set lies on its side of the mode.
///
/// # Errors
/// Returns [`EncodingError::SchemeInvalid`] with the offending indices of the first bad set, or
/// [`EncodingError::OccupationMissingMode`].
pub fn validate(scheme: &impl IndexScheme, mode_count: usize) -> Result<Vec<ModeSets>> {
    let invalid = |mode, set, offending: IndexSet| EncodingError::SchemeInvalid {
        scheme: scheme.name().to_owned(),
        mode,
        set,
        offending,
    };
    (0..mode_count)
        .map(|mode| {
            let update = scheme.update_set(mode, mode_count);
            let offending = update.outside(mode + 1..mode_count);
            if !offending.is_empty() {
                return Err(invalid(mode, SetKind::Update, offending));
            }
            let parity = scheme.parity_set(mode);
            let offending = parity.outside(0..mode);
            if !offending.is_empty() {
                return Err(invalid(mode, SetKind::Parity, offending));
            }
            let occupation = scheme.occupation_set(mode);
            if !occupation.contains(mode) {
                return Err(EncodingError::OccupationMissingMode {
                    scheme: scheme.name().to_owned(),
                    mode,
                });
            }
            let offending = occupation.outside(0..mode + 1);
            if !offending.is_empty() {
                return Err(invalid(mode, SetKind::Occupation, offending));
            }
            Ok(ModeSets {
                remainder: scheme.remainder_set(mode),
                update,
                parity,
                occupation,
            })
        })
        .collect()
}

fn jordan_wigner_update(_mode: usize, _mode_count: usize) -> IndexSet {
    IndexSet::new()
}

fn jordan_wigner_parity(mode: usize) -> IndexSet {
    (0..mode).collect()
}

fn bravyi_kitaev_update(mode: usize, mode_count: usize) -> IndexSet {
    ancestors(mode, mode_count).collect()
}

fn bravyi_kitaev_parity(mode: usize) -> IndexSet {
    prefix_cover(mode).collect()
}

fn bravyi_kitaev_occupation(mode: usize) -> IndexSet {
    std::iter::once(mode).chain(children(mode)).collect()
}

fn parity_update(mode: usize, mode_count: usize) -> IndexSet {
    (mode + 1..mode_count).collect()
}

fn parity_parity(mode: usize) -> IndexSet {
    mode.checked_sub(1).into_iter().collect()
}

fn parity_occupation(mode: usize) -> IndexSet {
    (mode.saturating_sub(1)..=mode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bravyi_kitaev_sets_of_four_modes() {
        assert_eq!(BRAVYI_KITAEV.update_set(0, 4), IndexSet::from([1, 3]));
        assert_eq!(BRAVYI_KITAEV.update_set(2, 4), IndexSet::from([3]));
        assert_eq!(BRAVYI_KITAEV.update_set(3, 4), IndexSet::new());
        assert_eq!(BRAVYI_KITAEV.parity_set(3), IndexSet::from([1, 2]));
        assert_eq!(BRAVYI_KITAEV.parity_set(2), IndexSet::from([1]));
        assert_eq!(BRAVYI_KITAEV.occupation_set(3), IndexSet::from([1, 2, 3]));
        assert_eq!(BRAVYI_KITAEV.remainder_set(3), IndexSet::new());
        assert_eq!(BRAVYI_KITAEV.remainder_set(2), IndexSet::from([1]));
    }

    #[test]
    fn jordan_wigner_remainder_is_parity() {
        for mode in 0..6 {
            assert_eq!(JORDAN_WIGNER.remainder_set(mode), JORDAN_WIGNER.parity_set(mode));
        }
    }

    #[test]
    fn parity_scheme_sets() {
        assert_eq!(PARITY.update_set(1, 4), IndexSet::from([2, 3]));
        assert_eq!(PARITY.parity_set(0), IndexSet::new());
        assert_eq!(PARITY.parity_set(2), IndexSet::from([1]));
        assert_eq!(PARITY.occupation_set(0), IndexSet::from([0]));
        assert_eq!(PARITY.occupation_set(2), IndexSet::from([1, 2]));
        assert_eq!(PARITY.remainder_set(2), IndexSet::new());
    }

    #[test]
    fn built_in_schemes_validate() {
        for scheme in [JORDAN_WIGNER, BRAVYI_KITAEV, PARITY] {
            for mode_count in 0..20 {
                assert!(validate(&scheme, mode_count).is_ok(), "{} {mode_count}", scheme.name());
            }
        }
    }

    #[test]
    fn update_below_mode_is_rejected() {
        let scheme = EncodingScheme::new("lower update", |mode, _| (0..mode).collect(), |_| IndexSet::new(), IndexSet::singleton);
        let error = validate(&scheme, 4).unwrap_err();
        assert_eq!(
            error,
            EncodingError::SchemeInvalid {
                scheme: "lower update".to_owned(),
                mode: 1,
                set: SetKind::Update,
                offending: IndexSet::from([0]),
            }
        );
    }

    #[test]
    fn occupation_must_contain_mode() {
        let scheme = EncodingScheme::new("empty occupation", |_, _| IndexSet::new(), |_| IndexSet::new(), |_| IndexSet::new());
        assert!(matches!(
            validate(&scheme, 2),
            Err(EncodingError::OccupationMissingMode { mode: 0, .. })
        ));
    }

    #[test]
    fn erased_scheme_keeps_behavior() {
        let scheme = EncodingScheme::new("copy", bravyi_kitaev_update, bravyi_kitaev_parity, bravyi_kitaev_occupation).into_dyn();
        assert_eq!(validate(&scheme, 8).unwrap(), validate(&BRAVYI_KITAEV, 8).unwrap());
    }
}
