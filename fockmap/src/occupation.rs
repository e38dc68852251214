//! Occupation-number basis states of index-set encodings.
//!
//! Under an index-set encoding the basis state with mode occupations `n` is a computational basis
//! state of the qubits. Qubit `i` holds the parity of every `n_k` with `i = k` or `i ∈ U(k)`, and
//! the parity and occupation sets read the state back: the qubits in `P(j)` XOR to `n_0 ⊕ … ⊕ n_{j-1}`
//! and the qubits in `Occ(j)` XOR to `n_j`.

use crate::error::{EncodingError, Result};
use crate::index_set::IndexSet;
use crate::indexed::IndexedEncoding;
use crate::parallel::map_slice;
use crate::scheme::{ModeSets, SetKind};
use fenwick::{FenwickArena, FenwickTree};
use std::fmt::{self, Display};

/// Most modes whose `2ⁿ` occupation states [`occupation_mismatches`] enumerates.
pub const MAX_OCCUPATION_MODES: usize = 20;

/// Qubit basis state of the occupation vector `occupations`, one entry per mode.
///
/// # Errors
/// Returns [`EncodingError::ModeCountMismatch`] if `occupations` does not have one entry per mode.
pub fn qubit_basis_state(encoding: &IndexedEncoding, occupations: &[bool]) -> Result<Vec<bool>> {
    if occupations.len() != encoding.mode_count() {
        return Err(EncodingError::ModeCountMismatch {
            expected: encoding.mode_count(),
            found: occupations.len(),
        });
    }
    let mut qubits = vec![false; occupations.len()];
    for (mode, _) in occupations.iter().enumerate().filter(|(_, occupied)| **occupied) {
        flip_mode(encoding.sets(), &mut qubits, mode);
    }
    Ok(qubits)
}

fn flip_mode(sets: &[ModeSets], qubits: &mut [bool], mode: usize) {
    qubits[mode] ^= true;
    for &qubit in &sets[mode].update {
        qubits[qubit] ^= true;
    }
}

fn parity_of(qubits: &[bool], set: &IndexSet) -> bool {
    set.iter().fold(false, |parity, &qubit| parity ^ qubits[qubit])
}

fn xor(left: &bool, right: &bool) -> bool {
    left ^ right
}

/// A basis state whose qubits disagree with the occupations through one set of one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupationMismatch {
    pub occupations: Vec<bool>,
    pub mode: usize,
    pub set: SetKind,
}

impl Display for OccupationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupations: String = self.occupations.iter().map(|&occupied| if occupied { '1' } else { '0' }).collect();
        write!(f, "{} set of mode {} misreads occupations {occupations}", self.set, self.mode)
    }
}

/// Every way the parity and occupation sets misread a basis state, over all `2ⁿ` occupation vectors.
///
/// The occupation vectors are visited in Gray-code order, each one a version of a persistent
/// Fenwick tree over XOR that differs from the previous version in one mode. Prefix parities and
/// single occupations are read from the tree, the qubit states are updated through the update sets.
///
/// # Errors
/// Returns [`EncodingError::TooManyQubits`] above [`MAX_OCCUPATION_MODES`] modes, and propagates
/// range errors, which only occur for malformed encodings.
pub fn occupation_mismatches(encoding: &IndexedEncoding) -> Result<Vec<OccupationMismatch>> {
    log::debug!("{}: checking occupation states", encoding.name());
    mismatches(encoding.sets())
}

fn mismatches(sets: &[ModeSets]) -> Result<Vec<OccupationMismatch>> {
    let mode_count = sets.len();
    if mode_count > MAX_OCCUPATION_MODES {
        return Err(EncodingError::TooManyQubits {
            qubits: mode_count,
            limit: MAX_OCCUPATION_MODES,
        });
    }
    let mut arena = FenwickArena::new(xor, false);
    let mut version = arena.empty(mode_count);
    let mut qubits = vec![false; mode_count];
    let mut states: Vec<(FenwickTree, Vec<bool>)> = vec![(version, qubits.clone())];
    for step in 1..1usize << mode_count {
        let mode = step.trailing_zeros() as usize;
        version = arena.accumulate(version, mode, &true)?;
        flip_mode(sets, &mut qubits, mode);
        states.push((version, qubits.clone()));
    }
    log::debug!(
        "{} occupation states share {} Fenwick nodes",
        states.len(),
        arena.node_count()
    );

    let arena = &arena;
    let per_state = map_slice(&states, |(version, qubits)| -> Result<Vec<OccupationMismatch>> {
        let mut found = Vec::new();
        for (mode, mode_sets) in sets.iter().enumerate() {
            let checks = [
                (SetKind::Parity, &mode_sets.parity, arena.combine_before(*version, mode)?),
                (SetKind::Occupation, &mode_sets.occupation, arena.get(*version, mode)?),
            ];
            for (set, qubit_set, expected) in checks {
                if parity_of(qubits, qubit_set) != expected {
                    found.push(OccupationMismatch {
                        occupations: arena.values(*version),
                        mode,
                        set,
                    });
                }
            }
        }
        Ok(found)
    });
    let mut mismatches = Vec::new();
    for state in per_state {
        mismatches.extend(state?);
    }
    Ok(mismatches)
}
