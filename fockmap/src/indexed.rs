use crate::error::{EncodingError, Result};
use crate::ladder::{check_anticommuting, MajoranaPair};
use crate::scheme::{validate, IndexScheme, ModeSets};
use paulimer::{PauliLabel, PauliRegister, Phase};

/// A validated index-set scheme evaluated on a fixed number of modes.
///
/// For mode `j` the Majorana strings are
/// - `c_j = X[U(j)] Z[P(j)] X_j`,
/// - `d_j = X[U(j)] Z[(P(j) Δ Occ(j)) \ {j}] Y_j`,
///
/// with one qubit per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEncoding {
    name: String,
    sets: Vec<ModeSets>,
    majoranas: Vec<MajoranaPair>,
}

impl IndexedEncoding {
    /// # Errors
    /// Returns [`EncodingError::SchemeInvalid`] or [`EncodingError::OccupationMissingMode`] if a set
    /// breaks the ordering constraints, and [`EncodingError::MajoranasCommute`] if the derived
    /// strings are not mutually anticommuting.
    pub fn new(scheme: &impl IndexScheme, mode_count: usize) -> Result<Self> {
        let sets = validate(scheme, mode_count)?;
        let majoranas: Vec<MajoranaPair> = sets
            .iter()
            .enumerate()
            .map(|(mode, mode_sets)| majorana_pair(mode, mode_sets, mode_count))
            .collect();
        check_anticommuting(&majoranas)?;
        for (mode, pair) in majoranas.iter().enumerate() {
            log::debug!("{} mode {mode}: c = {}, d = {}", scheme.name(), pair.c, pair.d);
        }
        Ok(IndexedEncoding {
            name: scheme.name().to_owned(),
            sets,
            majoranas,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.sets.len()
    }

    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn mode_sets(&self, mode: usize) -> Result<&ModeSets> {
        self.sets.get(mode).ok_or(EncodingError::ModeOutOfRange {
            mode,
            mode_count: self.mode_count(),
        })
    }

    /// Sets of every mode, in mode order.
    #[must_use]
    pub fn sets(&self) -> &[ModeSets] {
        &self.sets
    }

    #[must_use]
    pub fn majorana_pairs(&self) -> &[MajoranaPair] {
        &self.majoranas
    }
}

fn majorana_pair(mode: usize, sets: &ModeSets, width: usize) -> MajoranaPair {
    let mut c = vec![PauliLabel::I; width];
    for &qubit in &sets.update {
        c[qubit] = PauliLabel::X;
    }
    let mut d = c.clone();
    for &qubit in &sets.parity {
        c[qubit] = PauliLabel::Z;
    }
    for &qubit in &sets.remainder {
        d[qubit] = PauliLabel::Z;
    }
    c[mode] = PauliLabel::X;
    d[mode] = PauliLabel::Y;
    MajoranaPair {
        c: PauliRegister::new(c, Phase::ONE),
        d: PauliRegister::new(d, Phase::ONE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_set::IndexSet;
    use crate::scheme::{EncodingScheme, BRAVYI_KITAEV, JORDAN_WIGNER, PARITY};

    fn strings(encoding: &IndexedEncoding) -> Vec<(String, String)> {
        encoding
            .majorana_pairs()
            .iter()
            .map(|pair| (pair.c.to_string(), pair.d.to_string()))
            .collect()
    }

    #[test]
    fn jordan_wigner_strings() {
        let encoding = IndexedEncoding::new(&JORDAN_WIGNER, 3).unwrap();
        assert_eq!(
            strings(&encoding),
            [("XII", "YII"), ("ZXI", "ZYI"), ("ZZX", "ZZY")].map(|(c, d)| (c.to_owned(), d.to_owned()))
        );
    }

    #[test]
    fn bravyi_kitaev_strings_of_four_modes() {
        let encoding = IndexedEncoding::new(&BRAVYI_KITAEV, 4).unwrap();
        assert_eq!(
            strings(&encoding),
            [("XXIX", "YXIX"), ("ZXIX", "IYIX"), ("IZXX", "IZYX"), ("IZZX", "IIIY")]
                .map(|(c, d)| (c.to_owned(), d.to_owned()))
        );
    }

    #[test]
    fn parity_strings_of_three_modes() {
        let encoding = IndexedEncoding::new(&PARITY, 3).unwrap();
        assert_eq!(
            strings(&encoding),
            [("XXX", "YXX"), ("ZXX", "IYX"), ("IZX", "IIY")].map(|(c, d)| (c.to_owned(), d.to_owned()))
        );
    }

    #[test]
    fn commuting_strings_are_rejected() {
        // Every set is on the correct side, but without parity strings the Majoranas of
        // different modes commute.
        let scheme = EncodingScheme::new("no parity", |_, _| IndexSet::new(), |_| IndexSet::new(), IndexSet::singleton);
        assert!(matches!(
            IndexedEncoding::new(&scheme, 2),
            Err(EncodingError::MajoranasCommute { .. })
        ));
        assert!(IndexedEncoding::new(&scheme, 1).is_ok());
    }

    #[test]
    fn mode_sets_are_range_checked() {
        let encoding = IndexedEncoding::new(&JORDAN_WIGNER, 2).unwrap();
        assert_eq!(encoding.mode_sets(1).unwrap().parity, IndexSet::from([0]));
        assert_eq!(
            encoding.mode_sets(2),
            Err(EncodingError::ModeOutOfRange { mode: 2, mode_count: 2 })
        );
    }
}
