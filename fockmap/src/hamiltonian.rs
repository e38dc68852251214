use crate::error::{EncodingError, Result};
use crate::fermion::{FermionicExpression, FermionicTerm};
use crate::ladder::LadderOperator;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::collections::BTreeMap;

/// Second-quantized Hamiltonian on spin orbitals:
///
/// `H = E₀ + Σ h[p, q] a_p† a_q + Σ g[p, q, r, s] a_p† a_q† a_r a_s`
///
/// Keys of the two-body map are the mode indices in operator order; coefficients are stored as
/// given, without symmetrization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hamiltonian {
    mode_count: usize,
    constant: f64,
    one_body: BTreeMap<(usize, usize), f64>,
    two_body: BTreeMap<(usize, usize, usize, usize), f64>,
}

impl Hamiltonian {
    #[must_use]
    pub fn new(mode_count: usize) -> Self {
        Hamiltonian {
            mode_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Adds `value` to `h[p, q]`.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn add_one_body(&mut self, p: usize, q: usize, value: f64) -> Result<()> {
        self.check_modes(&[p, q])?;
        self.insert_one_body(p, q, value);
        Ok(())
    }

    /// Adds `value` to `g[p, q, r, s]`.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn add_two_body(&mut self, p: usize, q: usize, r: usize, s: usize, value: f64) -> Result<()> {
        self.check_modes(&[p, q, r, s])?;
        self.insert_two_body((p, q, r, s), value);
        Ok(())
    }

    /// Spin-orbital Hamiltonian from integrals over `m` spatial orbitals, `2m` modes in all.
    ///
    /// Mode `2p + σ` is spatial orbital `p` with spin `σ`. `two_body(p, q, r, s)` is the
    /// chemists' notation integral `(pq|rs)`, and the Hamiltonian is
    ///
    /// `E₀ + Σ h[p, q] a_{pσ}† a_{qσ} + ½ Σ (pq|rs) a_{pσ}† a_{rτ}† a_{sτ} a_{qσ}`.
    ///
    /// # Errors
    /// Returns [`EncodingError::ModeCountMismatch`] if `one_body` is not square.
    pub fn from_spatial_integrals(
        constant: f64,
        one_body: &DMatrix<f64>,
        two_body: impl Fn(usize, usize, usize, usize) -> f64,
    ) -> Result<Self> {
        let orbitals = one_body.nrows();
        if one_body.ncols() != orbitals {
            return Err(EncodingError::ModeCountMismatch {
                expected: orbitals,
                found: one_body.ncols(),
            });
        }
        Ok(Self::expand_spatial_integrals(constant, one_body, two_body))
    }

    fn expand_spatial_integrals(
        constant: f64,
        one_body: &DMatrix<f64>,
        two_body: impl Fn(usize, usize, usize, usize) -> f64,
    ) -> Self {
        let orbitals = one_body.nrows();
        let mode = |orbital: usize, spin: usize| 2 * orbital + spin;
        let mut hamiltonian = Hamiltonian::new(2 * orbitals).with_constant(constant);
        for (p, q) in itertools::iproduct!(0..orbitals, 0..orbitals) {
            let value = one_body[(p, q)];
            if value == 0.0 {
                continue;
            }
            for spin in 0..2 {
                hamiltonian.insert_one_body(mode(p, spin), mode(q, spin), value);
            }
        }
        for (p, q, r, s) in itertools::iproduct!(0..orbitals, 0..orbitals, 0..orbitals, 0..orbitals) {
            let value = two_body(p, q, r, s);
            if value == 0.0 {
                continue;
            }
            for (sigma, tau) in itertools::iproduct!(0..2, 0..2) {
                if mode(p, sigma) == mode(r, tau) || mode(q, sigma) == mode(s, tau) {
                    continue;
                }
                hamiltonian.insert_two_body((mode(p, sigma), mode(r, tau), mode(s, tau), mode(q, sigma)), value / 2.0);
            }
        }
        log::debug!(
            "spin-orbital Hamiltonian on {} modes with {} one-body and {} two-body terms",
            hamiltonian.mode_count,
            hamiltonian.one_body.len(),
            hamiltonian.two_body.len()
        );
        hamiltonian
    }

    /// Molecular hydrogen in the STO-3G basis at a bond length of 0.7414 Å, four spin orbitals.
    ///
    /// Its ground state energy is about -1.13727 Hartree.
    #[must_use]
    pub fn h2_sto3g() -> Self {
        const NUCLEAR_REPULSION: f64 = 0.713_753_993_687_618_2;
        const H00: f64 = -1.252_463_573_564_898_8;
        const H11: f64 = -0.475_948_715_220_964_8;
        const J00: f64 = 0.674_488_766_356_838_2;
        const J11: f64 = 0.697_397_949_469_355_6;
        const J01: f64 = 0.663_634_047_861_504;
        const K01: f64 = 0.181_288_808_211_496_1;

        let one_body = DMatrix::from_row_slice(2, 2, &[H00, 0.0, 0.0, H11]);
        let two_body = |p: usize, q: usize, r: usize, s: usize| match (p == q, r == s) {
            (true, true) => match (p, r) {
                (0, 0) => J00,
                (1, 1) => J11,
                _ => J01,
            },
            (false, false) => K01,
            _ => 0.0,
        };
        Self::expand_spatial_integrals(NUCLEAR_REPULSION, &one_body, two_body)
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.mode_count
    }

    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn one_body(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.one_body.iter().map(|(key, value)| (*key, *value))
    }

    pub fn two_body(&self) -> impl Iterator<Item = ((usize, usize, usize, usize), f64)> + '_ {
        self.two_body.iter().map(|(key, value)| (*key, *value))
    }

    /// The Hamiltonian as a sum of ladder operator products, constant first.
    #[must_use]
    pub fn to_fermionic_expression(&self) -> FermionicExpression {
        let real = |value: f64| Complex64::new(value, 0.0);
        let constant = (self.constant != 0.0).then(|| FermionicTerm::constant(real(self.constant)));
        let one_body = self.one_body().map(|((p, q), value)| {
            FermionicTerm::new(real(value), vec![LadderOperator::create(p), LadderOperator::annihilate(q)])
        });
        let two_body = self.two_body().map(|((p, q, r, s), value)| {
            FermionicTerm::new(
                real(value),
                vec![
                    LadderOperator::create(p),
                    LadderOperator::create(q),
                    LadderOperator::annihilate(r),
                    LadderOperator::annihilate(s),
                ],
            )
        });
        constant.into_iter().chain(one_body).chain(two_body).collect()
    }

    fn insert_one_body(&mut self, p: usize, q: usize, value: f64) {
        *self.one_body.entry((p, q)).or_default() += value;
    }

    fn insert_two_body(&mut self, key: (usize, usize, usize, usize), value: f64) {
        *self.two_body.entry(key).or_default() += value;
    }

    fn check_modes(&self, modes: &[usize]) -> Result<()> {
        match modes.iter().find(|&&mode| mode >= self.mode_count) {
            Some(&mode) => Err(EncodingError::ModeOutOfRange {
                mode,
                mode_count: self.mode_count,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_checked() {
        let mut hamiltonian = Hamiltonian::new(2);
        assert!(hamiltonian.add_one_body(0, 1, 0.5).is_ok());
        assert_eq!(
            hamiltonian.add_two_body(0, 1, 2, 0, 1.0),
            Err(EncodingError::ModeOutOfRange { mode: 2, mode_count: 2 })
        );
    }

    #[test]
    fn repeated_entries_accumulate() {
        let mut hamiltonian = Hamiltonian::new(2);
        hamiltonian.add_one_body(1, 1, 0.25).unwrap();
        hamiltonian.add_one_body(1, 1, 0.5).unwrap();
        assert_eq!(hamiltonian.one_body().collect::<Vec<_>>(), vec![((1, 1), 0.75)]);
    }

    #[test]
    fn hydrogen_terms() {
        let hamiltonian = Hamiltonian::h2_sto3g();
        assert_eq!(hamiltonian.mode_count(), 4);
        assert_eq!(hamiltonian.one_body().count(), 4);
        // products that create or annihilate one mode twice are dropped
        assert!(hamiltonian.two_body().all(|((p, q, r, s), _)| p != q && r != s));
        let expression = hamiltonian.to_fermionic_expression();
        assert_eq!(expression.mode_count(), 4);
        assert_eq!(expression.terms()[0].operators.len(), 0);
    }

    #[test]
    fn non_square_integrals_are_rejected() {
        let one_body = DMatrix::zeros(2, 3);
        assert!(Hamiltonian::from_spatial_integrals(0.0, &one_body, |_, _, _, _| 0.0).is_err());
    }
}
