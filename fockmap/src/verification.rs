//! Checks that encoded operators behave like fermions.
//!
//! A failed check is a [`CheckReport`] with [`CheckStatus::Failed`], never an error; errors are
//! reserved for inputs the checks cannot run on.

use crate::encode::encode_hamiltonian;
use crate::encoding::Encoding;
use crate::error::Result;
use crate::hamiltonian::Hamiltonian;
use crate::ladder::{LadderOperator, LadderTable};
use crate::matrix::eigenvalues;
use crate::occupation::{occupation_mismatches, OccupationMismatch, MAX_OCCUPATION_MODES};
use crate::parallel::map_range;
use derive_more::Display;
use paulimer::PauliRegisterSequence;
use std::fmt;

/// Runtime settings of the verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationConfig {
    /// Largest absolute difference between eigenvalues that still counts as agreement.
    pub tolerance: f64,
    /// Occupation consistency visits `2ⁿ` states and is skipped above this many modes, and always
    /// above [`MAX_OCCUPATION_MODES`].
    pub occupation_mode_limit: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        VerificationConfig {
            tolerance: 1e-9,
            occupation_mode_limit: 10,
        }
    }
}

impl VerificationConfig {
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_occupation_mode_limit(mut self, limit: usize) -> Self {
        self.occupation_mode_limit = limit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CheckKind {
    #[display("anti-commutation")]
    AntiCommutation,
    #[display("number conservation")]
    NumberConservation,
    #[display("occupation consistency")]
    OccupationConsistency,
    #[display("cross-encoding agreement")]
    CrossEncoding,
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum CheckFailure {
    /// `residual` is the anticommutator minus its expected value.
    #[display("{{{first}, {second}}} is off by {residual}")]
    AntiCommutation {
        first: LadderOperator,
        second: LadderOperator,
        residual: PauliRegisterSequence,
    },

    #[display("number operator of mode {mode} is not diagonal: {operator}")]
    NumberConservation { mode: usize, operator: PauliRegisterSequence },

    #[display("{_0}")]
    Occupation(OccupationMismatch),

    #[display("{encoding} has {found} eigenvalues, expected {expected}")]
    SpectrumLength {
        encoding: String,
        expected: usize,
        found: usize,
    },

    #[display("eigenvalue {index} under {encoding} is {found}, expected {expected}")]
    Eigenvalue {
        encoding: String,
        index: usize,
        expected: f64,
        found: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Passed,
    Skipped { reason: String },
    Failed(Vec<CheckFailure>),
}

impl CheckStatus {
    fn from_failures(failures: Vec<CheckFailure>) -> Self {
        if failures.is_empty() {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed(failures)
        }
    }
}

/// Outcome of one check on one subject, usually an encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub kind: CheckKind,
    pub subject: String,
    pub status: CheckStatus,
}

impl CheckReport {
    fn new(kind: CheckKind, subject: &str, status: CheckStatus) -> Self {
        let report = CheckReport {
            kind,
            subject: subject.to_owned(),
            status,
        };
        for failure in report.failures() {
            log::warn!("{kind} check of {subject} failed: {failure}");
        }
        report
    }

    /// Whether the check did not fail; skipped checks count as passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        !matches!(self.status, CheckStatus::Failed(_))
    }

    #[must_use]
    pub fn failures(&self) -> &[CheckFailure] {
        match &self.status {
            CheckStatus::Failed(failures) => failures,
            CheckStatus::Passed | CheckStatus::Skipped { .. } => &[],
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}: ", self.kind, self.subject)?;
        match &self.status {
            CheckStatus::Passed => f.write_str("passed"),
            CheckStatus::Skipped { reason } => write!(f, "skipped ({reason})"),
            CheckStatus::Failed(failures) => write!(f, "{} failures", failures.len()),
        }
    }
}

/// Per-encoding checks bundled by [`verify`].
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub encoding: String,
    pub checks: Vec<CheckReport>,
}

impl VerificationReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckReport::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckFailure> + '_ {
        self.checks.iter().flat_map(CheckReport::failures)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.encoding)?;
        for check in &self.checks {
            write!(f, "\n  {check}")?;
        }
        Ok(())
    }
}

fn anticommutator(left: &PauliRegisterSequence, right: &PauliRegisterSequence) -> Result<PauliRegisterSequence> {
    Ok(left.checked_mul(right)?.checked_add(&right.checked_mul(left)?)?)
}

/// `{a_i, a_j†} = δ_ij` for all ordered pairs and `{a_i, a_j} = 0` for all unordered pairs,
/// compared exactly.
///
/// # Errors
/// Propagates algebra errors, which only occur for malformed tables.
pub fn check_anti_commutation(table: &LadderTable, subject: &str) -> Result<CheckReport> {
    let mode_count = table.mode_count();
    let identity = PauliRegisterSequence::identity(table.width());
    let zero = PauliRegisterSequence::zero(table.width());
    let per_mode = map_range(mode_count, |first| -> Result<Vec<CheckFailure>> {
        let mut failures = Vec::new();
        let annihilation = LadderOperator::annihilate(first);
        for second in 0..mode_count {
            let pairs = [
                (LadderOperator::create(second), if first == second { &identity } else { &zero }),
                (LadderOperator::annihilate(second), &zero),
            ];
            for (other, expected) in pairs {
                if other.kind == annihilation.kind && second < first {
                    continue;
                }
                let residual = anticommutator(table.get(annihilation)?, table.get(other)?)?.checked_sub(expected)?;
                if !residual.is_zero() {
                    failures.push(CheckFailure::AntiCommutation {
                        first: annihilation,
                        second: other,
                        residual,
                    });
                }
            }
        }
        Ok(failures)
    });
    let failures = per_mode.into_iter().collect::<Result<Vec<_>>>()?.concat();
    Ok(CheckReport::new(
        CheckKind::AntiCommutation,
        subject,
        CheckStatus::from_failures(failures),
    ))
}

/// Every number operator `a_j† a_j` must be diagonal in the computational basis.
///
/// # Errors
/// Propagates algebra errors, which only occur for malformed tables.
pub fn check_number_conservation(table: &LadderTable, subject: &str) -> Result<CheckReport> {
    let mut failures = Vec::new();
    for mode in 0..table.mode_count() {
        let operator = table.product(&[LadderOperator::create(mode), LadderOperator::annihilate(mode)])?;
        if !operator.is_diagonal() {
            failures.push(CheckFailure::NumberConservation { mode, operator });
        }
    }
    Ok(CheckReport::new(
        CheckKind::NumberConservation,
        subject,
        CheckStatus::from_failures(failures),
    ))
}

/// Parity and occupation sets must read every occupation basis state back correctly.
///
/// Skipped for tree encodings and above [`VerificationConfig::occupation_mode_limit`] or
/// [`MAX_OCCUPATION_MODES`] modes.
///
/// # Errors
/// Propagates range errors, which only occur for malformed encodings.
pub fn check_occupation_consistency(encoding: &Encoding, config: &VerificationConfig) -> Result<CheckReport> {
    let skipped = |reason: String| -> Result<CheckReport> {
        Ok(CheckReport::new(
            CheckKind::OccupationConsistency,
            encoding.name(),
            CheckStatus::Skipped { reason },
        ))
    };
    let Some(indexed) = encoding.as_indexed() else {
        return skipped("tree encodings have no index sets".to_owned());
    };
    let limit = config.occupation_mode_limit.min(MAX_OCCUPATION_MODES);
    if indexed.mode_count() > limit {
        return skipped(format!("{} modes exceed the limit of {limit}", indexed.mode_count()));
    }
    let failures = occupation_mismatches(indexed)?
        .into_iter()
        .map(CheckFailure::Occupation)
        .collect();
    Ok(CheckReport::new(
        CheckKind::OccupationConsistency,
        encoding.name(),
        CheckStatus::from_failures(failures),
    ))
}

/// Encodes `hamiltonian` under every encoding and compares each spectrum with the first one.
///
/// # Errors
/// Returns [`EncodingError::ModeCountMismatch`](crate::EncodingError::ModeCountMismatch) if an
/// encoding has the wrong size, [`EncodingError::TooManyQubits`](crate::EncodingError::TooManyQubits)
/// if it is too large to diagonalize and [`EncodingError::NotHermitian`](crate::EncodingError::NotHermitian)
/// if the Hamiltonian is not Hermitian.
pub fn check_cross_encoding(
    hamiltonian: &Hamiltonian,
    encodings: &[Encoding],
    config: &VerificationConfig,
) -> Result<CheckReport> {
    let subject = format!("{}-mode Hamiltonian", hamiltonian.mode_count());
    let mut spectra = Vec::with_capacity(encodings.len());
    for encoding in encodings {
        let spectrum = eigenvalues(&encode_hamiltonian(hamiltonian, encoding)?, config.tolerance)?;
        if let Some(ground) = spectrum.first() {
            log::info!("{}: ground state energy {ground:.8}", encoding.name());
        }
        spectra.push((encoding.name(), spectrum));
    }
    let Some(((_, reference), others)) = spectra.split_first() else {
        return Ok(CheckReport::new(
            CheckKind::CrossEncoding,
            &subject,
            CheckStatus::Skipped {
                reason: "no encodings to compare".to_owned(),
            },
        ));
    };
    let mut failures = Vec::new();
    for (name, spectrum) in others {
        if spectrum.len() != reference.len() {
            failures.push(CheckFailure::SpectrumLength {
                encoding: (*name).to_owned(),
                expected: reference.len(),
                found: spectrum.len(),
            });
            continue;
        }
        failures.extend(
            reference
                .iter()
                .zip(spectrum)
                .enumerate()
                .filter(|(_, (expected, found))| (*expected - *found).abs() > config.tolerance)
                .map(|(index, (expected, found))| CheckFailure::Eigenvalue {
                    encoding: (*name).to_owned(),
                    index,
                    expected: *expected,
                    found: *found,
                }),
        );
    }
    Ok(CheckReport::new(
        CheckKind::CrossEncoding,
        &subject,
        CheckStatus::from_failures(failures),
    ))
}

/// Anti-commutation, number conservation and occupation consistency of one encoding.
///
/// # Errors
/// Propagates algebra and range errors, which only occur for malformed encodings.
pub fn verify(encoding: &Encoding, config: &VerificationConfig) -> Result<VerificationReport> {
    let table = LadderTable::build(encoding)?;
    let checks = vec![
        check_anti_commutation(&table, encoding.name())?,
        check_number_conservation(&table, encoding.name())?,
        check_occupation_consistency(encoding, config)?,
    ];
    let report = VerificationReport {
        encoding: encoding.name().to_owned(),
        checks,
    };
    log::info!(
        "{} on {} modes: {}",
        report.encoding,
        encoding.mode_count(),
        if report.passed() { "verified" } else { "FAILED" }
    );
    Ok(report)
}

/// [`verify`] for each encoding, in order.
///
/// # Errors
/// See [`verify`].
pub fn verify_all(encodings: &[Encoding], config: &VerificationConfig) -> Result<Vec<VerificationReport>> {
    encodings.iter().map(|encoding| verify(encoding, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::MajoranaPair;

    #[test]
    fn default_config() {
        let config = VerificationConfig::default().with_tolerance(1e-6);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.occupation_mode_limit, 10);
    }

    #[test]
    fn jordan_wigner_passes() {
        let encoding = Encoding::jordan_wigner(3).unwrap();
        let report = verify(&encoding, &VerificationConfig::default()).unwrap();
        assert!(report.passed(), "{report}");
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn occupation_check_is_skipped() {
        let config = VerificationConfig::default().with_occupation_mode_limit(2);
        let large = check_occupation_consistency(&Encoding::parity(3).unwrap(), &config).unwrap();
        assert!(matches!(large.status, CheckStatus::Skipped { .. }));
        assert!(large.passed());
        let unbounded = VerificationConfig::default().with_occupation_mode_limit(usize::MAX);
        let report = check_occupation_consistency(&Encoding::jordan_wigner(64).unwrap(), &unbounded).unwrap();
        assert_eq!(
            report.status,
            CheckStatus::Skipped {
                reason: "64 modes exceed the limit of 20".to_owned()
            }
        );
        let tree = Encoding::balanced_binary(2).unwrap();
        let report = check_occupation_consistency(&tree, &config).unwrap();
        assert_eq!(
            report.to_string(),
            "occupation consistency of balanced binary tree: skipped (tree encodings have no index sets)"
        );
    }

    #[test]
    fn anti_commutation_failures_carry_residual() {
        // two modes whose operators act on the same qubit, built by hand
        let pair = MajoranaPair {
            c: "XI".parse().unwrap(),
            d: "YI".parse().unwrap(),
        };
        let table = LadderTable::from_pairs(&[pair.clone(), pair]).unwrap();
        let report = check_anti_commutation(&table, "shared qubit").unwrap();
        assert!(!report.passed());
        let CheckFailure::AntiCommutation { first, second, residual } = &report.failures()[0] else {
            panic!("unexpected failure {:?}", report.failures()[0]);
        };
        assert_eq!((*first, *second), (LadderOperator::annihilate(0), LadderOperator::create(1)));
        assert_eq!(*residual, PauliRegisterSequence::identity(2));
    }

    #[test]
    fn cross_encoding_without_encodings_is_skipped() {
        let report = check_cross_encoding(&Hamiltonian::h2_sto3g(), &[], &VerificationConfig::default()).unwrap();
        assert!(matches!(report.status, CheckStatus::Skipped { .. }));
    }
}
