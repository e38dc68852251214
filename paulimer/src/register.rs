use crate::error::{check_widths, PauliAlgebraError, PauliStringParsingError, Result};
use quantum_core::{subscript_digits, PauliLabel, Phase, PositionedPauli};
use std::fmt::{self, Debug, Display};
use std::ops::{Mul, Neg};
use std::str::FromStr;

/// Pauli string of fixed width with a global phase `iᵏ`.
///
/// Qubit `q` carries `labels[q]`. Two registers are equal when both their labels and their phases
/// are equal.
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PauliRegister {
    labels: Vec<PauliLabel>,
    phase: Phase,
}

impl PauliRegister {
    pub fn identity(width: usize) -> Self {
        PauliRegister {
            labels: vec![PauliLabel::I; width],
            phase: Phase::ONE,
        }
    }

    pub fn new(labels: Vec<PauliLabel>, phase: Phase) -> Self {
        PauliRegister { labels, phase }
    }

    /// Register of `width` qubits with the given labels and identity elsewhere.
    ///
    /// ```
    /// use paulimer::PauliRegister;
    /// use quantum_core::{x, z};
    ///
    /// let register = PauliRegister::from_positioned(4, &[x(0), z(2)]).unwrap();
    /// assert_eq!(register.to_string(), "XIZI");
    /// assert_eq!(format!("{register:#}"), "X₀Z₂");
    /// ```
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::QubitOutOfRange`] or [`PauliAlgebraError::RepeatedQubit`].
    pub fn from_positioned(width: usize, positioned: &[PositionedPauli]) -> Result<Self> {
        let mut seen = vec![false; width];
        let mut register = PauliRegister::identity(width);
        for &PositionedPauli { qubit_id, label } in positioned {
            if qubit_id >= width {
                return Err(PauliAlgebraError::QubitOutOfRange { qubit: qubit_id, width });
            }
            if std::mem::replace(&mut seen[qubit_id], true) {
                return Err(PauliAlgebraError::RepeatedQubit { qubit: qubit_id });
            }
            register.labels[qubit_id] = label;
        }
        Ok(register)
    }

    /// Copy of `self` with `qubit` set to `label`.
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::QubitOutOfRange`] unless `qubit < self.width()`.
    pub fn with_label(mut self, qubit: usize, label: PauliLabel) -> Result<Self> {
        let width = self.width();
        let slot = self
            .labels
            .get_mut(qubit)
            .ok_or(PauliAlgebraError::QubitOutOfRange { qubit, width })?;
        *slot = label;
        Ok(self)
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn labels(&self) -> &[PauliLabel] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, qubit: usize) -> Option<PauliLabel> {
        self.labels.get(qubit).copied()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Qubits with a non-identity label, in increasing order.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| !label.is_identity())
            .map(|(qubit, _)| qubit)
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.support().count()
    }

    /// Whether all labels are identity; the phase is not considered.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.labels.iter().all(|label| label.is_identity())
    }

    /// Whether all labels are identity or Z.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.labels.iter().all(|label| label.is_diagonal())
    }

    /// Splits `self` into the same labels with phase one, and the phase.
    pub fn normalized(&self) -> (PauliRegister, Phase) {
        (self.clone().with_phase(Phase::ONE), self.phase)
    }

    pub fn into_normalized(self) -> (PauliRegister, Phase) {
        let phase = self.phase;
        (self.with_phase(Phase::ONE), phase)
    }

    /// Hermitian adjoint: Pauli labels are Hermitian, so only the phase is conjugated.
    pub fn adjoint(&self) -> Self {
        self.clone().with_phase(self.phase.conjugate())
    }

    /// Product `self · other`.
    ///
    /// ```
    /// use paulimer::PauliRegister;
    ///
    /// let left: PauliRegister = "XZ".parse().unwrap();
    /// let right: PauliRegister = "YZ".parse().unwrap();
    /// assert_eq!(left.checked_mul(&right).unwrap().to_string(), "𝑖ZI");
    /// ```
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`] if the widths differ.
    pub fn checked_mul(&self, other: &PauliRegister) -> Result<PauliRegister> {
        check_widths(self.width(), other.width())?;
        let mut phase = self.phase * other.phase;
        let labels = self
            .labels
            .iter()
            .zip(&other.labels)
            .map(|(&left, &right)| {
                let (label, factor) = left.multiply(right);
                phase *= factor;
                label
            })
            .collect();
        Ok(PauliRegister { labels, phase })
    }

    /// Whether the two strings commute, that is whether they anticommute on an even number of qubits.
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`] if the widths differ.
    pub fn commutes_with(&self, other: &PauliRegister) -> Result<bool> {
        check_widths(self.width(), other.width())?;
        let anticommuting = self
            .labels
            .iter()
            .zip(&other.labels)
            .filter(|(left, right)| left.anticommutes_with(**right))
            .count();
        Ok(anticommuting % 2 == 0)
    }
}

impl Mul<&PauliRegister> for &PauliRegister {
    type Output = PauliRegister;

    /// # Panics
    /// Panics if the widths differ; use [`PauliRegister::checked_mul`] to handle that case.
    fn mul(self, other: &PauliRegister) -> PauliRegister {
        self.checked_mul(other).unwrap_or_else(|error| panic!("{error}"))
    }
}

impl Neg for PauliRegister {
    type Output = PauliRegister;

    fn neg(self) -> PauliRegister {
        let phase = -self.phase;
        self.with_phase(phase)
    }
}

impl Display for PauliRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut string = if f.sign_plus() {
            format!("{:+}", self.phase)
        } else {
            self.phase.to_string()
        };
        if f.alternate() {
            if self.is_identity() {
                string.push('I');
            }
            for qubit in self.support() {
                string.push(self.labels[qubit].as_char());
                string.push_str(&subscript_digits(qubit));
            }
        } else {
            string.extend(self.labels.iter().map(|label| label.as_char()));
        }
        f.pad(&string)
    }
}

impl Debug for PauliRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

const PHASE_PREFIXES: [(&str, Phase); 8] = [
    ("+i", Phase::I),
    ("+𝑖", Phase::I),
    ("-i", Phase::MINUS_I),
    ("-𝑖", Phase::MINUS_I),
    ("i", Phase::I),
    ("𝑖", Phase::I),
    ("+", Phase::ONE),
    ("-", Phase::MINUS_ONE),
];

fn parse_phase(characters: &str) -> (&str, Phase) {
    PHASE_PREFIXES
        .iter()
        .find_map(|(prefix, phase)| characters.strip_prefix(prefix).map(|rest| (rest, *phase)))
        .unwrap_or((characters, Phase::ONE))
}

impl FromStr for PauliRegister {
    type Err = PauliStringParsingError;

    /// Parses the dense form, one label per qubit, after an optional phase prefix. A phase with no
    /// labels, or the empty string, is a register of width zero.
    fn from_str(characters: &str) -> std::result::Result<Self, Self::Err> {
        let no_whitespace: String = characters.chars().filter(|c| !c.is_whitespace()).collect();
        let (rest, phase) = parse_phase(&no_whitespace);
        let labels = rest
            .chars()
            .map(PauliLabel::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| PauliStringParsingError)?;
        Ok(PauliRegister { labels, phase })
    }
}
