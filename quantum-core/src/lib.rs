use std::fmt::{self, Display};
use std::ops::{Mul, MulAssign, Neg};
use thiserror::Error;

/// All elements of a given type. Usually used for simple enums.
pub trait All<const NUM_ELEMENTS: usize>: Sized {
    fn all() -> [Self; NUM_ELEMENTS];
}

/// Pauli matrices on one qubit.
///
/// The discriminant packs the x bit (`0b01`) and the z bit (`0b10`), so the label of a product
/// is the exclusive or of the two discriminants.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub enum PauliLabel {
    /// One qubit identity matrix
    /// ```text
    /// |1 0|
    /// |0 1|
    /// ```
    #[default]
    I = 0b00,

    /// Pauli X
    /// ```text
    /// |0 1|
    /// |1 0|
    /// ```
    X = 0b01,

    /// Pauli Y
    /// ```text
    /// |0 -i|
    /// |i  0|
    /// ```
    Y = 0b11,

    /// Pauli Z
    /// ```text
    /// |1  0|
    /// |0 -1|
    /// ```
    Z = 0b10,
}

impl PauliLabel {
    #[must_use]
    pub fn from_xz_bits(x_bit: bool, z_bit: bool) -> Self {
        match (x_bit, z_bit) {
            (false, false) => PauliLabel::I,
            (true, false) => PauliLabel::X,
            (true, true) => PauliLabel::Y,
            (false, true) => PauliLabel::Z,
        }
    }

    #[must_use]
    pub fn x_bit(self) -> bool {
        (self as u8) & 0b01 != 0
    }

    #[must_use]
    pub fn z_bit(self) -> bool {
        (self as u8) & 0b10 != 0
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == PauliLabel::I
    }

    /// Identity or Z, the labels that are diagonal in the computational basis.
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        !self.x_bit()
    }

    /// Product `self · other` as a label and the phase picked up on the way.
    ///
    /// ```
    /// use quantum_core::{PauliLabel, Phase};
    /// assert_eq!(PauliLabel::X.multiply(PauliLabel::Y), (PauliLabel::Z, Phase::I));
    /// assert_eq!(PauliLabel::Y.multiply(PauliLabel::X), (PauliLabel::Z, Phase::MINUS_I));
    /// ```
    #[must_use]
    pub fn multiply(self, other: PauliLabel) -> (PauliLabel, Phase) {
        use PauliLabel::{I, X, Y, Z};
        let label = PauliLabel::from_xz_bits(self.x_bit() ^ other.x_bit(), self.z_bit() ^ other.z_bit());
        let phase = match (self, other) {
            (X, Y) | (Y, Z) | (Z, X) => Phase::I,
            (Y, X) | (Z, Y) | (X, Z) => Phase::MINUS_I,
            (I, _) | (_, I) | (X, X) | (Y, Y) | (Z, Z) => Phase::ONE,
        };
        (label, phase)
    }

    /// Whether the two single-qubit labels anticommute.
    #[must_use]
    pub fn anticommutes_with(self, other: PauliLabel) -> bool {
        !self.is_identity() && !other.is_identity() && self != other
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            PauliLabel::I => 'I',
            PauliLabel::X => 'X',
            PauliLabel::Y => 'Y',
            PauliLabel::Z => 'Z',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected Pauli character {0:?}")]
pub struct PauliCharacterError(pub char);

impl TryFrom<char> for PauliLabel {
    type Error = PauliCharacterError;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        match character {
            'I' => Ok(PauliLabel::I),
            'X' | 'x' => Ok(PauliLabel::X),
            'Y' | 'y' => Ok(PauliLabel::Y),
            'Z' | 'z' => Ok(PauliLabel::Z),
            _ => Err(PauliCharacterError(character)),
        }
    }
}

impl Display for PauliLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl All<4> for PauliLabel {
    fn all() -> [PauliLabel; 4] {
        [PauliLabel::I, PauliLabel::X, PauliLabel::Y, PauliLabel::Z]
    }
}

/// Global phase `iᵏ`, stored as the exponent `k` reduced mod 4.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Phase(u8);

impl Phase {
    pub const ONE: Phase = Phase(0);
    pub const I: Phase = Phase(1);
    pub const MINUS_ONE: Phase = Phase(2);
    pub const MINUS_I: Phase = Phase(3);

    #[must_use]
    pub fn from_exponent(exponent: u8) -> Self {
        Phase(exponent % 4)
    }

    #[must_use]
    pub fn exponent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_real(self) -> bool {
        self.0 & 1 == 0
    }

    #[must_use]
    pub fn conjugate(self) -> Self {
        Phase((4 - self.0) % 4)
    }
}

impl Mul for Phase {
    type Output = Phase;

    #[inline]
    fn mul(self, other: Phase) -> Phase {
        Phase((self.0 + other.0) % 4)
    }
}

impl MulAssign for Phase {
    #[inline]
    fn mul_assign(&mut self, other: Phase) {
        *self = *self * other;
    }
}

impl Neg for Phase {
    type Output = Phase;

    #[inline]
    fn neg(self) -> Phase {
        self * Phase::MINUS_ONE
    }
}

impl std::iter::Product for Phase {
    fn product<Iter: Iterator<Item = Phase>>(iter: Iter) -> Phase {
        iter.fold(Phase::ONE, Mul::mul)
    }
}

impl All<4> for Phase {
    fn all() -> [Phase; 4] {
        [Phase::ONE, Phase::I, Phase::MINUS_ONE, Phase::MINUS_I]
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match (self.0, f.sign_plus()) {
            (0, false) => "",
            (0, true) => "+",
            (1, false) => "𝑖",
            (1, true) => "+𝑖",
            (2, _) => "-",
            _ => "-𝑖",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct PositionedPauli {
    pub qubit_id: usize,
    pub label: PauliLabel,
}

#[must_use]
pub fn id(qubit_id: usize) -> PositionedPauli {
    PositionedPauli {
        qubit_id,
        label: PauliLabel::I,
    }
}

#[must_use]
pub fn x(qubit_id: usize) -> PositionedPauli {
    PositionedPauli {
        qubit_id,
        label: PauliLabel::X,
    }
}

#[must_use]
pub fn y(qubit_id: usize) -> PositionedPauli {
    PositionedPauli {
        qubit_id,
        label: PauliLabel::Y,
    }
}

#[must_use]
pub fn z(qubit_id: usize) -> PositionedPauli {
    PositionedPauli {
        qubit_id,
        label: PauliLabel::Z,
    }
}

impl From<(usize, PauliLabel)> for PositionedPauli {
    fn from(value: (usize, PauliLabel)) -> Self {
        PositionedPauli {
            qubit_id: value.0,
            label: value.1,
        }
    }
}

impl From<PositionedPauli> for (usize, PauliLabel) {
    fn from(value: PositionedPauli) -> Self {
        (value.qubit_id, value.label)
    }
}

#[must_use]
pub fn subscript_digits(number: usize) -> String {
    let mut res = String::new();
    for char in number.to_string().chars() {
        let digit = char.to_digit(10).unwrap_or_default() as usize;
        res.push(SUB_CHARS[digit]);
    }
    res
}

pub const SUB_CHARS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
