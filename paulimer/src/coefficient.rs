use num_complex::{Complex, Complex64};
use num_rational::Rational64;
use num_traits::{Num, One, Zero};
use quantum_core::Phase;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact complex number with rational parts.
pub type ExactComplex = Complex<Rational64>;

/// Scalars a [`PauliRegisterSequence`](crate::PauliRegisterSequence) can carry.
///
/// Only complex types qualify, since a register phase has to be foldable into the coefficient.
pub trait Coefficient:
    Clone
    + PartialEq
    + Debug
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
{
    /// `self · iᵏ` for the phase `iᵏ`.
    #[must_use]
    fn mul_phase(&self, phase: Phase) -> Self;

    #[must_use]
    fn conjugate(&self) -> Self;
}

impl<T> Coefficient for Complex<T>
where
    T: Clone + Num + Neg<Output = T> + Debug + Send + Sync,
{
    fn mul_phase(&self, phase: Phase) -> Self {
        match phase.exponent() {
            0 => self.clone(),
            1 => Complex::new(-self.im.clone(), self.re.clone()),
            2 => -self.clone(),
            _ => Complex::new(self.im.clone(), -self.re.clone()),
        }
    }

    fn conjugate(&self) -> Self {
        self.conj()
    }
}

/// `(re_numerator / re_denominator) + 𝑖 (im_numerator / im_denominator)`.
///
/// # Panics
/// Panics if a denominator is zero.
#[must_use]
pub fn exact(re: (i64, i64), im: (i64, i64)) -> ExactComplex {
    Complex::new(Rational64::new(re.0, re.1), Rational64::new(im.0, im.1))
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn exact_to_complex64(value: &ExactComplex) -> Complex64 {
    let to_f64 = |ratio: &Rational64| *ratio.numer() as f64 / *ratio.denom() as f64;
    Complex64::new(to_f64(&value.re), to_f64(&value.im))
}
