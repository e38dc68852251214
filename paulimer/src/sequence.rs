use crate::coefficient::{Coefficient, ExactComplex};
use crate::error::{check_widths, Result};
use crate::register::PauliRegister;
use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Sub};

/// Linear combination of Pauli strings of one width.
///
/// Keys are stored with phase one; the phase of every inserted register is folded into its
/// coefficient first. Terms whose coefficient sums to zero are removed, so two sequences describing
/// the same operator compare equal.
///
/// ```
/// use paulimer::{exact, PauliRegister, PauliRegisterSequence};
///
/// let x: PauliRegister = "X".parse().unwrap();
/// let y: PauliRegister = "Y".parse().unwrap();
/// let half = exact((1, 2), (0, 1));
/// let half_i = exact((0, 1), (1, 2));
/// // a† = (X - iY)/2 on one qubit
/// let creation = PauliRegisterSequence::try_from_terms(1, [(x.clone(), half), (y.clone(), -half_i)]).unwrap();
/// let annihilation = creation.adjoint();
/// let anticommutator = &(&creation * &annihilation) + &(&annihilation * &creation);
/// assert_eq!(anticommutator, PauliRegisterSequence::identity(1));
/// ```
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PauliRegisterSequence<C = ExactComplex> {
    width: usize,
    terms: BTreeMap<PauliRegister, C>,
}

fn insert_term<C: Coefficient>(terms: &mut BTreeMap<PauliRegister, C>, register: PauliRegister, coefficient: C) {
    let (key, phase) = register.into_normalized();
    let coefficient = coefficient.mul_phase(phase);
    match terms.entry(key) {
        Entry::Occupied(mut entry) => {
            let sum = entry.get().clone() + coefficient;
            if sum.is_zero() {
                entry.remove();
            } else {
                *entry.get_mut() = sum;
            }
        }
        Entry::Vacant(entry) => {
            if !coefficient.is_zero() {
                entry.insert(coefficient);
            }
        }
    }
}

impl<C: Coefficient> PauliRegisterSequence<C> {
    pub fn zero(width: usize) -> Self {
        PauliRegisterSequence {
            width,
            terms: BTreeMap::new(),
        }
    }

    pub fn identity(width: usize) -> Self {
        Self::from_register(PauliRegister::identity(width), C::one())
    }

    pub fn from_register(register: PauliRegister, coefficient: C) -> Self {
        let mut sequence = Self::zero(register.width());
        insert_term(&mut sequence.terms, register, coefficient);
        sequence
    }

    /// Sum of `coefficient · register` over `terms`.
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`](crate::PauliAlgebraError::WidthMismatch) if a
    /// register is not of `width` qubits.
    pub fn try_from_terms(width: usize, terms: impl IntoIterator<Item = (PauliRegister, C)>) -> Result<Self> {
        let mut sequence = Self::zero(width);
        for (register, coefficient) in terms {
            check_widths(width, register.width())?;
            insert_term(&mut sequence.terms, register, coefficient);
        }
        Ok(sequence)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether every term is a product of identity and Z labels.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.terms.keys().all(PauliRegister::is_diagonal)
    }

    /// Coefficient of `register`, taking its phase into account; zero when absent.
    pub fn coefficient(&self, register: &PauliRegister) -> C {
        let (key, phase) = register.normalized();
        self.terms
            .get(&key)
            .map_or_else(C::zero, |coefficient| coefficient.mul_phase(phase.conjugate()))
    }

    /// Terms in register order; every register has phase one.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&PauliRegister, &C)> {
        self.terms.iter()
    }

    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`](crate::PauliAlgebraError::WidthMismatch) if the widths differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        check_widths(self.width, other.width)?;
        let mut terms = self.terms.clone();
        for (register, coefficient) in &other.terms {
            insert_term(&mut terms, register.clone(), coefficient.clone());
        }
        Ok(PauliRegisterSequence { width: self.width, terms })
    }

    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`](crate::PauliAlgebraError::WidthMismatch) if the widths differ.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        check_widths(self.width, other.width)?;
        let mut terms = self.terms.clone();
        for (register, coefficient) in &other.terms {
            insert_term(&mut terms, register.clone(), -coefficient.clone());
        }
        Ok(PauliRegisterSequence { width: self.width, terms })
    }

    /// Product `self · other`, distributed over all pairs of terms.
    ///
    /// # Errors
    /// Returns [`PauliAlgebraError::WidthMismatch`](crate::PauliAlgebraError::WidthMismatch) if the widths differ.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        check_widths(self.width, other.width)?;
        let mut terms = BTreeMap::new();
        for (left, left_coefficient) in &self.terms {
            for (right, right_coefficient) in &other.terms {
                let product = left.checked_mul(right)?;
                insert_term(&mut terms, product, left_coefficient.clone() * right_coefficient.clone());
            }
        }
        Ok(PauliRegisterSequence { width: self.width, terms })
    }

    pub fn scale(&self, factor: &C) -> Self {
        self.map_coefficients(|coefficient| coefficient.clone() * factor.clone())
    }

    /// Applies `map` to every coefficient, dropping terms that become zero.
    pub fn map_coefficients<D: Coefficient>(&self, map: impl Fn(&C) -> D) -> PauliRegisterSequence<D> {
        let terms = self
            .terms
            .iter()
            .map(|(register, coefficient)| (register.clone(), map(coefficient)))
            .filter(|(_, coefficient)| !coefficient.is_zero())
            .collect();
        PauliRegisterSequence { width: self.width, terms }
    }

    /// Hermitian adjoint. Stored registers are Hermitian, so only coefficients are conjugated.
    pub fn adjoint(&self) -> Self {
        self.map_coefficients(<C as Coefficient>::conjugate)
    }

    /// Whether the operator equals its adjoint.
    #[must_use]
    pub fn is_hermitian(&self) -> bool {
        *self == self.adjoint()
    }
}

impl<C: Coefficient> FromIterator<(PauliRegister, C)> for PauliRegisterSequence<C> {
    /// The width is taken from the first register; an empty iterator yields the zero sequence on no qubits.
    ///
    /// # Panics
    /// Panics if the registers do not all have the same width.
    fn from_iter<Iter: IntoIterator<Item = (PauliRegister, C)>>(iter: Iter) -> Self {
        let mut iter = iter.into_iter().peekable();
        let width = iter.peek().map_or(0, |(register, _)| register.width());
        Self::try_from_terms(width, iter).unwrap_or_else(|error| panic!("{error}"))
    }
}

impl<C: Coefficient + Display> Display for PauliRegisterSequence<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (position, (register, coefficient)) in self.terms.iter().enumerate() {
            if position > 0 {
                f.write_str(" + ")?;
            }
            if f.alternate() {
                write!(f, "({coefficient}) {register:#}")?;
            } else {
                write!(f, "({coefficient}) {register}")?;
            }
        }
        Ok(())
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<C: Coefficient> $trait<&PauliRegisterSequence<C>> for &PauliRegisterSequence<C> {
            type Output = PauliRegisterSequence<C>;

            /// # Panics
            /// Panics if the widths differ.
            fn $method(self, other: &PauliRegisterSequence<C>) -> PauliRegisterSequence<C> {
                self.$checked(other).unwrap_or_else(|error| panic!("{error}"))
            }
        }

        impl<C: Coefficient> $trait for PauliRegisterSequence<C> {
            type Output = PauliRegisterSequence<C>;

            /// # Panics
            /// Panics if the widths differ.
            fn $method(self, other: PauliRegisterSequence<C>) -> PauliRegisterSequence<C> {
                (&self).$method(&other)
            }
        }
    };
}

binary_operator!(Add, add, checked_add);
binary_operator!(Sub, sub, checked_sub);
binary_operator!(Mul, mul, checked_mul);

impl<C: Coefficient> Neg for &PauliRegisterSequence<C> {
    type Output = PauliRegisterSequence<C>;

    fn neg(self) -> PauliRegisterSequence<C> {
        self.map_coefficients(|coefficient| -coefficient.clone())
    }
}

impl<C: Coefficient> Neg for PauliRegisterSequence<C> {
    type Output = PauliRegisterSequence<C>;

    fn neg(self) -> PauliRegisterSequence<C> {
        -&self
    }
}
