//! Exact algebra of Pauli strings.
//!
//! A [`PauliRegister`] is a fixed-width string of [`PauliLabel`]s with a global phase in
//! `{1, 𝑖, -1, -𝑖}`. A [`PauliRegisterSequence`] is a linear combination of registers with
//! [`Coefficient`]s; by default the coefficients are exact Gaussian rationals so that identities
//! such as fermionic anti-commutation cancel to a literal zero.

pub mod coefficient;
pub mod error;
pub mod register;
pub mod sequence;

#[cfg(feature = "serde")]
mod serde;

pub use coefficient::{exact, exact_to_complex64, Coefficient, ExactComplex};
pub use error::{PauliAlgebraError, PauliStringParsingError, Result};
pub use quantum_core::{PauliLabel, Phase};
pub use register::PauliRegister;
pub use sequence::PauliRegisterSequence;
