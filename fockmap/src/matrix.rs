//! Dense matrices and spectra of small qubit operators.
//!
//! Qubit `q` is bit `q` of the computational basis index.

use crate::error::{EncodingError, Result};
use nalgebra::DMatrix;
use num_complex::Complex64;
use paulimer::{Coefficient, PauliLabel, PauliRegister, PauliRegisterSequence, Phase};

/// Largest width [`dense_matrix`] expands.
pub const MAX_DENSE_QUBITS: usize = 10;

/// Dense `2ʷ × 2ʷ` matrix of `operator`.
///
/// # Errors
/// Returns [`EncodingError::TooManyQubits`] above [`MAX_DENSE_QUBITS`].
pub fn dense_matrix(operator: &PauliRegisterSequence<Complex64>) -> Result<DMatrix<Complex64>> {
    let width = operator.width();
    if width > MAX_DENSE_QUBITS {
        return Err(EncodingError::TooManyQubits {
            qubits: width,
            limit: MAX_DENSE_QUBITS,
        });
    }
    let dimension = 1usize << width;
    let mut matrix = DMatrix::zeros(dimension, dimension);
    for (register, coefficient) in operator.iter() {
        let flips = flip_mask(register);
        for column in 0..dimension {
            let row = column ^ flips;
            matrix[(row, column)] += coefficient.mul_phase(column_phase(register, column));
        }
    }
    Ok(matrix)
}

fn flip_mask(register: &PauliRegister) -> usize {
    register
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| label.x_bit())
        .fold(0, |mask, (qubit, _)| mask | (1 << qubit))
}

/// Phase of `⟨column ⊕ flips| register |column⟩`, with `Y = 𝑖XZ` on every qubit.
fn column_phase(register: &PauliRegister, column: usize) -> Phase {
    register
        .labels()
        .iter()
        .enumerate()
        .map(|(qubit, &label): (usize, &PauliLabel)| {
            let y_phase = if label.x_bit() && label.z_bit() { Phase::I } else { Phase::ONE };
            let z_sign = if label.z_bit() && column & (1 << qubit) != 0 {
                Phase::MINUS_ONE
            } else {
                Phase::ONE
            };
            y_phase * z_sign
        })
        .product::<Phase>()
        * register.phase()
}

/// Eigenvalues of a Hermitian operator in increasing order.
///
/// # Errors
/// Returns [`EncodingError::TooManyQubits`] above [`MAX_DENSE_QUBITS`] and
/// [`EncodingError::NotHermitian`] if the matrix differs from its adjoint by more than `tolerance`.
pub fn eigenvalues(operator: &PauliRegisterSequence<Complex64>, tolerance: f64) -> Result<Vec<f64>> {
    let matrix = dense_matrix(operator)?;
    if (&matrix - matrix.adjoint()).norm() > tolerance {
        return Err(EncodingError::NotHermitian);
    }
    let mut values: Vec<f64> = matrix.symmetric_eigenvalues().iter().copied().collect();
    values.sort_by(f64::total_cmp);
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator(terms: &[(&str, Complex64)]) -> PauliRegisterSequence<Complex64> {
        terms
            .iter()
            .map(|(register, coefficient)| (register.parse::<PauliRegister>().unwrap(), *coefficient))
            .collect()
    }

    fn real(value: f64) -> Complex64 {
        Complex64::new(value, 0.0)
    }

    #[test]
    fn single_qubit_paulis() {
        let i = Complex64::i();
        let y = dense_matrix(&operator(&[("Y", real(1.0))])).unwrap();
        assert_eq!(y, DMatrix::from_row_slice(2, 2, &[real(0.0), -i, i, real(0.0)]));
        let z = dense_matrix(&operator(&[("Z", real(1.0))])).unwrap();
        assert_eq!(z, DMatrix::from_row_slice(2, 2, &[real(1.0), real(0.0), real(0.0), real(-1.0)]));
    }

    #[test]
    fn qubit_zero_is_lowest_bit() {
        // X on qubit 0 maps |00⟩ to |01⟩, basis index 0 to 1
        let matrix = dense_matrix(&operator(&[("XI", real(1.0))])).unwrap();
        assert_eq!(matrix[(1, 0)], real(1.0));
        assert_eq!(matrix[(2, 0)], real(0.0));
    }

    #[test]
    fn register_phase_is_applied() {
        let minus_i_x: PauliRegister = "-iX".parse().unwrap();
        let sequence = PauliRegisterSequence::from_register(minus_i_x, real(1.0));
        let matrix = dense_matrix(&sequence).unwrap();
        assert_eq!(matrix[(1, 0)], Complex64::new(0.0, -1.0));
    }

    #[test]
    fn spectrum_of_transverse_pair() {
        // XX + ZZ has eigenvalues -2, 0, 0, 2
        let values = eigenvalues(&operator(&[("XX", real(1.0)), ("ZZ", real(1.0))]), 1e-12).unwrap();
        let expected = [-2.0, 0.0, 0.0, 2.0];
        assert!(values.iter().zip(expected).all(|(value, expected)| (value - expected).abs() < 1e-9));
    }

    #[test]
    fn non_hermitian_is_rejected() {
        assert_eq!(
            eigenvalues(&operator(&[("X", Complex64::i())]), 1e-12),
            Err(EncodingError::NotHermitian)
        );
    }

    #[test]
    fn width_limit() {
        let wide = PauliRegisterSequence::<Complex64>::identity(MAX_DENSE_QUBITS + 1);
        assert_eq!(
            dense_matrix(&wide),
            Err(EncodingError::TooManyQubits {
                qubits: MAX_DENSE_QUBITS + 1,
                limit: MAX_DENSE_QUBITS
            })
        );
    }
}
