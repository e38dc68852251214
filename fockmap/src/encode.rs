//! Fermionic operators to qubit operators.

use crate::encoding::Encoding;
use crate::error::{EncodingError, Result};
use crate::fermion::{FermionicExpression, FermionicTerm};
use crate::hamiltonian::Hamiltonian;
use crate::ladder::{LadderOperator, LadderTable};
use crate::parallel::map_slice;
use num_complex::Complex64;
use paulimer::{exact_to_complex64, PauliRegisterSequence};

/// Exact qubit image of the product `operators[0] · operators[1] · …`.
///
/// # Errors
/// Returns [`EncodingError::ModeOutOfRange`] if an operator acts outside the encoding.
pub fn encode_ladder_product(operators: &[LadderOperator], encoding: &Encoding) -> Result<PauliRegisterSequence> {
    operators
        .iter()
        .try_fold(PauliRegisterSequence::identity(encoding.mode_count()), |product, operator| {
            Ok(product.checked_mul(&encoding.ladder(*operator)?)?)
        })
}

/// Qubit image of a fermionic expression under `encoding`.
///
/// Ladder products are exact; the complex coefficients of the expression are applied last.
///
/// # Errors
/// Returns [`EncodingError::ModeOutOfRange`] if an operator acts outside the encoding.
pub fn encode(expression: &FermionicExpression, encoding: &Encoding) -> Result<PauliRegisterSequence<Complex64>> {
    let table = LadderTable::build(encoding)?;
    encode_with_table(expression, &table)
}

/// Like [`encode`], reusing ladder operators derived earlier.
///
/// # Errors
/// Returns [`EncodingError::ModeOutOfRange`] if an operator acts outside the table.
pub fn encode_with_table(
    expression: &FermionicExpression,
    table: &LadderTable,
) -> Result<PauliRegisterSequence<Complex64>> {
    let encoded = map_slice(expression.terms(), |term| encode_term(term, table));
    encoded
        .into_iter()
        .try_fold(PauliRegisterSequence::zero(table.width()), |sum, term| {
            Ok(sum.checked_add(&term?)?)
        })
}

fn encode_term(term: &FermionicTerm, table: &LadderTable) -> Result<PauliRegisterSequence<Complex64>> {
    Ok(table
        .product(&term.operators)?
        .map_coefficients(exact_to_complex64)
        .scale(&term.coefficient))
}

/// Qubit Hamiltonian. The encoding must have exactly one mode per spin orbital of `hamiltonian`.
///
/// # Errors
/// Returns [`EncodingError::ModeCountMismatch`] if the mode counts differ.
pub fn encode_hamiltonian(hamiltonian: &Hamiltonian, encoding: &Encoding) -> Result<PauliRegisterSequence<Complex64>> {
    if hamiltonian.mode_count() != encoding.mode_count() {
        return Err(EncodingError::ModeCountMismatch {
            expected: hamiltonian.mode_count(),
            found: encoding.mode_count(),
        });
    }
    let encoded = encode(&hamiltonian.to_fermionic_expression(), encoding)?;
    log::debug!(
        "{} Hamiltonian on {} qubits has {} Pauli terms",
        encoding.name(),
        encoded.width(),
        encoded.len()
    );
    Ok(encoded)
}
