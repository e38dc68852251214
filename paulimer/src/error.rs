use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PauliAlgebraError {
    #[error("register width mismatch: {left} vs {right}")]
    WidthMismatch { left: usize, right: usize },

    #[error("qubit {qubit} out of range for a register of width {width}")]
    QubitOutOfRange { qubit: usize, width: usize },

    #[error("qubit {qubit} given more than once")]
    RepeatedQubit { qubit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to parse Pauli register")]
pub struct PauliStringParsingError;

pub type Result<T> = std::result::Result<T, PauliAlgebraError>;

/// # Errors
/// Returns [`PauliAlgebraError::WidthMismatch`] unless `left == right`.
pub fn check_widths(left: usize, right: usize) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(PauliAlgebraError::WidthMismatch { left, right })
    }
}
