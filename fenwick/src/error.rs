use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenwickError {
    /// A position outside `0..size` was addressed.
    #[error("index {index} out of range for a Fenwick tree of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// An exclusive prefix end beyond `size` was requested.
    #[error("prefix end {end} out of range for a Fenwick tree of size {size}")]
    EndOutOfRange { end: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, FenwickError>;
