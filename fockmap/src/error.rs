use crate::index_set::IndexSet;
use crate::ladder::MajoranaIndex;
use crate::scheme::SetKind;
use fenwick::FenwickError;
use paulimer::PauliAlgebraError;
use thiserror::Error;

/// Malformed encoding trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("a tree needs at least one node")]
    Empty,

    #[error("node {label} is its own descendant")]
    Cycle { label: usize },

    #[error("node {label} occurs more than once")]
    DuplicateLabel { label: usize },

    #[error("node {label} has {count} children, at most 3 are allowed")]
    TooManyChildren { label: usize, count: usize },

    #[error("tree has {found} nodes, expected one per mode ({expected})")]
    ModeCountMismatch { expected: usize, found: usize },

    #[error("node label {label} is not a mode of a {mode_count}-mode system")]
    LabelOutOfRange { label: usize, mode_count: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("scheme {scheme} is invalid: {set} set of mode {mode} contains {offending}")]
    SchemeInvalid {
        scheme: String,
        mode: usize,
        set: SetKind,
        offending: IndexSet,
    },

    #[error("scheme {scheme} is invalid: occupation set of mode {mode} does not contain the mode")]
    OccupationMissingMode { scheme: String, mode: usize },

    #[error("Majorana operators {first} and {second} commute")]
    MajoranasCommute { first: MajoranaIndex, second: MajoranaIndex },

    #[error("mode {mode} out of range for {mode_count} modes")]
    ModeOutOfRange { mode: usize, mode_count: usize },

    #[error("expected an encoding of {expected} modes, found {found}")]
    ModeCountMismatch { expected: usize, found: usize },

    #[error("{qubits} qubits exceed the limit of {limit} for exhaustive enumeration")]
    TooManyQubits { qubits: usize, limit: usize },

    #[error("operator is not Hermitian")]
    NotHermitian,

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Algebra(#[from] PauliAlgebraError),

    #[error(transparent)]
    Fenwick(#[from] FenwickError),
}

pub type Result<T> = std::result::Result<T, EncodingError>;
