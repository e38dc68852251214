//! Fermion-to-qubit encodings.
//!
//! An encoding assigns every fermionic mode `j` a pair of anticommuting Pauli strings, the
//! Majorana operators `c_j` and `d_j`, and the ladder operators follow as
//! `a_j† = (c_j - 𝑖d_j)/2` and `a_j = (c_j + 𝑖d_j)/2`. Encodings come from two places:
//! - index-set schemes ([`EncodingScheme`]) such as Jordan-Wigner, Bravyi-Kitaev and parity,
//! - rooted trees of modes ([`TreeNode`]) such as the balanced binary and ternary trees.
//!
//! Both are wrapped in [`Encoding`] and produce the same [`PauliRegisterSequence`] output, which
//! the [`verification`] module checks for fermionic behaviour.
//!
//! ```
//! use fockmap::{encode_hamiltonian, matrix::eigenvalues, Encoding, Hamiltonian};
//!
//! let hamiltonian = Hamiltonian::h2_sto3g();
//! let encoding = Encoding::bravyi_kitaev(hamiltonian.mode_count()).unwrap();
//! let qubit_hamiltonian = encode_hamiltonian(&hamiltonian, &encoding).unwrap();
//! let ground = eigenvalues(&qubit_hamiltonian, 1e-9).unwrap()[0];
//! assert!((ground + 1.137_27).abs() < 1e-4);
//! ```

pub mod encode;
pub mod encoding;
pub mod error;
pub mod fermion;
pub mod hamiltonian;
pub mod index_set;
pub mod indexed;
pub mod ladder;
pub mod matrix;
pub mod occupation;
mod parallel;
pub mod scheme;
pub mod tree;
pub mod verification;

pub use encode::{encode, encode_hamiltonian, encode_ladder_product, encode_with_table};
pub use encoding::Encoding;
pub use error::{EncodingError, Result, TreeError};
pub use fermion::{FermionicExpression, FermionicTerm};
pub use hamiltonian::Hamiltonian;
pub use index_set::IndexSet;
pub use indexed::IndexedEncoding;
pub use ladder::{LadderKind, LadderOperator, LadderTable, MajoranaIndex, MajoranaKind, MajoranaPair};
pub use occupation::{occupation_mismatches, qubit_basis_state, OccupationMismatch, MAX_OCCUPATION_MODES};
pub use paulimer::{PauliRegister, PauliRegisterSequence};
pub use scheme::{EncodingScheme, IndexScheme, ModeSets, SetKind, BRAVYI_KITAEV, JORDAN_WIGNER, PARITY};
pub use tree::{balanced_binary_tree, balanced_ternary_tree, TreeEncoding, TreeNode};
pub use verification::{
    check_anti_commutation, check_cross_encoding, check_number_conservation, check_occupation_consistency, verify,
    verify_all, CheckFailure, CheckKind, CheckReport, CheckStatus, VerificationConfig, VerificationReport,
};
