//! Fenwick (binary indexed) trees.
//!
//! [`structure`] holds the index arithmetic shared by every Fenwick-shaped object: which cells an
//! update touches, which cells cover a prefix, which cells report to a given cell.
//! [`FenwickArena`] is a persistent Fenwick tree: every update returns a new [`FenwickTree`] version
//! and all earlier versions stay valid.

pub mod error;
pub mod persistent;
pub mod structure;

pub use error::{FenwickError, Result};
pub use persistent::{FenwickArena, FenwickTree};
