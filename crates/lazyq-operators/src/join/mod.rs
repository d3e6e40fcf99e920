//! Equality joins over two sequences.

pub mod hash;

pub use hash::{GroupJoin, Join};
