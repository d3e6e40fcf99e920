#![forbid(unsafe_code)]
//! lazyq-core: the vocabulary shared by every lazyq crate.
//!
//! This crate holds no iteration machinery. It provides:
//! - `SeqError` / `SeqResult`, the one error type every traversal reports;
//! - `QueryConfig`, threaded from a source through each pipeline stage;
//! - equality and ordering comparators with natural defaults;
//! - a blake3-backed `StableHasher` for process-independent hashing;
//! - `Value` plus the `Downcast` type-tag conversions used by `cast`/`of_type`.

pub mod comparer;
pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod value;
