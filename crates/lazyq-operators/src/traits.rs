//! The `Sequence` contract every source and operator output satisfies.
//!
//! A `Sequence` is a recipe, not a traversal. `cursor()` starts a fresh,
//! independent traversal each time it is called; nothing upstream runs
//! until that cursor is pulled.

pub use lazyq_core::config::QueryConfig;
pub use lazyq_core::error::{SeqError, SeqResult};

/// Trait that all sources and operators implement.
///
/// Invariants:
/// - `cursor` performs no per-element work; the first pull does.
/// - Two cursors never share buffering state.
/// - After a cursor yields an `Err`, it yields `None` forever.
pub trait Sequence {
    type Item;

    /// Pull-based traversal state for one run of the pipeline.
    type Cursor<'a>: Iterator<Item = SeqResult<Self::Item>>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_>;

    /// Configuration threaded from the source. Operators forward their
    /// (first) upstream's config.
    fn config(&self) -> QueryConfig {
        QueryConfig::default()
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor<'a> = S::Cursor<'a> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }

    fn config(&self) -> QueryConfig {
        (**self).config()
    }
}
