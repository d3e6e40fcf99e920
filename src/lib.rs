//! lazyq: deferred sequence queries.
//!
//! Re-exports the vocabulary crate (`lazyq-core`) and the operator crate
//! (`lazyq-operators`) behind one import path. Both crates stay reachable
//! under their own names.

#![forbid(unsafe_code)]

pub use lazyq_core;
pub use lazyq_operators;

pub use lazyq_core::comparer::{
    EqualityComparer, FnEquality, FnOrder, KeyComparer, KeyedEquality, NaturalEquality,
    NaturalOrder,
};
pub use lazyq_core::config::QueryConfig;
pub use lazyq_core::error::{SeqError, SeqResult};
pub use lazyq_core::value::{Downcast, Value};
pub use lazyq_operators::source::{empty, from_fallible_fn, from_fn, from_vec, range, repeat};
pub use lazyq_operators::{Grouping, Lookup, Ordered, Sequence, SequenceExt};

pub mod prelude {
    pub use lazyq_operators::prelude::*;
}
