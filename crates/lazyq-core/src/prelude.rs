//! Convenient re-exports for downstream crates.

pub use crate::comparer::{
    EqualityComparer, FnEquality, FnOrder, KeyComparer, KeyedEquality, NaturalEquality,
    NaturalOrder,
};
pub use crate::config::{BufferBudget, QueryConfig};
pub use crate::error::{SeqError, SeqResult};
pub use crate::hash::StableHasher;
pub use crate::value::{Downcast, Value};
