//! Deferred sequence operators.
//!
//! Build a pipeline from a source in [`source`], chain operators through
//! [`SequenceExt`], and pull results with a cursor or a reduction:
//!
//! ```
//! use lazyq_operators::prelude::*;
//!
//! let evens = from_vec(vec![5, 2, 8, 3, 4])
//!     .filter(|x| x % 2 == 0)
//!     .order_by(|x| *x);
//! assert_eq!(evens.to_vec().unwrap(), vec![2, 4, 8]);
//! ```

#![forbid(unsafe_code)]

pub mod cursor;
pub mod ext;
pub mod join;
pub mod lookup;
mod metrics;
pub mod reduce;
pub mod set;
pub mod sort;
pub mod source;
pub mod stream;
pub mod traits;

pub use lazyq_core;

pub use crate::ext::SequenceExt;
pub use crate::lookup::{Grouping, Lookup};
pub use crate::set::UniquenessSet;
pub use crate::sort::Ordered;
pub use crate::traits::{QueryConfig, SeqError, SeqResult, Sequence};

pub mod prelude {
    pub use crate::ext::SequenceExt;
    pub use crate::lookup::{Grouping, Lookup};
    pub use crate::source::{empty, from_fallible_fn, from_fn, from_vec, range, repeat};
    pub use crate::traits::{QueryConfig, SeqError, SeqResult, Sequence};
    pub use lazyq_core::comparer::{
        EqualityComparer, FnEquality, FnOrder, KeyComparer, KeyedEquality, NaturalEquality,
        NaturalOrder,
    };
    pub use lazyq_core::value::{Downcast, Value};
}
