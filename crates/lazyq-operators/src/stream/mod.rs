//! Streaming operators: each pulls at most one pending upstream element per
//! output element. `reverse` lives here too, though it buffers.

pub mod combine;
pub mod convert;
pub mod filter;
pub mod map;
pub mod partition;
pub mod reverse;

pub use combine::{Append, Concat, DefaultIfEmpty, Prepend, Zip};
pub use convert::{Cast, OfType};
pub use filter::{Filter, FilterIndexed};
pub use map::{Select, SelectIndexed, SelectMany, SelectManyIndexed};
pub use partition::{Chunk, Indexed, Plain, Skip, SkipWhile, Take, TakeWhile, WhilePredicate};
pub use reverse::Reverse;
