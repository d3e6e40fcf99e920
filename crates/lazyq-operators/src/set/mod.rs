//! Uniqueness set and the set operators it backs.

pub mod ops;
pub mod unique;

pub use ops::{Distinct, DistinctBy, Except, Intersect, Union};
pub use unique::UniquenessSet;
