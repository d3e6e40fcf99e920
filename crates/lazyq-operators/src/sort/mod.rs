//! Chained stable multi-key sort.

pub mod layer;
pub mod ordered;

pub use layer::{Layer, SortLayers};
pub use ordered::Ordered;
