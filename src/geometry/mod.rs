//! Computational geometry used for collision checking

pub mod primitives;
pub mod polygon;

pub use primitives::*;
pub use polygon::*;
