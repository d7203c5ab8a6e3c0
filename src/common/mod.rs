//! Common types, traits, and error definitions for rrt_star_planner
//!
//! This module provides the foundational building blocks shared by
//! the geometry, mapping and path planning layers.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
