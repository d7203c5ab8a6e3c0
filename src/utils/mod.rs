//! Utility modules for rrt_star_planner

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, colors};
