//! rrt_star_planner - RRT* path planning among polygonal obstacles
//!
//! This crate provides the geometric predicates, ear-clipping polygon
//! triangulation, obstacle field and RRT* tree search needed to plan
//! collision-free paths in a bounded 2D workspace.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod geometry;
pub mod mapping;
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Path2D};
pub use common::{CollisionChecker, Visualizable};
pub use common::{RoboticsError, RoboticsResult};
pub use mapping::ObstacleField;
pub use path_planning::{GoalRegion, PlannerState, RRTStar, RRTStarConfig};
