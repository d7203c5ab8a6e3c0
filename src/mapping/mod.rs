// Obstacle maps for collision checking

pub mod obstacle_file;
pub mod obstacle_field;

pub use obstacle_file::*;
pub use obstacle_field::*;
