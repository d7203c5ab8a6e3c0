// Path Planning algorithms module

pub mod tree;
pub mod rrt_star;

pub use tree::*;
pub use rrt_star::*;
