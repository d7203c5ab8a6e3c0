//! Common traits defining interfaces between the planner and its collaborators

use crate::common::types::*;

/// Collision oracle queried by sampling-based planners
pub trait CollisionChecker {
    /// True if the point lies inside an obstacle
    fn is_blocked(&self, point: &Point2D) -> bool;

    /// True if the segment a-b touches or crosses an obstacle
    fn segment_blocked(&self, a: &Point2D, b: &Point2D) -> bool;
}

/// Trait for visualizable algorithms
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Half-plane world: everything with x >= 0 is blocked
    struct HalfPlane;

    impl CollisionChecker for HalfPlane {
        fn is_blocked(&self, point: &Point2D) -> bool {
            point.x >= 0.0
        }

        fn segment_blocked(&self, a: &Point2D, b: &Point2D) -> bool {
            self.is_blocked(a) || self.is_blocked(b)
        }
    }

    #[test]
    fn test_collision_checker_trait() {
        let world = HalfPlane;
        assert!(world.is_blocked(&Point2D::new(1.0, 0.0)));
        assert!(!world.segment_blocked(&Point2D::new(-2.0, 0.0), &Point2D::new(-1.0, 5.0)));
    }
}
