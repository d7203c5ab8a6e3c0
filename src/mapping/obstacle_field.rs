//! Polygonal obstacle field
//!
//! Collection of triangulated polygons acting as the collision oracle
//! for the sampling-based planners.

use std::path::Path;

use crate::common::{CollisionChecker, Point2D, RoboticsResult};
use crate::geometry::Polygon;
use crate::mapping::obstacle_file::{load_obstacles, parse_obstacles};

/// Immutable set of triangulated obstacle polygons
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    polygons: Vec<Polygon>,
}

impl ObstacleField {
    /// Build a field, triangulating every polygon
    pub fn new(mut polygons: Vec<Polygon>) -> RoboticsResult<Self> {
        for polygon in &mut polygons {
            polygon.triangulate()?;
        }
        Ok(ObstacleField { polygons })
    }

    /// Field with no obstacles
    pub fn empty() -> Self {
        ObstacleField::default()
    }

    /// Parse obstacle-file text into a field
    pub fn parse(text: &str) -> RoboticsResult<Self> {
        Self::new(parse_obstacles(text)?)
    }

    /// Load an obstacle file into a field
    pub fn from_file<P: AsRef<Path>>(path: P) -> RoboticsResult<Self> {
        Self::new(load_obstacles(path)?)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

// Every polygon was triangulated in `new`, so containment cannot fail here.
impl CollisionChecker for ObstacleField {
    fn is_blocked(&self, point: &Point2D) -> bool {
        self.polygons
            .iter()
            .any(|polygon| matches!(polygon.contains(point), Ok(true)))
    }

    fn segment_blocked(&self, a: &Point2D, b: &Point2D) -> bool {
        self.polygons
            .iter()
            .any(|polygon| matches!(polygon.contains_segment(a, b), Ok(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RoboticsError;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    // Wall between (10,10) and (580,460), clockwise in a y-up frame
    const WALL: &str = "250 150\n250 350\n350 350\n350 150\n\n400 400\n400 450\n450 400";

    #[test]
    fn test_field_queries() {
        let field = ObstacleField::parse(WALL).unwrap();
        assert_eq!(field.len(), 2);
        assert!(field.polygons().iter().all(|polygon| polygon.is_triangulated()));

        assert!(field.is_blocked(&p(300.0, 200.0)));
        assert!(field.is_blocked(&p(410.0, 410.0)));
        assert!(!field.is_blocked(&p(100.0, 100.0)));

        assert!(field.segment_blocked(&p(10.0, 10.0), &p(580.0, 460.0)));
        assert!(!field.segment_blocked(&p(10.0, 10.0), &p(200.0, 10.0)));
    }

    #[test]
    fn test_empty_field_blocks_nothing() {
        let field = ObstacleField::empty();
        assert!(field.is_empty());
        assert!(!field.is_blocked(&p(1.0, 1.0)));
        assert!(!field.segment_blocked(&p(0.0, 0.0), &p(640.0, 480.0)));
    }

    #[test]
    fn test_sample_obstacle_file() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/obstacles.txt");
        let field = ObstacleField::from_file(path).unwrap();
        assert_eq!(field.len(), 3);
        assert!(!field.is_blocked(&p(10.0, 10.0)));
        assert!(field.is_blocked(&p(200.0, 100.0)));
        assert!(field.is_blocked(&p(550.0, 70.0)));
    }

    #[test]
    fn test_field_propagates_triangulation_errors() {
        // Counter-clockwise square
        let err = ObstacleField::parse("0 0\n10 0\n10 10\n0 10").unwrap_err();
        assert!(matches!(err, RoboticsError::TriangulationError(_)));
    }
}
