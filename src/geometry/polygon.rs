//! Simple polygons and ear-clipping triangulation
//!
//! Obstacles are stored as their vertex rings and answer containment
//! queries through a list of triangles produced by ear clipping.
//!
//! The ear test treats a vertex as convex when
//! `cross(prev - v, next - v) >= 0` and emits triangles as `(v, prev, next)`,
//! so polygons are expected to wind clockwise in a y-up frame
//! (counter-clockwise on a y-down screen). Self-intersecting polygons,
//! holes and collinear runs of vertices are not supported.

use log::debug;

use crate::common::{Point2D, RoboticsError, RoboticsResult};
use crate::geometry::primitives::{point_in_triangle, segment_in_triangle, Triangle};

/// Wrap a possibly negative index into `[0, len)`
pub fn wrap_index(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

/// Polygonal obstacle boundary
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    triangles: Option<Vec<Triangle>>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Polygon {
            vertices,
            triangles: None,
        }
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Triangles from the last call to [`Polygon::triangulate`]
    pub fn triangles(&self) -> Option<&[Triangle]> {
        self.triangles.as_deref()
    }

    pub fn is_triangulated(&self) -> bool {
        self.triangles.is_some()
    }

    /// Shoelace area, negative for clockwise rings in a y-up frame
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| self.vertices[i].cross(&self.vertices[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }

    /// Triangulate by ear clipping.
    ///
    /// Each pass scans the shrinking index ring from its start and clips
    /// the first ear found. Fails if a full pass finds no ear, which
    /// happens for counter-clockwise or degenerate input.
    pub fn triangulate(&mut self) -> RoboticsResult<()> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(RoboticsError::InvalidParameter(format!(
                "polygon needs at least 3 vertices, got {}",
                n
            )));
        }

        let mut ring: Vec<usize> = (0..n).collect();
        let mut triangles = Vec::with_capacity(n - 2);

        while ring.len() > 3 {
            let ear = (0..ring.len())
                .find(|&i| self.is_ear(&ring, i))
                .ok_or_else(|| {
                    RoboticsError::TriangulationError(format!(
                        "no ear found with {} vertices remaining",
                        ring.len()
                    ))
                })?;

            let (prev, check, next) = self.corner(&ring, ear);
            triangles.push([check, prev, next]);
            ring.remove(ear);
        }

        // Last three indices, ordered like a clipped ear
        let (prev, check, next) = self.corner(&ring, 1);
        triangles.push([check, prev, next]);

        debug!("triangulated polygon with {} vertices into {} triangles", n, triangles.len());
        self.triangles = Some(triangles);
        Ok(())
    }

    /// True if the point is strictly inside one of the triangles
    pub fn contains(&self, point: &Point2D) -> RoboticsResult<bool> {
        let triangles = self.triangles.as_ref().ok_or(RoboticsError::UntriangulatedPolygon)?;

        Ok(triangles
            .iter()
            .any(|t| point_in_triangle(point, &t[0], &t[1], &t[2])))
    }

    /// True if the segment touches or enters one of the triangles
    pub fn contains_segment(&self, a: &Point2D, b: &Point2D) -> RoboticsResult<bool> {
        let triangles = self.triangles.as_ref().ok_or(RoboticsError::UntriangulatedPolygon)?;

        Ok(triangles.iter().any(|t| segment_in_triangle(a, b, t)))
    }

    // (prev, check, next) around position `i` of the ring
    fn corner(&self, ring: &[usize], i: usize) -> (Point2D, Point2D, Point2D) {
        let len = ring.len();
        let prev = ring[wrap_index(i as isize - 1, len)];
        let next = ring[wrap_index(i as isize + 1, len)];
        (self.vertices[prev], self.vertices[ring[i]], self.vertices[next])
    }

    fn is_ear(&self, ring: &[usize], i: usize) -> bool {
        let len = ring.len();
        let a = ring[i];
        let b = ring[wrap_index(i as isize - 1, len)];
        let c = ring[wrap_index(i as isize + 1, len)];

        let (prev, check, next) = self.corner(ring, i);

        // Reflex angle at `check`
        if (prev - check).cross(&(next - check)) < 0.0 {
            return false;
        }

        !self
            .vertices
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != a && j != b && j != c)
            .any(|(_, v)| point_in_triangle(v, &check, &prev, &next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn triangle_area(t: &Triangle) -> f64 {
        (t[1] - t[0]).cross(&(t[2] - t[0])).abs() / 2.0
    }

    fn square() -> Polygon {
        Polygon::new(vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)])
    }

    // Concave L shape, clockwise
    fn l_shape() -> Polygon {
        Polygon::new(vec![
            p(0.0, 0.0),
            p(0.0, 30.0),
            p(10.0, 30.0),
            p(10.0, 10.0),
            p(40.0, 10.0),
            p(40.0, 0.0),
        ])
    }

    fn assert_partition(polygon: &Polygon) {
        let triangles = polygon.triangles().unwrap();
        assert_eq!(triangles.len(), polygon.vertices().len() - 2);
        let total: f64 = triangles.iter().map(triangle_area).sum();
        assert!((total - polygon.signed_area().abs()).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(2, 5), 2);
    }

    #[test]
    fn test_triangulate_square() {
        let mut polygon = square();
        polygon.triangulate().unwrap();
        assert_partition(&polygon);
        assert!((polygon.signed_area() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangulate_concave() {
        let mut polygon = l_shape();
        polygon.triangulate().unwrap();
        assert_partition(&polygon);
        assert!((polygon.signed_area().abs() - 600.0).abs() < 1e-9);

        assert!(polygon.contains(&p(5.0, 20.0)).unwrap());
        assert!(polygon.contains(&p(30.0, 5.0)).unwrap());
        assert!(!polygon.contains(&p(25.0, 20.0)).unwrap());
    }

    #[test]
    fn test_triangle_is_its_own_triangulation() {
        let mut polygon = Polygon::new(vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0)]);
        polygon.triangulate().unwrap();
        assert_partition(&polygon);
        assert!(polygon.contains(&p(2.0, 2.0)).unwrap());
    }

    #[test]
    fn test_contains_requires_triangulation() {
        let polygon = square();
        assert!(matches!(polygon.contains(&p(5.0, 5.0)), Err(RoboticsError::UntriangulatedPolygon)));
        assert!(matches!(
            polygon.contains_segment(&p(0.0, 0.0), &p(1.0, 1.0)),
            Err(RoboticsError::UntriangulatedPolygon)
        ));
    }

    #[test]
    fn test_contains_point() {
        let mut polygon = square();
        polygon.triangulate().unwrap();
        assert!(polygon.contains(&p(2.0, 3.0)).unwrap());
        assert!(polygon.contains(&p(8.0, 8.0)).unwrap());
        assert!(!polygon.contains(&p(12.0, 3.0)).unwrap());
        // Outer boundary is free
        assert!(!polygon.contains(&p(0.0, 5.0)).unwrap());
        // So is the internal diagonal shared by the two triangles
        assert!(!polygon.contains(&p(5.0, 5.0)).unwrap());
    }

    #[test]
    fn test_contains_segment() {
        let mut polygon = square();
        polygon.triangulate().unwrap();
        assert!(polygon.contains_segment(&p(-5.0, 5.0), &p(15.0, 5.0)).unwrap());
        assert!(polygon.contains_segment(&p(2.0, 2.0), &p(3.0, 3.0)).unwrap());
        // Touching a corner counts
        assert!(polygon.contains_segment(&p(-5.0, -5.0), &p(0.0, 0.0)).unwrap());
        assert!(!polygon.contains_segment(&p(-5.0, 0.0), &p(-5.0, 10.0)).unwrap());
    }

    #[test]
    fn test_triangulate_rejects_degenerate_input() {
        let mut polygon = Polygon::new(vec![p(0.0, 0.0), p(1.0, 1.0)]);
        assert!(matches!(polygon.triangulate(), Err(RoboticsError::InvalidParameter(_))));

        // Counter-clockwise ring has no ear under the clockwise convention
        let mut polygon = Polygon::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]);
        assert!(matches!(polygon.triangulate(), Err(RoboticsError::TriangulationError(_))));
        assert!(!polygon.is_triangulated());
    }
}
