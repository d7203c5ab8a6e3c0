//! Geometric predicates for 2D collision queries
//!
//! Orientation tests, segment intersection and point/segment-in-triangle
//! checks used by the polygon triangulation and the obstacle field.
//! All predicates are exact sign tests with no epsilon tolerance.
//!
//! Note the two containment notions differ on the boundary:
//! [`point_in_triangle`] is strictly interior, while the collinear cases of
//! [`segments_intersect`] treat touching endpoints as intersecting.

use itertools::Itertools;

use crate::common::Point2D;

/// Triangle given by its three corners
pub type Triangle = [Point2D; 3];

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the path p -> q -> r from the sign of cross(q - p, r - q)
pub fn orientation(p: &Point2D, q: &Point2D, r: &Point2D) -> Orientation {
    let cross = (*q - *p).cross(&(*r - *q));

    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// True if `p` lies inside the axis-aligned bounding box of segment a-b.
///
/// Only meaningful once `p` is known to be collinear with `a` and `b`.
pub fn point_on_segment(a: &Point2D, b: &Point2D, p: &Point2D) -> bool {
    p.x <= a.x.max(b.x) && p.x >= a.x.min(b.x) && p.y <= a.y.max(b.y) && p.y >= a.y.min(b.y)
}

/// True if segment a1-b1 intersects segment a2-b2, touching included
pub fn segments_intersect(a1: &Point2D, b1: &Point2D, a2: &Point2D, b2: &Point2D) -> bool {
    let o1 = orientation(a1, b1, a2);
    let o2 = orientation(a1, b1, b2);
    let o3 = orientation(a2, b2, a1);
    let o4 = orientation(a2, b2, b1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear endpoint lying on the other segment
    (o1 == Orientation::Collinear && point_on_segment(a1, b1, a2))
        || (o2 == Orientation::Collinear && point_on_segment(a1, b1, b2))
        || (o3 == Orientation::Collinear && point_on_segment(a2, b2, a1))
        || (o4 == Orientation::Collinear && point_on_segment(a2, b2, b1))
}

/// Twice the signed area of triangle (a, b, point); positive when `point`
/// is left of the directed line a -> b
pub fn is_left(a: &Point2D, b: &Point2D, point: &Point2D) -> f64 {
    (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y)
}

/// True if `v` is strictly left of every directed edge a->b, b->c, c->a.
///
/// Boundary points are not contained.
pub fn point_in_triangle(v: &Point2D, a: &Point2D, b: &Point2D, c: &Point2D) -> bool {
    is_left(a, b, v) > 0.0 && is_left(b, c, v) > 0.0 && is_left(c, a, v) > 0.0
}

/// True if segment a-b crosses or touches an edge of the triangle, or if
/// `a` is strictly inside it
pub fn segment_in_triangle(a: &Point2D, b: &Point2D, triangle: &Triangle) -> bool {
    let crosses_edge = triangle
        .iter()
        .circular_tuple_windows::<(_, _)>()
        .any(|(p, q)| segments_intersect(a, b, p, q));

    crosses_edge || point_in_triangle(a, &triangle[0], &triangle[1], &triangle[2])
}
