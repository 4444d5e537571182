//! Polygonal collision geometry
//!
//! Triangles and simple polygons (convex or concave). Containment uses the
//! even-odd rule and counts points on an edge as inside, so the polygonal
//! tests report touching shapes as colliding.

use super::primitives::{Rectangle, Segment, Span};
use crate::foundation::math::{Point, Real};

/// Triangle given by three vertices
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    /// First vertex
    pub a: Point,
    /// Second vertex
    pub b: Point,
    /// Third vertex
    pub c: Point,
}

impl Triangle {
    /// Creates a new triangle
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Vertices in declaration order
    pub const fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges as a closed loop
    pub fn segments(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Point {
        (self.a + self.b + self.c) / 3.0
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rectangle {
        bounds_of(&self.vertices())
    }

    /// Whether `point` lies inside or on the triangle
    pub fn contains_point(&self, point: Point) -> bool {
        contains_point(&self.vertices(), point)
    }
}

/// Simple polygon given by its vertices in order (either winding)
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Vertices; the last connects back to the first
    pub vertices: Vec<Point>,
}

impl Polygon {
    /// Create a new polygon
    pub fn new(vertices: impl Into<Vec<Point>>) -> Self {
        Self { vertices: vertices.into() }
    }

    /// Edges as a closed loop
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        segments(&self.vertices)
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rectangle {
        bounds_of(&self.vertices)
    }

    /// Whether `point` lies inside or on the polygon
    pub fn contains_point(&self, point: Point) -> bool {
        contains_point(&self.vertices, point)
    }

    /// Shoelace area, positive for clockwise winding in y-down screen space
    pub fn signed_area(&self) -> Real {
        segments(&self.vertices).map(|s| s.a.cross(s.b)).sum::<Real>() / 2.0
    }
}

/// Closed loop of edges over `vertices`
pub(crate) fn segments(vertices: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| Segment::new(vertices[i], vertices[(i + 1) % n]))
}

/// Smallest rectangle containing every vertex; empty input yields a zero rectangle
pub(crate) fn bounds_of(vertices: &[Point]) -> Rectangle {
    let Some(first) = vertices.first() else {
        return Rectangle::default();
    };
    let (min, max) = vertices.iter().fold((*first, *first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Rectangle::from_min_max(min, max)
}

/// Even-odd containment with the boundary counted as inside
pub(crate) fn contains_point(vertices: &[Point], point: Point) -> bool {
    if segments(vertices).any(|edge| Span::from(edge).contains_point(point)) {
        return true;
    }

    let mut inside = false;
    for edge in segments(vertices) {
        let (a, b) = (edge.a, edge.b);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
