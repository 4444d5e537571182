//! High-level collision shape abstractions
//!
//! [`Shape`] is the closed set of geometry a collider can carry. Shapes are
//! stored in the owning entity's local space and translated to world space
//! only while a test runs.

use super::polygon::{Polygon, Triangle};
use super::primitives::{Circle, Line, Ray, Rectangle, Segment};
use crate::foundation::math::Point;
use std::fmt;

/// Collision shape (stored in LOCAL SPACE)
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle
    Rectangle(Rectangle),
    /// Circle
    Circle(Circle),
    /// Triangle
    Triangle(Triangle),
    /// Finite segment
    Segment(Segment),
    /// Half-infinite ray
    Ray(Ray),
    /// Infinite line
    Line(Line),
    /// Simple polygon
    Polygon(Polygon),
}

/// Variant tag of a [`Shape`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// [`Shape::Rectangle`]
    Rectangle,
    /// [`Shape::Circle`]
    Circle,
    /// [`Shape::Triangle`]
    Triangle,
    /// [`Shape::Segment`]
    Segment,
    /// [`Shape::Ray`]
    Ray,
    /// [`Shape::Line`]
    Line,
    /// [`Shape::Polygon`]
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Segment => "segment",
            Self::Ray => "ray",
            Self::Line => "line",
            Self::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Geometry errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// No narrow-phase rule exists for this pair of shape kinds
    #[error("no collision rule for {a} vs {b}")]
    UnsupportedPair {
        /// Kind of the first shape
        a: ShapeKind,
        /// Kind of the second shape
        b: ShapeKind,
    },

    /// Shape data cannot describe real geometry
    #[error("degenerate {kind}: {reason}")]
    Degenerate {
        /// Kind of the rejected shape
        kind: ShapeKind,
        /// What is wrong with it
        reason: &'static str,
    },
}

impl Shape {
    /// Variant tag
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Triangle(_) => ShapeKind::Triangle,
            Self::Segment(_) => ShapeKind::Segment,
            Self::Ray(_) => ShapeKind::Ray,
            Self::Line(_) => ShapeKind::Line,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Check the shape describes usable geometry
    ///
    /// Rejects non-finite coordinates, negative extents, a radius that is not
    /// positive, rays and lines without a direction, and polygons with fewer
    /// than three vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let degenerate = |reason| Err(GeometryError::Degenerate { kind: self.kind(), reason });
        let all_finite = |points: &[Point]| points.iter().all(|p| p.is_finite());

        match self {
            Self::Rectangle(r) => {
                if !(r.x.is_finite() && r.y.is_finite() && r.w.is_finite() && r.h.is_finite()) {
                    return degenerate("non-finite coordinate");
                }
                if r.w < 0.0 || r.h < 0.0 {
                    return degenerate("negative extent");
                }
            }
            Self::Circle(c) => {
                if !(c.x.is_finite() && c.y.is_finite() && c.r.is_finite()) {
                    return degenerate("non-finite coordinate");
                }
                if c.r <= 0.0 {
                    return degenerate("non-positive radius");
                }
            }
            Self::Triangle(t) => {
                if !all_finite(&t.vertices()) {
                    return degenerate("non-finite coordinate");
                }
            }
            Self::Segment(s) => {
                if !all_finite(&[s.a, s.b]) {
                    return degenerate("non-finite coordinate");
                }
            }
            Self::Ray(Ray { a, b }) | Self::Line(Line { a, b }) => {
                if !all_finite(&[*a, *b]) {
                    return degenerate("non-finite coordinate");
                }
                if a == b {
                    return degenerate("defining points coincide");
                }
            }
            Self::Polygon(p) => {
                if p.vertices.len() < 3 {
                    return degenerate("fewer than three vertices");
                }
                if !all_finite(&p.vertices) {
                    return degenerate("non-finite coordinate");
                }
            }
        }
        Ok(())
    }

    /// Tightest axis-aligned bounds in the shape's own frame
    ///
    /// Rays and lines reach [`UNBOUNDED_REACH`](super::primitives::UNBOUNDED_REACH)
    /// along their open directions.
    pub fn bounds(&self) -> Result<Rectangle, GeometryError> {
        self.validate()?;
        Ok(match self {
            Self::Rectangle(r) => *r,
            Self::Circle(c) => c.bounds(),
            Self::Triangle(t) => t.bounds(),
            Self::Segment(s) => s.bounds(),
            Self::Ray(r) => r.bounds(),
            Self::Line(l) => l.bounds(),
            Self::Polygon(p) => p.bounds(),
        })
    }

    /// Copy of this shape moved by `offset`
    pub fn translated(&self, offset: Point) -> Self {
        match self {
            Self::Rectangle(r) => Self::Rectangle(r.offset(offset)),
            Self::Circle(c) => Self::Circle(Circle::new(c.x + offset.x, c.y + offset.y, c.r)),
            Self::Triangle(t) => {
                Self::Triangle(Triangle::new(t.a + offset, t.b + offset, t.c + offset))
            }
            Self::Segment(s) => Self::Segment(Segment::new(s.a + offset, s.b + offset)),
            Self::Ray(r) => Self::Ray(Ray::new(r.a + offset, r.b + offset)),
            Self::Line(l) => Self::Line(Line::new(l.a + offset, l.b + offset)),
            Self::Polygon(p) => {
                let vertices: Vec<Point> = p.vertices.iter().map(|v| *v + offset).collect();
                Self::Polygon(Polygon::new(vertices))
            }
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Self::Rectangle(r)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Self::Triangle(t)
    }
}

impl From<Segment> for Shape {
    fn from(s: Segment) -> Self {
        Self::Segment(s)
    }
}

impl From<Ray> for Shape {
    fn from(r: Ray) -> Self {
        Self::Ray(r)
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

/// Axis-aligned bounds of `shape` in its own frame
pub fn bounds(shape: &Shape) -> Result<Rectangle, GeometryError> {
    shape.bounds()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_per_variant() {
        let circle = Shape::from(Circle::new(1.0, 2.0, 3.0));
        assert_eq!(circle.bounds().unwrap(), Rectangle::new(-2.0, -1.0, 6.0, 6.0));

        let rect = Rectangle::new(1.0, 1.0, 2.0, 5.0);
        assert_eq!(bounds(&rect.into()).unwrap(), rect);

        let segment = Shape::from(Segment::new(Point::new(4.0, 0.0), Point::new(1.0, 2.0)));
        assert_eq!(segment.bounds().unwrap(), Rectangle::new(1.0, 0.0, 3.0, 2.0));

        let polygon = Shape::from(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, -1.0),
            Point::new(2.0, 4.0),
        ]));
        assert_eq!(polygon.bounds().unwrap(), Rectangle::new(0.0, -1.0, 3.0, 5.0));
    }

    #[test]
    fn test_degenerate_shapes_are_rejected() {
        let cases: Vec<(Shape, ShapeKind)> = vec![
            (Circle::new(0.0, 0.0, -1.0).into(), ShapeKind::Circle),
            (Rectangle::new(0.0, 0.0, -1.0, 1.0).into(), ShapeKind::Rectangle),
            (Rectangle::new(f64::NAN, 0.0, 1.0, 1.0).into(), ShapeKind::Rectangle),
            (Ray::new(Point::ONE, Point::ONE).into(), ShapeKind::Ray),
            (Line::new(Point::ZERO, Point::ZERO).into(), ShapeKind::Line),
            (Polygon::new(vec![Point::ZERO, Point::ONE]).into(), ShapeKind::Polygon),
        ];

        for (shape, kind) in cases {
            match shape.bounds() {
                Err(GeometryError::Degenerate { kind: got, .. }) => assert_eq!(got, kind),
                other => panic!("expected degenerate {kind}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_radius_circle_is_rejected() {
        assert_eq!(
            Shape::from(Circle::new(5.0, 5.0, 0.0)).validate(),
            Err(GeometryError::Degenerate {
                kind: ShapeKind::Circle,
                reason: "non-positive radius",
            })
        );
        assert!(Shape::from(Circle::new(5.0, 5.0, f64::MIN_POSITIVE)).validate().is_ok());
        assert!(Shape::from(Segment::new(Point::ONE, Point::ONE)).validate().is_ok());
    }

    #[test]
    fn test_translated_moves_every_vertex() {
        let tri = Shape::from(Triangle::new(
            Point::ZERO,
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ));
        let moved = tri.translated(Point::new(5.0, -2.0));
        assert_eq!(
            moved,
            Shape::from(Triangle::new(
                Point::new(5.0, -2.0),
                Point::new(6.0, -2.0),
                Point::new(5.0, -1.0),
            ))
        );
        assert_eq!(moved.bounds().unwrap().w, tri.bounds().unwrap().w);
    }

    #[test]
    fn test_error_message_names_kinds() {
        let err = GeometryError::UnsupportedPair { a: ShapeKind::Ray, b: ShapeKind::Polygon };
        assert_eq!(err.to_string(), "no collision rule for ray vs polygon");
    }
}
