//! Narrow-phase shape dispatcher
//!
//! Exact overlap tests between any two [`Shape`]s. The seven variants fold into
//! four forms (box, round, linear, polygonal) so the 28 unordered variant
//! pairs share ten implementations; the match over form pairs is checked for
//! exhaustiveness at compile time.

use super::polygon;
use super::primitives::{Circle, Rectangle, Span};
use super::shape::{GeometryError, Shape};
use crate::foundation::math::Point;
use std::borrow::Cow;

/// How a shape takes part in narrow-phase tests
enum Form<'a> {
    Aabb(&'a Rectangle),
    Round(&'a Circle),
    Linear(Span),
    Polygonal(Cow<'a, [Point]>),
}

fn form(shape: &Shape) -> Form<'_> {
    match shape {
        Shape::Rectangle(r) => Form::Aabb(r),
        Shape::Circle(c) => Form::Round(c),
        Shape::Segment(s) => Form::Linear(Span::from(*s)),
        Shape::Ray(r) => Form::Linear(Span::from(*r)),
        Shape::Line(l) => Form::Linear(Span::from(*l)),
        Shape::Triangle(t) => Form::Polygonal(Cow::Owned(t.vertices().to_vec())),
        Shape::Polygon(p) => Form::Polygonal(Cow::Borrowed(&p.vertices)),
    }
}

/// Whether `a` placed at `offset_a` overlaps `b` placed at `offset_b`
///
/// Both shapes are given in their local frames; each is translated by its own
/// offset (an entity position, or a hypothetical one) before testing.
/// Degenerate shapes are reported as errors, never as "no collision".
pub fn collide_any_any(
    a: &Shape,
    b: &Shape,
    offset_a: Point,
    offset_b: Point,
) -> Result<bool, GeometryError> {
    a.validate()?;
    b.validate()?;

    let a = a.translated(offset_a);
    let b = b.translated(offset_b);
    Ok(collide_forms(form(&a), form(&b)))
}

/// Whether two world-space shapes overlap
pub fn collide(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    collide_any_any(a, b, Point::ZERO, Point::ZERO)
}

fn collide_forms(a: Form<'_>, b: Form<'_>) -> bool {
    match (a, b) {
        (Form::Aabb(a), Form::Aabb(b)) => a.collides_rectangle(b),
        (Form::Aabb(r), Form::Round(c)) | (Form::Round(c), Form::Aabb(r)) => {
            r.collides_circle(c, 0.0, false)
        }
        (Form::Aabb(r), Form::Linear(s)) | (Form::Linear(s), Form::Aabb(r)) => {
            polygon_span(&r.corners(), &s)
        }
        (Form::Aabb(r), Form::Polygonal(p)) | (Form::Polygonal(p), Form::Aabb(r)) => {
            polygon_polygon(&r.corners(), &p)
        }
        (Form::Round(a), Form::Round(b)) => a.collides_circle(b),
        (Form::Round(c), Form::Linear(s)) | (Form::Linear(s), Form::Round(c)) => {
            c.collides_point(s.closest_point(c.center()))
        }
        (Form::Round(c), Form::Polygonal(p)) | (Form::Polygonal(p), Form::Round(c)) => {
            circle_polygon(c, &p)
        }
        (Form::Linear(a), Form::Linear(b)) => a.intersects(&b),
        (Form::Linear(s), Form::Polygonal(p)) | (Form::Polygonal(p), Form::Linear(s)) => {
            polygon_span(&p, &s)
        }
        (Form::Polygonal(a), Form::Polygonal(b)) => polygon_polygon(&a, &b),
    }
}

fn circle_polygon(circle: &Circle, vertices: &[Point]) -> bool {
    let center = circle.center();
    polygon::contains_point(vertices, center)
        || polygon::segments(vertices)
            .any(|edge| circle.collides_point(Span::from(edge).closest_point(center)))
}

/// A linear shape that crosses no edge can only overlap the polygon by lying
/// inside it, and then its anchor point is inside too.
fn polygon_span(vertices: &[Point], span: &Span) -> bool {
    polygon::segments(vertices).any(|edge| Span::from(edge).intersects(span))
        || polygon::contains_point(vertices, span.origin)
}

/// Without crossing edges, one polygon is either disjoint from the other or
/// wholly inside it, so a single vertex settles containment.
fn polygon_polygon(a: &[Point], b: &[Point]) -> bool {
    let edges_cross = polygon::segments(a).any(|ea| {
        let ea = Span::from(ea);
        polygon::segments(b).any(|eb| ea.intersects(&Span::from(eb)))
    });
    edges_cross
        || b.first().is_some_and(|v| polygon::contains_point(a, *v))
        || a.first().is_some_and(|v| polygon::contains_point(b, *v))
}
