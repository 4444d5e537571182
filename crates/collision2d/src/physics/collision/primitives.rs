//! Primitive collision shapes and intersection algorithms
//!
//! Axis-aligned rectangles, circles and the three linear shapes (segment, ray,
//! line). Everything here is plain data in whatever frame the caller chooses;
//! colliders keep them in entity-local space and translate on demand.

use crate::foundation::math::{Point, Real};
use rand::Rng;

/// How far unbounded shapes (rays, lines) reach when reporting bounds
///
/// Keeps broad-phase arithmetic finite; `-inf + inf` would poison every
/// comparison with NaN.
pub const UNBOUNDED_REACH: Real = 1.0e9;

/// Axis-aligned rectangle: top-left position plus size
///
/// Extents are expected to be non-negative. Edge and centre setters move the
/// rectangle and never resize it.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x: Real,
    /// Top edge
    pub y: Real,
    /// Width
    pub w: Real,
    /// Height
    pub h: Real,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: Real, y: Real, w: Real, h: Real) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle spanning two corner points, in any order
    pub fn from_min_max(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Top-left position
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the rectangle so its top-left corner is at `position`
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Left edge
    pub const fn x_left(&self) -> Real {
        self.x
    }

    /// Right edge
    pub fn x_right(&self) -> Real {
        self.x + self.w
    }

    /// Top edge
    pub const fn y_top(&self) -> Real {
        self.y
    }

    /// Bottom edge
    pub fn y_bottom(&self) -> Real {
        self.y + self.h
    }

    /// Horizontal centre
    pub fn x_center(&self) -> Real {
        self.x + self.w / 2.0
    }

    /// Vertical centre
    pub fn y_center(&self) -> Real {
        self.y + self.h / 2.0
    }

    /// Geometric centre
    pub fn center(&self) -> Point {
        Point::new(self.x_center(), self.y_center())
    }

    /// Move so the left edge is at `x`
    pub fn set_x_left(&mut self, x: Real) {
        self.x = x;
    }

    /// Move so the right edge is at `x`
    pub fn set_x_right(&mut self, x: Real) {
        self.x = x - self.w;
    }

    /// Move so the top edge is at `y`
    pub fn set_y_top(&mut self, y: Real) {
        self.y = y;
    }

    /// Move so the bottom edge is at `y`
    pub fn set_y_bottom(&mut self, y: Real) {
        self.y = y - self.h;
    }

    /// Move so the horizontal centre is at `x`
    pub fn set_x_center(&mut self, x: Real) {
        self.x = x - self.w / 2.0;
    }

    /// Move so the vertical centre is at `y`
    pub fn set_y_center(&mut self, y: Real) {
        self.y = y - self.h / 2.0;
    }

    /// Move so the geometric centre is at `center`
    pub fn set_center(&mut self, center: Point) {
        self.set_x_center(center.x);
        self.set_y_center(center.y);
    }

    /// Top-left corner
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Top-right corner
    pub fn top_right(&self) -> Point {
        Point::new(self.x_right(), self.y)
    }

    /// Bottom-right corner
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x_right(), self.y_bottom())
    }

    /// Bottom-left corner
    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y_bottom())
    }

    /// Corners clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [self.top_left(), self.top_right(), self.bottom_right(), self.bottom_left()]
    }

    /// Same as [`Self::corners`]
    pub fn vertices(&self) -> [Point; 4] {
        self.corners()
    }

    /// Edges as consecutive corner pairs, closing back to the top-left
    pub fn segments(&self) -> [Segment; 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }

    /// Copy of this rectangle moved by `offset`
    pub fn offset(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn collides_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x_right()
            && point.y < self.y_bottom()
    }

    /// Strict AABB overlap; rectangles that only touch do not collide
    pub fn collides_rectangle(&self, other: &Self) -> bool {
        self.x + self.w > other.x
            && self.y + self.h > other.y
            && self.x < other.x + other.w
            && self.y < other.y + other.h
    }

    /// Exact test against a circle, with this rectangle rotated by `angle` radians
    ///
    /// With `is_centered` the rectangle's `(x, y)` is its centre and the pivot;
    /// otherwise `(x, y)` is the unrotated top-left corner and the rectangle
    /// rotates about its geometric centre.
    pub fn collides_circle(&self, circle: &Circle, angle: Real, is_centered: bool) -> bool {
        let pivot = if is_centered { self.position() } else { self.center() };

        // Bring the circle into the rectangle's unrotated frame.
        let circle_center = if angle == 0.0 {
            circle.center()
        } else {
            circle.center().rotated(-angle, pivot)
        };

        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;
        let dx = (circle_center.x - pivot.x).abs();
        let dy = (circle_center.y - pivot.y).abs();

        if dx > half_w + circle.r || dy > half_h + circle.r {
            return false;
        }
        if dx <= half_w || dy <= half_h {
            return true;
        }

        let corner_dx = dx - half_w;
        let corner_dy = dy - half_h;
        corner_dx * corner_dx + corner_dy * corner_dy <= circle.r * circle.r
    }

    /// Grow by `amount` on every side, keeping the centre fixed
    pub fn expand_from_center(&mut self, amount: Real) {
        self.x -= amount;
        self.w += 2.0 * amount;
        self.y -= amount;
        self.h += 2.0 * amount;
    }

    /// Copy grown by `amount` on every side
    pub fn expanded_from_center(&self, amount: Real) -> Self {
        let mut result = *self;
        result.expand_from_center(amount);
        result
    }

    /// Grow each half-extent by `half * scalar`, keeping the centre fixed
    ///
    /// `scalar = 1` doubles both dimensions.
    pub fn scale_from_center(&mut self, scalar: Real) {
        let w_amount = self.w / 2.0 * scalar;
        let h_amount = self.h / 2.0 * scalar;
        self.x -= w_amount;
        self.w += 2.0 * w_amount;
        self.y -= h_amount;
        self.h += 2.0 * h_amount;
    }

    /// Copy scaled about the centre, see [`Self::scale_from_center`]
    pub fn scaled_from_center(&self, scalar: Real) -> Self {
        let mut result = *self;
        result.scale_from_center(scalar);
        result
    }

    /// Uniformly sampled point in `[x, x + w) x [y, y + h)`
    pub fn random_point_inside<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::random_in_range(rng, self.top_left(), self.bottom_right())
    }
}

/// Circle given by centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Centre x
    pub x: Real,
    /// Centre y
    pub y: Real,
    /// Radius
    pub r: Real,
}

impl Circle {
    /// Create a new circle
    pub const fn new(x: Real, y: Real, r: Real) -> Self {
        Self { x, y, r }
    }

    /// Centre point
    pub const fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x - self.r, self.y - self.r, 2.0 * self.r, 2.0 * self.r)
    }

    /// Whether `point` lies inside or on the circle
    pub fn collides_point(&self, point: Point) -> bool {
        self.center().distance_squared(point) <= self.r * self.r
    }

    /// Whether two circles overlap or touch
    pub fn collides_circle(&self, other: &Self) -> bool {
        let reach = self.r + other.r;
        self.center().distance_squared(other.center()) <= reach * reach
    }
}

/// Finite segment from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Start point
    pub a: Point,
    /// End point
    pub b: Point,
}

impl Segment {
    /// Create a new segment
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Segment length
    pub fn length(&self) -> Real {
        self.a.distance(self.b)
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_min_max(self.a, self.b)
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: Point) -> Point {
        Span::from(*self).closest_point(point)
    }
}

/// Half-infinite ray starting at `a` and passing through `b`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Ray {
    /// Origin
    pub a: Point,
    /// Any other point on the ray, fixing its direction
    pub b: Point,
}

impl Ray {
    /// Create a new ray
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Direction from the origin (not normalised)
    pub fn direction(&self) -> Point {
        self.b - self.a
    }

    /// Bounds reaching [`UNBOUNDED_REACH`] along the ray's open direction
    pub fn bounds(&self) -> Rectangle {
        let d = self.direction();
        let reach = |origin: Real, dir: Real| {
            if dir > 0.0 {
                (origin, origin + UNBOUNDED_REACH)
            } else if dir < 0.0 {
                (origin - UNBOUNDED_REACH, origin)
            } else {
                (origin, origin)
            }
        };
        let (x0, x1) = reach(self.a.x, d.x);
        let (y0, y1) = reach(self.a.y, d.y);
        Rectangle::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Closest point on the ray to `point`
    pub fn closest_point(&self, point: Point) -> Point {
        Span::from(*self).closest_point(point)
    }
}

/// Infinite line through `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// A point on the line
    pub a: Point,
    /// A second, distinct point on the line
    pub b: Point,
}

impl Line {
    /// Create a new line
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Bounds reaching [`UNBOUNDED_REACH`] both ways along any axis the line moves on
    pub fn bounds(&self) -> Rectangle {
        let d = self.b - self.a;
        let (x, w) = if d.x == 0.0 {
            (self.a.x, 0.0)
        } else {
            (self.a.x - UNBOUNDED_REACH, 2.0 * UNBOUNDED_REACH)
        };
        let (y, h) = if d.y == 0.0 {
            (self.a.y, 0.0)
        } else {
            (self.a.y - UNBOUNDED_REACH, 2.0 * UNBOUNDED_REACH)
        };
        Rectangle::new(x, y, w, h)
    }

    /// Closest point on the line to `point`
    pub fn closest_point(&self, point: Point) -> Point {
        Span::from(*self).closest_point(point)
    }
}

/// Parametric form `origin + t * dir`, `t` in `[t_min, t_max]`, shared by the
/// linear shapes
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    pub origin: Point,
    pub dir: Point,
    pub t_min: Real,
    pub t_max: Real,
}

impl From<Segment> for Span {
    fn from(s: Segment) -> Self {
        Self { origin: s.a, dir: s.b - s.a, t_min: 0.0, t_max: 1.0 }
    }
}

impl From<Ray> for Span {
    fn from(r: Ray) -> Self {
        Self { origin: r.a, dir: r.b - r.a, t_min: 0.0, t_max: Real::INFINITY }
    }
}

impl From<Line> for Span {
    fn from(l: Line) -> Self {
        Self { origin: l.a, dir: l.b - l.a, t_min: Real::NEG_INFINITY, t_max: Real::INFINITY }
    }
}

impl Span {
    fn is_point(&self) -> bool {
        self.dir.x == 0.0 && self.dir.y == 0.0
    }

    fn covers(&self, t: Real) -> bool {
        t >= self.t_min && t <= self.t_max
    }

    /// Closest point of the span to `point`
    pub fn closest_point(&self, point: Point) -> Point {
        if self.is_point() {
            return self.origin;
        }
        let t = (point - self.origin).dot(self.dir) / self.dir.length_squared();
        self.origin + self.dir * t.clamp(self.t_min, self.t_max)
    }

    /// Whether `point` lies exactly on the span
    pub fn contains_point(&self, point: Point) -> bool {
        if self.is_point() {
            return point == self.origin;
        }
        let rel = point - self.origin;
        rel.cross(self.dir) == 0.0 && self.covers(rel.dot(self.dir) / self.dir.length_squared())
    }

    /// Whether two spans share at least one point
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_point() {
            return other.contains_point(self.origin);
        }
        if other.is_point() {
            return self.contains_point(other.origin);
        }

        let between = other.origin - self.origin;
        let denom = self.dir.cross(other.dir);

        if denom != 0.0 {
            let t = between.cross(other.dir) / denom;
            let u = between.cross(self.dir) / denom;
            return self.covers(t) && other.covers(u);
        }

        if between.cross(self.dir) != 0.0 {
            // Parallel, on different lines.
            return false;
        }

        // Collinear: map the other span's parameter range onto this one.
        let len_sq = self.dir.length_squared();
        let t0 = between.dot(self.dir) / len_sq;
        let k = other.dir.dot(self.dir) / len_sq;
        let (lo, hi) = {
            let p = t0 + k * other.t_min;
            let q = t0 + k * other.t_max;
            if p <= q { (p, q) } else { (q, p) }
        };
        lo <= self.t_max && hi >= self.t_min
    }
}
