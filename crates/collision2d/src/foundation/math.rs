//! Math utilities and types
//!
//! Provides the 2D scalar and point types every collision primitive is built on.
//! Heavy lifting (rotations, vector algebra) is delegated to nalgebra; [`Point`]
//! is a thin, mutable `{x, y}` value that converts to and from nalgebra types.

use rand::Rng;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use nalgebra::{Rotation2, Vector2};

/// Scalar type used for all world and local coordinates
pub type Real = f64;

/// 2D vector type
pub type Vec2 = Vector2<Real>;

/// 2D nalgebra point type
pub type Point2 = nalgebra::Point2<Real>;

/// A mutable 2D point / displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: Real,
    /// Vertical coordinate (grows downwards in screen space)
    pub y: Real,
}

impl Point {
    /// The origin
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit scale on both axes
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Create a new point
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors
    pub fn dot(self, other: Self) -> Real {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product, treating both points as vectors
    pub fn cross(self, other: Self) -> Real {
        self.x * other.y - self.y * other.x
    }

    /// Squared length of this point as a vector
    pub fn length_squared(self) -> Real {
        self.dot(self)
    }

    /// Length of this point as a vector
    pub fn length(self) -> Real {
        self.to_vector().norm()
    }

    /// Distance to another point
    pub fn distance(self, other: Self) -> Real {
        (other - self).length()
    }

    /// Squared distance to another point
    pub fn distance_squared(self, other: Self) -> Real {
        (other - self).length_squared()
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns this point rotated by `angle` radians about `pivot`
    pub fn rotated(self, angle: Real, pivot: Self) -> Self {
        let rotation = Rotation2::new(angle);
        pivot + Self::from(rotation * (self - pivot).to_vector())
    }

    /// Rotates this point in place by `angle` radians about `pivot`
    pub fn rotate(&mut self, angle: Real, pivot: Self) {
        *self = self.rotated(angle, pivot);
    }

    /// Samples a point uniformly from `[min.x, max.x) x [min.y, max.y)`
    ///
    /// A degenerate axis (`min == max`) yields that exact coordinate.
    pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: Self, max: Self) -> Self {
        Self::new(
            min.x + rng.gen::<Real>() * (max.x - min.x),
            min.y + rng.gen::<Real>() * (max.y - min.y),
        )
    }

    /// Convert to an nalgebra vector
    pub fn to_vector(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2> for Point {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for Point2 {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Real> for Point {
    type Output = Self;
    fn mul(self, rhs: Real) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<Real> for Point {
    type Output = Self;
    fn div(self, rhs: Real) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<Real> for Point {
    fn mul_assign(&mut self, rhs: Real) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<Real> for Point {
    fn div_assign(&mut self, rhs: Real) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

/// Math constants
pub mod constants {
    use super::Real;

    /// Pi constant
    pub const PI: Real = std::f64::consts::PI;

    /// Pi / 2
    pub const HALF_PI: Real = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: Real = PI * 0.25;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_point_arithmetic() {
        let mut p = Point::new(1.0, 2.0) + Point::new(3.0, -1.0);
        assert_eq!(p, Point::new(4.0, 1.0));

        p -= Point::ONE;
        assert_eq!(p, Point::new(3.0, 0.0));

        p *= 2.0;
        assert_eq!(p, Point::new(6.0, 0.0));
        assert_eq!(-p / 3.0, Point::new(-2.0, 0.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_rotation_about_pivot() {
        let pivot = Point::new(1.0, 1.0);
        let rotated = Point::new(2.0, 1.0).rotated(constants::HALF_PI, pivot);
        assert_relative_eq!(rotated.to_vector(), Vec2::new(1.0, 2.0), epsilon = 1e-12);

        let mut p = Point::new(2.0, 1.0);
        p.rotate(constants::PI, pivot);
        assert_relative_eq!(p.to_vector(), Vec2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_random_in_range_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = Point::new(-5.0, 10.0);
        let max = Point::new(5.0, 12.0);
        for _ in 0..500 {
            let p = Point::random_in_range(&mut rng, min, max);
            assert!(p.x >= min.x && p.x < max.x);
            assert!(p.y >= min.y && p.y < max.y);
        }
    }

    #[test]
    fn test_nalgebra_roundtrip() {
        let p = Point::new(-2.5, 8.0);
        let q: Point2 = p.into();
        assert_eq!(Point::from(q), p);
    }
}
