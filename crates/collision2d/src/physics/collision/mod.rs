//! 2D collision geometry
//!
//! Shapes are stored in local space and moved into world space only while a
//! test runs, so the same shape serves every position an entity takes.
//!
//! # Module Organization
//!
//! - [`primitives`] - rectangles, circles, segments, rays and lines
//! - [`polygon`] - triangles and simple polygons
//! - [`shape`] - the [`Shape`] sum type and its bounds
//! - [`narrow_phase`] - exact pairwise overlap tests

pub mod primitives;
pub mod polygon;
pub mod shape;
pub mod narrow_phase;

// Re-export commonly used types
pub use primitives::{Circle, Line, Ray, Rectangle, Segment, UNBOUNDED_REACH};
pub use polygon::{Polygon, Triangle};
pub use shape::{bounds, GeometryError, Shape, ShapeKind};
pub use narrow_phase::{collide, collide_any_any};
