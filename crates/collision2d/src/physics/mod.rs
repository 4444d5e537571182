//! Physics module for collision detection
//!
//! Provides the 2D shape set, the narrow-phase dispatcher and collision
//! layer masks used by collider queries.

pub mod collision;
pub mod collision_layers;

pub use collision::{
    Circle,
    GeometryError,
    Line,
    Polygon,
    Ray,
    Rectangle,
    Segment,
    Shape,
    ShapeKind,
    Triangle,
};
pub use collision_layers::{CollisionLayers, Mask};
