//! Entity implementation

use crate::foundation::math::Point;

pub use crate::foundation::collections::Entity;

/// Entity data colliders read on every query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityState {
    /// World position; collider geometry is local to it
    pub position: Point,
    /// Inactive entities are skipped by activity-aware tests
    pub active: bool,
}

impl EntityState {
    /// Active entity at `position`
    pub const fn new(position: Point) -> Self {
        Self { position, active: true }
    }
}
