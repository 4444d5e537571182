//! Abstract candidate source for collider queries
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.2:
//! "The broad phase quickly identifies pairs of objects that might be
//! colliding." Here the facade only has to enumerate colliders; the collider
//! applies mask, bounds and shape filtering itself.

use crate::ecs::components::Collider;
use crate::ecs::entity::EntityState;
use crate::foundation::collections::{ColliderId, Entity};

/// Container that lets a collider enumerate the other colliders and read
/// entity state
///
/// Implementations must enumerate in an order that is stable for the duration
/// of one call. Callbacks must not mutate the population being enumerated;
/// holding `&self` for the whole call enforces that for safe code.
pub trait ColliderQuery {
    /// Current position and active flag of `entity`, `None` once it is gone
    fn entity_state(&self, entity: Entity) -> Option<EntityState>;

    /// Look up a collider by handle
    fn collider(&self, id: ColliderId) -> Option<&Collider>;

    /// First collider, in enumeration order, for which `predicate` holds
    ///
    /// Stops at the first match. Self-exclusion is the predicate's job.
    fn first_collider(
        &self,
        predicate: &mut dyn FnMut(ColliderId, &Collider) -> bool,
    ) -> Option<ColliderId>;

    /// Invoke `callback` once per collider, in enumeration order
    fn for_each_collider(&self, callback: &mut dyn FnMut(ColliderId, &Collider));
}
