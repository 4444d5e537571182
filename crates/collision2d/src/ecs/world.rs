//! ECS World implementation
//!
//! Owns entities and their collider components. Queries against the world are
//! a linear scan over colliders in slot order.

use super::components::{Collider, ColliderRef};
use super::entity::{Entity, EntityState};
use crate::config::CollisionConfig;
use crate::foundation::collections::{ColliderId, ColliderMap, EntityMap};
use crate::foundation::math::Point;
use crate::physics::collision::{GeometryError, Shape};
use crate::physics::collision_layers::Mask;
use crate::spatial::ColliderQuery;
use thiserror::Error;

/// Errors raised by collider queries and world bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// Invalid shape or shape pair
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The entity handle no longer refers to a live entity
    #[error("entity {0:?} does not exist")]
    MissingEntity(Entity),

    /// The collider handle no longer refers to a live collider
    #[error("collider {0:?} does not exist")]
    MissingCollider(ColliderId),
}

#[derive(Debug)]
struct EntityRecord {
    state: EntityState,
    colliders: Vec<ColliderId>,
}

/// ECS World containing all entities and colliders
#[derive(Debug, Default)]
pub struct World {
    entities: EntityMap<EntityRecord>,
    colliders: ColliderMap<Collider>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world sized from `config`
    pub fn with_config(config: &CollisionConfig) -> Self {
        Self {
            entities: EntityMap::with_capacity_and_key(config.initial_entity_capacity),
            colliders: ColliderMap::with_capacity_and_key(config.initial_collider_capacity),
        }
    }

    /// Create a new active entity at `position`
    pub fn spawn(&mut self, position: Point) -> Entity {
        let entity = self.entities.insert(EntityRecord {
            state: EntityState::new(position),
            colliders: Vec::new(),
        });
        log::debug!("Spawned entity {:?} at {:?}", entity, position);
        entity
    }

    /// Remove an entity and every collider attached to it
    pub fn despawn(&mut self, entity: Entity) -> Result<(), CollisionError> {
        let record = self
            .entities
            .remove(entity)
            .ok_or(CollisionError::MissingEntity(entity))?;
        for id in &record.colliders {
            self.colliders.remove(*id);
        }
        log::debug!(
            "Despawned entity {:?} with {} collider(s)",
            entity,
            record.colliders.len()
        );
        Ok(())
    }

    /// Whether `entity` is still alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Current world position of `entity`
    pub fn position(&self, entity: Entity) -> Option<Point> {
        self.entities.get(entity).map(|r| r.state.position)
    }

    /// Move `entity` to `position`
    pub fn set_position(&mut self, entity: Entity, position: Point) -> Result<(), CollisionError> {
        self.record_mut(entity)?.state.position = position;
        Ok(())
    }

    /// Move `entity` by `delta`
    pub fn translate(&mut self, entity: Entity, delta: Point) -> Result<(), CollisionError> {
        self.record_mut(entity)?.state.position += delta;
        Ok(())
    }

    /// Whether `entity` is active; `None` once it is gone
    pub fn is_active(&self, entity: Entity) -> Option<bool> {
        self.entities.get(entity).map(|r| r.state.active)
    }

    /// Activate or deactivate `entity`
    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<(), CollisionError> {
        self.record_mut(entity)?.state.active = active;
        Ok(())
    }

    /// Attach a collider with `mask` and local-space `shape` to `entity`
    ///
    /// Degenerate shapes are rejected here, so a live collider always has
    /// usable bounds.
    pub fn add_collider(
        &mut self,
        entity: Entity,
        mask: Mask,
        shape: impl Into<Shape>,
    ) -> Result<ColliderId, CollisionError> {
        if !self.entities.contains_key(entity) {
            return Err(CollisionError::MissingEntity(entity));
        }

        let shape = shape.into();
        let collider = Collider::new(entity, mask, shape).map_err(|e| {
            log::warn!("Rejected collider for entity {:?}: {}", entity, e);
            e
        })?;

        let kind = collider.shape_local().kind();
        let id = self.colliders.insert(collider);
        self.record_mut(entity)?.colliders.push(id);
        log::debug!("Attached {} collider {:?} (mask {:#x}) to {:?}", kind, id, mask, entity);
        Ok(id)
    }

    /// Detach and return a collider
    pub fn remove_collider(&mut self, id: ColliderId) -> Result<Collider, CollisionError> {
        let collider = self
            .colliders
            .remove(id)
            .ok_or(CollisionError::MissingCollider(id))?;
        if let Some(record) = self.entities.get_mut(collider.entity()) {
            record.colliders.retain(|c| *c != id);
        }
        log::debug!("Detached collider {:?} from {:?}", id, collider.entity());
        Ok(collider)
    }

    /// Look up a collider
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    /// Look up a collider for mutation (mask, active flag)
    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.get_mut(id)
    }

    /// Colliders attached to `entity`, in attachment order
    pub fn colliders_of(&self, entity: Entity) -> &[ColliderId] {
        self.entities
            .get(entity)
            .map(|r| r.colliders.as_slice())
            .unwrap_or(&[])
    }

    /// Query view of a collider bound to this world
    pub fn collider_ref(&self, id: ColliderId) -> Result<ColliderRef<'_>, CollisionError> {
        ColliderRef::new(self, id)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of live colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn record_mut(&mut self, entity: Entity) -> Result<&mut EntityRecord, CollisionError> {
        self.entities
            .get_mut(entity)
            .ok_or(CollisionError::MissingEntity(entity))
    }
}

impl ColliderQuery for World {
    fn entity_state(&self, entity: Entity) -> Option<EntityState> {
        self.entities.get(entity).map(|r| r.state)
    }

    fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    fn first_collider(
        &self,
        predicate: &mut dyn FnMut(ColliderId, &Collider) -> bool,
    ) -> Option<ColliderId> {
        self.colliders
            .iter()
            .find(|(id, collider)| predicate(*id, collider))
            .map(|(id, _)| id)
    }

    fn for_each_collider(&self, callback: &mut dyn FnMut(ColliderId, &Collider)) {
        for (id, collider) in &self.colliders {
            callback(id, collider);
        }
    }
}
