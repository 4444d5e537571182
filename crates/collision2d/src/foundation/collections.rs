//! Specialized collection types
//!
//! Entities and colliders are addressed through generational slot-map keys, so a
//! stale handle to a despawned entity is detected instead of aliasing a new one.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Non-owning handle to an entity in a [`World`](crate::ecs::World)
    pub struct Entity;

    /// Non-owning handle to a collider component in a [`World`](crate::ecs::World)
    pub struct ColliderId;
}

/// Slot map keyed by [`Entity`]
pub type EntityMap<T> = SlotMap<Entity, T>;

/// Slot map keyed by [`ColliderId`]
pub type ColliderMap<T> = SlotMap<ColliderId, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_entity_handle_is_rejected() {
        let mut entities: EntityMap<u32> = EntityMap::with_key();
        let first = entities.insert(1);
        entities.remove(first);
        let second = entities.insert(2);

        assert!(entities.get(first).is_none());
        assert_eq!(entities.get(second), Some(&2));
    }
}
