//! Collider queries through a candidate source other than the world
//!
//! Stands in for a future spatial index: the facade decides enumeration
//! order, the collider contract stays the same.

use crate::ecs::{Collider, ColliderRef, EntityState, World};
use crate::foundation::collections::{ColliderId, Entity};
use crate::foundation::math::Point;
use crate::physics::collision::{Circle, Rectangle};
use crate::spatial::ColliderQuery;

/// Enumerates the world's colliders back to front
struct ReversedScan<'a> {
    world: &'a World,
    order: Vec<ColliderId>,
}

impl<'a> ReversedScan<'a> {
    fn new(world: &'a World) -> Self {
        let mut order = Vec::with_capacity(world.collider_count());
        world.for_each_collider(&mut |id, _| order.push(id));
        order.reverse();
        Self { world, order }
    }
}

impl ColliderQuery for ReversedScan<'_> {
    fn entity_state(&self, entity: Entity) -> Option<EntityState> {
        self.world.entity_state(entity)
    }

    fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.world.collider(id)
    }

    fn first_collider(
        &self,
        predicate: &mut dyn FnMut(ColliderId, &Collider) -> bool,
    ) -> Option<ColliderId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.world.collider(*id).is_some_and(|c| predicate(*id, c)))
    }

    fn for_each_collider(&self, callback: &mut dyn FnMut(ColliderId, &Collider)) {
        for id in &self.order {
            if let Some(collider) = self.world.collider(*id) {
                callback(*id, collider);
            }
        }
    }
}

/// Hides every entity, so any candidate lookup fails
struct Orphaned<'a>(&'a World);

impl ColliderQuery for Orphaned<'_> {
    fn entity_state(&self, _entity: Entity) -> Option<EntityState> {
        None
    }

    fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.0.collider(id)
    }

    fn first_collider(
        &self,
        predicate: &mut dyn FnMut(ColliderId, &Collider) -> bool,
    ) -> Option<ColliderId> {
        self.0.first_collider(predicate)
    }

    fn for_each_collider(&self, callback: &mut dyn FnMut(ColliderId, &Collider)) {
        self.0.for_each_collider(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::CollisionError;

    /// One query collider and three overlapping targets, in insertion order
    fn crowded_world() -> (World, ColliderId, Vec<ColliderId>) {
        let mut world = World::new();
        let me = world.spawn(Point::ZERO);
        let query = world.add_collider(me, 0, Rectangle::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let targets = (0..3_i32)
            .map(|i| {
                let entity = world.spawn(Point::new(2.0 + f64::from(i), 2.0));
                world.add_collider(entity, 1, Circle::new(0.0, 0.0, 1.0)).unwrap()
            })
            .collect();
        (world, query, targets)
    }

    #[test]
    fn test_order_follows_the_facade() {
        let (world, query, targets) = crowded_world();

        let forward = world.collider_ref(query).unwrap();
        assert_eq!(forward.first_collision(1, Point::ZERO).unwrap(), Some(targets[0]));
        assert_eq!(forward.all_collisions(1, Point::ZERO).unwrap(), targets);

        let reversed = ReversedScan::new(&world);
        let backward = ColliderRef::new(&reversed, query).unwrap();
        let mut expected = targets.clone();
        expected.reverse();
        assert_eq!(backward.first_collision(1, Point::ZERO).unwrap(), Some(targets[2]));
        assert_eq!(backward.all_collisions(1, Point::ZERO).unwrap(), expected);
    }

    #[test]
    fn test_results_agree_as_sets() {
        let (world, query, _) = crowded_world();
        let reversed = ReversedScan::new(&world);

        let mut forward = world
            .collider_ref(query)
            .unwrap()
            .all_bounds_collisions(1, Point::new(-4.0, 0.0))
            .unwrap();
        let mut backward = ColliderRef::new(&reversed, query)
            .unwrap()
            .all_bounds_collisions(1, Point::new(-4.0, 0.0))
            .unwrap();
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_missing_entity_surfaces_as_error() {
        let (world, query, _) = crowded_world();
        let orphaned = Orphaned(&world);
        let result = ColliderRef::new(&orphaned, query);
        assert!(matches!(result, Err(CollisionError::MissingEntity(_))));
    }

    #[test]
    fn test_candidate_lookup_failure_stops_the_scan() {
        /// Reports the query collider's entity but no other
        struct OnlyOwner<'a> {
            world: &'a World,
            owner: Entity,
        }

        impl ColliderQuery for OnlyOwner<'_> {
            fn entity_state(&self, entity: Entity) -> Option<EntityState> {
                (entity == self.owner).then(|| self.world.entity_state(entity)).flatten()
            }

            fn collider(&self, id: ColliderId) -> Option<&Collider> {
                self.world.collider(id)
            }

            fn first_collider(
                &self,
                predicate: &mut dyn FnMut(ColliderId, &Collider) -> bool,
            ) -> Option<ColliderId> {
                self.world.first_collider(predicate)
            }

            fn for_each_collider(&self, callback: &mut dyn FnMut(ColliderId, &Collider)) {
                self.world.for_each_collider(callback);
            }
        }

        let (world, query, targets) = crowded_world();
        let owner = world.collider(query).unwrap().entity();
        let facade = OnlyOwner { world: &world, owner };
        let collider = ColliderRef::new(&facade, query).unwrap();

        let missing = world.collider(targets[0]).unwrap().entity();
        assert_eq!(
            collider.first_collision(1, Point::ZERO).unwrap_err(),
            CollisionError::MissingEntity(missing)
        );
        assert_eq!(
            collider.all_collisions(1, Point::ZERO).unwrap_err(),
            CollisionError::MissingEntity(missing)
        );
        // Mask-rejected candidates are never looked up
        assert!(collider.all_collisions(0b10, Point::ZERO).unwrap().is_empty());
    }
}
