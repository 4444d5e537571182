//! Collision detection components for ECS
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3: Collision Detection System
//! - Section 16.2: Component-based architecture
//!
//! A [`Collider`] is plain data owned by the world. Queries run through a
//! [`ColliderRef`], which pairs a collider with its handle and the facade it
//! lives in so it can enumerate the others.

use crate::ecs::entity::{Entity, EntityState};
use crate::ecs::world::CollisionError;
use crate::foundation::collections::ColliderId;
use crate::foundation::math::{Point, Real};
use crate::physics::collision::{collide_any_any, GeometryError, Rectangle, Shape};
use crate::physics::collision_layers::{CollisionLayers, Mask};
use crate::spatial::ColliderQuery;
use std::fmt;

/// Component that gives an entity a collision shape
///
/// Following GEA Section 16.2's component-based architecture, the shape is
/// stored in the owning entity's local frame; world-space geometry is derived
/// from the entity's live position on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// Category bits of this collider; see GEA 13.3.8 collision filtering
    mask: Mask,

    /// Local-space shape, fixed for the collider's lifetime
    shape_local: Shape,

    /// Cached bounds of `shape_local`
    bounds_local: Rectangle,

    /// Owning entity (non-owning handle)
    entity: Entity,

    /// Inactive colliders are skipped by [`ColliderRef::collide_collider`]
    active: bool,
}

impl Collider {
    /// Create an active collider for `entity`
    ///
    /// Fails if `shape` is degenerate, so every collider has usable bounds.
    pub fn new(
        entity: Entity,
        mask: Mask,
        shape: impl Into<Shape>,
    ) -> Result<Self, GeometryError> {
        let shape_local = shape.into();
        let bounds_local = shape_local.bounds()?;
        Ok(Self {
            mask,
            shape_local,
            bounds_local,
            entity,
            active: true,
        })
    }

    /// Category bits
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Replace the category bits
    pub fn set_mask(&mut self, mask: Mask) {
        self.mask = mask;
    }

    /// Whether activity-aware tests consider this collider
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the collider
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Shape in the entity's local frame
    pub fn shape_local(&self) -> &Shape {
        &self.shape_local
    }

    /// Bounds in the entity's local frame
    pub fn bounds_local(&self) -> Rectangle {
        self.bounds_local
    }

    /// World bounds for an entity at `position`
    pub fn bounds(&self, position: Point) -> Rectangle {
        self.bounds_local.offset(position)
    }

    /// World shape for an entity at `position`
    pub fn shape(&self, position: Point) -> Shape {
        self.shape_local.translated(position)
    }
}

/// A collider bound to the container it lives in
///
/// Holds the owning entity's state as of creation. While the reference is
/// alive the container is borrowed, so that state cannot change underneath it.
///
/// Every query takes an `offset` that displaces only this collider (never the
/// other one), which lets movement code test a position before committing it.
/// Pass [`Point::ZERO`] to test in place.
#[derive(Clone, Copy)]
pub struct ColliderRef<'w> {
    query: &'w dyn ColliderQuery,
    id: ColliderId,
    collider: &'w Collider,
    owner: EntityState,
}

impl fmt::Debug for ColliderRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColliderRef")
            .field("id", &self.id)
            .field("collider", self.collider)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl<'w> ColliderRef<'w> {
    /// Bind collider `id` from `query`
    pub fn new(query: &'w dyn ColliderQuery, id: ColliderId) -> Result<Self, CollisionError> {
        let collider = query.collider(id).ok_or(CollisionError::MissingCollider(id))?;
        let owner = query
            .entity_state(collider.entity())
            .ok_or(CollisionError::MissingEntity(collider.entity()))?;
        Ok(Self { query, id, collider, owner })
    }

    /// Handle of this collider
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Component data
    pub fn collider(&self) -> &'w Collider {
        self.collider
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.collider.entity()
    }

    /// Owning entity's position
    pub fn position(&self) -> Point {
        self.owner.position
    }

    /// Live world bounds
    pub fn bounds(&self) -> Rectangle {
        self.collider.bounds(self.owner.position)
    }

    /// Live world shape
    pub fn shape(&self) -> Shape {
        self.collider.shape(self.owner.position)
    }

    /// Left edge of the world bounds
    pub fn x(&self) -> Real {
        self.bounds().x
    }

    /// Top edge of the world bounds
    pub fn y(&self) -> Real {
        self.bounds().y
    }

    /// Width of the bounds
    pub fn w(&self) -> Real {
        self.collider.bounds_local.w
    }

    /// Height of the bounds
    pub fn h(&self) -> Real {
        self.collider.bounds_local.h
    }

    /// World-space left edge
    pub fn x_left(&self) -> Real {
        self.bounds().x_left()
    }

    /// World-space horizontal centre
    pub fn x_center(&self) -> Real {
        self.bounds().x_center()
    }

    /// World-space right edge
    pub fn x_right(&self) -> Real {
        self.bounds().x_right()
    }

    /// World-space top edge
    pub fn y_top(&self) -> Real {
        self.bounds().y_top()
    }

    /// World-space vertical centre
    pub fn y_center(&self) -> Real {
        self.bounds().y_center()
    }

    /// World-space bottom edge
    pub fn y_bottom(&self) -> Real {
        self.bounds().y_bottom()
    }

    /// First other collider carrying every bit of `mask` whose bounds overlap
    pub fn first_bounds_collision(
        &self,
        mask: Mask,
        offset: Point,
    ) -> Result<Option<ColliderId>, CollisionError> {
        self.first_matching(mask, offset, false)
    }

    /// First other collider carrying every bit of `mask` whose shape overlaps
    pub fn first_collision(
        &self,
        mask: Mask,
        offset: Point,
    ) -> Result<Option<ColliderId>, CollisionError> {
        self.first_matching(mask, offset, true)
    }

    /// Every other collider matching `mask` whose bounds overlap, in enumeration order
    pub fn all_bounds_collisions(
        &self,
        mask: Mask,
        offset: Point,
    ) -> Result<Vec<ColliderId>, CollisionError> {
        self.all_matching(mask, offset, false)
    }

    /// Every other collider matching `mask` whose shape overlaps, in enumeration order
    pub fn all_collisions(
        &self,
        mask: Mask,
        offset: Point,
    ) -> Result<Vec<ColliderId>, CollisionError> {
        self.all_matching(mask, offset, true)
    }

    /// Whether [`first_bounds_collision`](Self::first_bounds_collision) finds anything
    pub fn collide_bounds_mask(&self, mask: Mask, offset: Point) -> Result<bool, CollisionError> {
        Ok(self.first_bounds_collision(mask, offset)?.is_some())
    }

    /// Whether [`first_collision`](Self::first_collision) finds anything
    pub fn collide_mask(&self, mask: Mask, offset: Point) -> Result<bool, CollisionError> {
        Ok(self.first_collision(mask, offset)?.is_some())
    }

    /// Bounds-then-shape test against `other` that honours active flags
    ///
    /// False for self, and whenever either collider or either owning entity
    /// is inactive.
    pub fn collide_collider(
        &self,
        other: ColliderId,
        offset: Point,
    ) -> Result<bool, CollisionError> {
        if other == self.id {
            return Ok(false);
        }
        let (collider, owner) = self.lookup(other)?;
        if !(self.collider.active && self.owner.active && collider.active && owner.active) {
            log::trace!("Skipping inactive pair {:?} / {:?}", self.id, other);
            return Ok(false);
        }
        self.overlaps(collider, owner.position, offset, true)
    }

    /// Strict AABB test against `other`, ignoring active flags
    pub fn collide_bounds(&self, other: ColliderId, offset: Point) -> Result<bool, CollisionError> {
        if other == self.id {
            return Ok(false);
        }
        let (collider, owner) = self.lookup(other)?;
        self.overlaps(collider, owner.position, offset, false)
    }

    /// Exact shape test against `other`, ignoring active flags
    pub fn collide_shape(&self, other: ColliderId, offset: Point) -> Result<bool, CollisionError> {
        if other == self.id {
            return Ok(false);
        }
        let (collider, owner) = self.lookup(other)?;
        Ok(collide_any_any(
            &self.collider.shape_local,
            &collider.shape_local,
            self.owner.position + offset,
            owner.position,
        )?)
    }

    fn lookup(&self, id: ColliderId) -> Result<(&'w Collider, EntityState), CollisionError> {
        let collider = self.query.collider(id).ok_or(CollisionError::MissingCollider(id))?;
        let owner = self
            .query
            .entity_state(collider.entity())
            .ok_or(CollisionError::MissingEntity(collider.entity()))?;
        Ok((collider, owner))
    }

    /// Broad phase, then the narrow phase when `exact` is set
    fn overlaps(
        &self,
        other: &Collider,
        other_position: Point,
        offset: Point,
        exact: bool,
    ) -> Result<bool, CollisionError> {
        let origin = self.owner.position + offset;
        if !self.collider.bounds(origin).collides_rectangle(&other.bounds(other_position)) {
            return Ok(false);
        }
        if !exact {
            return Ok(true);
        }
        Ok(collide_any_any(&self.collider.shape_local, &other.shape_local, origin, other_position)?)
    }

    fn candidate(
        &self,
        id: ColliderId,
        other: &Collider,
        mask: Mask,
        offset: Point,
        exact: bool,
    ) -> Result<bool, CollisionError> {
        if id == self.id || !CollisionLayers::matches(other.mask, mask) {
            return Ok(false);
        }
        let owner = self
            .query
            .entity_state(other.entity())
            .ok_or(CollisionError::MissingEntity(other.entity()))?;
        self.overlaps(other, owner.position, offset, exact)
    }

    fn first_matching(
        &self,
        mask: Mask,
        offset: Point,
        exact: bool,
    ) -> Result<Option<ColliderId>, CollisionError> {
        let mut failure = None;
        let found = self.query.first_collider(&mut |id, other| {
            match self.candidate(id, other, mask, offset, exact) {
                Ok(hit) => hit,
                Err(e) => {
                    // Stop the scan; the error is reported below
                    failure = Some(e);
                    true
                }
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        log::trace!(
            "{:?} first {} match for mask {:#x} at offset {:?}: {:?}",
            self.id,
            if exact { "shape" } else { "bounds" },
            mask,
            offset,
            found
        );
        Ok(found)
    }

    fn all_matching(
        &self,
        mask: Mask,
        offset: Point,
        exact: bool,
    ) -> Result<Vec<ColliderId>, CollisionError> {
        let mut hits = Vec::new();
        let mut failure = None;
        self.query.for_each_collider(&mut |id, other| {
            if failure.is_some() {
                return;
            }
            match self.candidate(id, other, mask, offset, exact) {
                Ok(true) => hits.push(id),
                Ok(false) => {}
                Err(e) => failure = Some(e),
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        log::trace!(
            "{:?} found {} {} match(es) for mask {:#x} at offset {:?}",
            self.id,
            hits.len(),
            if exact { "shape" } else { "bounds" },
            mask,
            offset
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::physics::collision::{Circle, Segment};
    use approx::assert_relative_eq;

    #[test]
    fn test_new_caches_local_bounds() {
        let mut world = World::new();
        let entity = world.spawn(Point::ZERO);
        let collider = Collider::new(entity, 1, Circle::new(1.0, 1.0, 2.0)).unwrap();
        assert_eq!(collider.bounds_local(), Rectangle::new(-1.0, -1.0, 4.0, 4.0));
        assert_eq!(
            collider.bounds(Point::new(10.0, 5.0)),
            Rectangle::new(9.0, 4.0, 4.0, 4.0)
        );
        assert!(collider.is_active());
    }

    #[test]
    fn test_new_rejects_degenerate_shape() {
        let mut world = World::new();
        let entity = world.spawn(Point::ZERO);
        assert!(Collider::new(entity, 1, Circle::new(0.0, 0.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_accessors_follow_entity_position() {
        let mut world = World::new();
        let entity = world.spawn(Point::new(100.0, 50.0));
        let id = world
            .add_collider(entity, 1, Rectangle::new(-5.0, -10.0, 10.0, 20.0))
            .unwrap();

        let collider = world.collider_ref(id).unwrap();
        assert_relative_eq!(collider.x(), 95.0);
        assert_relative_eq!(collider.y(), 40.0);
        assert_relative_eq!(collider.w(), 10.0);
        assert_relative_eq!(collider.h(), 20.0);
        assert_relative_eq!(collider.x_left(), 95.0);
        assert_relative_eq!(collider.x_center(), 100.0);
        assert_relative_eq!(collider.x_right(), 105.0);
        assert_relative_eq!(collider.y_top(), 40.0);
        assert_relative_eq!(collider.y_center(), 50.0);
        assert_relative_eq!(collider.y_bottom(), 60.0);

        world.translate(entity, Point::new(1.0, 1.0)).unwrap();
        let collider = world.collider_ref(id).unwrap();
        assert_relative_eq!(collider.x_left(), 96.0);
        assert_relative_eq!(collider.w(), collider.bounds().w);
        assert_relative_eq!(collider.h(), collider.bounds().h);
    }

    #[test]
    fn test_shape_is_translated_to_world() {
        let mut world = World::new();
        let entity = world.spawn(Point::new(3.0, 4.0));
        let id = world
            .add_collider(entity, 1, Segment::new(Point::ZERO, Point::new(1.0, 0.0)))
            .unwrap();
        let collider = world.collider_ref(id).unwrap();
        assert_eq!(
            collider.shape(),
            Shape::from(Segment::new(Point::new(3.0, 4.0), Point::new(4.0, 4.0)))
        );
        assert_eq!(collider.collider().shape_local().kind(), collider.shape().kind());
    }

    #[test]
    fn test_bounds_hit_but_shape_miss() {
        let mut world = World::new();
        let a = world.spawn(Point::ZERO);
        let b = world.spawn(Point::new(1.8, 1.8));
        let ca = world.add_collider(a, 1, Circle::new(0.0, 0.0, 1.0)).unwrap();
        let cb = world.add_collider(b, 1, Circle::new(0.0, 0.0, 1.0)).unwrap();

        let collider = world.collider_ref(ca).unwrap();
        assert!(collider.collide_bounds(cb, Point::ZERO).unwrap());
        assert!(!collider.collide_shape(cb, Point::ZERO).unwrap());
        assert_eq!(collider.first_bounds_collision(1, Point::ZERO).unwrap(), Some(cb));
        assert_eq!(collider.first_collision(1, Point::ZERO).unwrap(), None);
        assert!(!collider.collide_collider(cb, Point::ZERO).unwrap());
    }

    #[test]
    fn test_missing_other_collider_is_an_error() {
        let mut world = World::new();
        let a = world.spawn(Point::ZERO);
        let ca = world.add_collider(a, 1, Circle::new(0.0, 0.0, 1.0)).unwrap();
        let cb = world.add_collider(a, 1, Circle::new(0.0, 0.0, 1.0)).unwrap();
        world.remove_collider(cb).unwrap();

        let collider = world.collider_ref(ca).unwrap();
        assert_eq!(
            collider.collide_bounds(cb, Point::ZERO).unwrap_err(),
            CollisionError::MissingCollider(cb)
        );
    }
}
