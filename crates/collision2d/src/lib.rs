//! # Collision2D
//!
//! 2D collision detection for entity/component simulations.
//!
//! ## Features
//!
//! - **Shape Set**: rectangles, circles, triangles, segments, rays, lines and polygons
//! - **Two-Phase Tests**: strict AABB broad phase, exact narrow phase over every shape pair
//! - **Layer Masks**: required-bits filtering of candidate colliders
//! - **Offset Queries**: test a hypothetical position without moving the entity
//!
//! ## Quick Start
//!
//! ```rust
//! use collision2d::prelude::*;
//!
//! let mut world = World::new();
//! let player = world.spawn(Point::new(0.0, 0.0));
//! let wall = world.spawn(Point::new(12.0, 0.0));
//!
//! let body = world
//!     .add_collider(player, CollisionLayers::PLAYER, Rectangle::new(0.0, 0.0, 10.0, 10.0))
//!     .unwrap();
//! world
//!     .add_collider(wall, CollisionLayers::ENVIRONMENT, Rectangle::new(0.0, 0.0, 4.0, 40.0))
//!     .unwrap();
//!
//! let collider = world.collider_ref(body).unwrap();
//! assert!(!collider.collide_mask(CollisionLayers::ENVIRONMENT, Point::ZERO).unwrap());
//! assert!(collider.collide_mask(CollisionLayers::ENVIRONMENT, Point::new(5.0, 0.0)).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod spatial;
pub mod ecs;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        ecs::{Collider, ColliderRef, CollisionError, Entity, EntityState, World},
        foundation::{
            collections::ColliderId,
            math::{Point, Real},
        },
        physics::{
            Circle, CollisionLayers, GeometryError, Line, Mask, Polygon, Ray, Rectangle, Segment,
            Shape, ShapeKind, Triangle,
        },
        spatial::ColliderQuery,
    };
}
