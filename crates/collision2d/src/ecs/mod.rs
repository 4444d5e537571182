//! Entity-Component-System implementation
//!
//! A minimal entity table (position, active flag) plus collider components.

pub mod world;
pub mod entity;
pub mod components;

#[cfg(test)]
mod tests;

pub use world::{CollisionError, World};
pub use entity::{Entity, EntityState};
pub use components::{Collider, ColliderRef};
