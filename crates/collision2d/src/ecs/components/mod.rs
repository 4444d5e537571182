//! ECS Components module

pub mod collision;

pub use collision::{Collider, ColliderRef};
