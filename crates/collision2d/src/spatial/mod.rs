//! Spatial query layer
//!
//! Colliders find their candidates through [`ColliderQuery`], so a spatial
//! index can replace the world's linear scan without touching collider code.

pub mod spatial_query;

pub use spatial_query::ColliderQuery;
