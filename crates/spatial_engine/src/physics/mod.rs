//! Physics module for intersection queries
//!
//! Provides the collision-query half of a physics system: bounding
//! volumes, ray and triangle primitives, and the cast pipeline that runs
//! them against the spatial hierarchy. There is no response or dynamics
//! here; queries only report what they touched.

pub mod bounding;
pub mod layers;
pub mod primitives;
pub mod raycast;
pub mod volume;

pub use bounding::{BoundingVolume, WorldBox, AABB};
pub use layers::CollisionLayer;
pub use primitives::{Ray, Triangle};
pub use raycast::{HitResult, IntersectionEngine, QueryError, QueryFilter, RayQuery};
