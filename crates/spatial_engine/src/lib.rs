//! # Spatial Engine
//!
//! A spatial hierarchy and intersection query engine for real-time
//! applications.
//!
//! ## Features
//!
//! - **Spatial Hierarchy**: Arena-backed nodes and parts with generational handles
//! - **Fresh World Matrices**: Recomputed from local transforms on every query
//! - **Ray Casts**: Nearest-hit surface data plus full pass-through sets
//! - **Volume Casts**: Oriented box sweeps and axis-aligned overlap queries
//! - **Screen Picking**: Pixel-to-world rays through any camera
//! - **Configurable**: Query tuning loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = SceneGraph::new();
//!     let node = scene.spawn_node("crate", Transform::from_position(Vec3::new(0.0, 0.0, 5.0)));
//!     scene.add_part(node, "hull", PartKind::Mesh(MeshGeometry::unit_cube()), Transform::identity())?;
//!
//!     let mut engine = IntersectionEngine::new();
//!     let query = RayQuery::new(Vec3::zeros(), Vec3::z(), 100.0)?;
//!     let hit = engine.cast_ray(&scene, &query)?;
//!     if hit.is_hit() {
//!         println!("hit at distance {}", hit.distance);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod picking;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, QuerySettings},
        foundation::math::{Mat4, Quat, Transform, Vec2, Vec3},
        physics::{
            BoundingVolume, CollisionLayer, HitResult, IntersectionEngine, QueryError,
            QueryFilter, RayQuery, WorldBox, AABB,
        },
        picking::{
            build_screen_ray, cast_screen_ray, resolve_screen_ray, CameraMatrices, TargetCamera,
            Viewport,
        },
        scene::{
            MeshGeometry, MeshVertex, NodeId, PartId, PartKind, SceneError, SceneGraph,
            SceneIndex, SceneNode, SpatialPart,
        },
    };
}
