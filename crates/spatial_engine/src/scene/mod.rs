//! Spatial hierarchy system
//!
//! Provides the arena-backed scene graph that queries run against.
//! Following Game Engine Architecture Chapter 11.2.7 - Scene Graphs.
//!
//! ## Architecture
//!
//! ```text
//! SceneGraph
//!   ├── nodes  (actor tier: parent/child links, pivot composition)
//!   └── parts  (component tier: owned per node, nested part chains)
//! ```
//!
//! The scene graph:
//! - Hands out generational handles that stay valid across despawns
//! - Recomputes world matrices on demand from local transforms
//! - Exposes the query-facing view through [`SceneIndex`]

mod geometry;
mod index;
mod node;

pub use geometry::{MeshGeometry, MeshVertex, PartKind, SpatialPart};
pub use index::SceneIndex;
pub use node::{NodeId, PartId, SceneGraph, SceneNode};

use thiserror::Error;

/// Structural errors raised by scene graph operations
///
/// Attachment and removal validate their handles and the resulting shape
/// of the hierarchy before mutating anything; a failed operation leaves
/// the graph unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// A node or part was attached to itself
    #[error("Cannot attach a node to itself")]
    SelfAttach,

    /// The child is already attached to a different parent
    #[error("Child is already attached to another parent")]
    AlreadyParented,

    /// The attachment would close a loop in the hierarchy
    #[error("Attachment would create a cycle")]
    WouldCycle,

    /// The detach target is not a child of the given parent
    #[error("Not a child of the given parent")]
    NotAChild,

    /// The node handle is stale or was never issued by this graph
    #[error("Unknown node handle {0:?}")]
    UnknownNode(NodeId),

    /// The part handle is stale or was never issued by this graph
    #[error("Unknown part handle {0:?}")]
    UnknownPart(PartId),

    /// Parts can only nest under parts owned by the same node
    #[error("Parts belong to different nodes")]
    DifferentOwner,
}
