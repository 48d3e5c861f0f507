//! Geometry-bearing parts of the spatial hierarchy
//!
//! Parts form the component tier: each part carries its own local transform
//! under an owning node, and a part may provide triangle geometry for
//! queries. Mesh data is stored in MODEL SPACE and transformed on the fly
//! per query (GEA 13.3.4: "Collision shapes should be stored in model space
//! and transformed on-the-fly"), never cached in world space.

use crate::foundation::math::{Transform, Vec2, Vec3};
use crate::physics::bounding::BoundingVolume;
use crate::physics::layers::CollisionLayer;
use crate::scene::node::{NodeId, PartId};

/// A mesh vertex as the query pipeline consumes it
#[derive(Debug, Clone, Copy)]
pub struct MeshVertex {
    /// Position in mesh-local space
    pub position: Vec3,
    /// Vertex normal in mesh-local space
    pub normal: Vec3,
    /// Texture coordinate
    pub uv: Vec2,
}

impl MeshVertex {
    /// Create a vertex from explicit attributes
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self { position, normal, uv }
    }
}

/// Triangle geometry in MODEL SPACE with its local bounding volume.
///
/// Consecutive vertex triples form triangles. The bounding volume is
/// computed once here, when the geometry loads; asset decoding itself
/// happens outside this crate and hands finished vertex arrays in.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    vertices: Vec<MeshVertex>,
    bounds: BoundingVolume,
}

impl MeshGeometry {
    /// Build geometry from a finished vertex array.
    ///
    /// A trailing partial triple is ignored by [`Self::triangles`]. An
    /// empty array is accepted and marks a part whose geometry has not
    /// loaded; queries skip such parts.
    pub fn from_vertices(vertices: Vec<MeshVertex>) -> Self {
        let bounds = BoundingVolume::from_vertex_extents(vertices.iter().map(|v| v.position));
        Self { vertices, bounds }
    }

    /// A unit cube centered on the mesh origin, flat-shaded, one UV tile
    /// per face. Used by the demo and as a test fixture.
    pub fn unit_cube() -> Self {
        let mut vertices = Vec::with_capacity(36);

        // Each face: outward normal, right and up so that right x up = normal.
        let faces = [
            (Vec3::z(), Vec3::x(), Vec3::y()),
            (-Vec3::z(), -Vec3::x(), Vec3::y()),
            (Vec3::x(), -Vec3::z(), Vec3::y()),
            (-Vec3::x(), Vec3::z(), Vec3::y()),
            (Vec3::y(), Vec3::x(), -Vec3::z()),
            (-Vec3::y(), Vec3::x(), Vec3::z()),
        ];

        for (normal, right, up) in faces {
            let center = normal * 0.5;
            let a = center - right * 0.5 - up * 0.5;
            let b = center + right * 0.5 - up * 0.5;
            let c = center + right * 0.5 + up * 0.5;
            let d = center - right * 0.5 + up * 0.5;

            let corners = [
                (a, Vec2::new(0.0, 0.0)),
                (b, Vec2::new(1.0, 0.0)),
                (c, Vec2::new(1.0, 1.0)),
                (a, Vec2::new(0.0, 0.0)),
                (c, Vec2::new(1.0, 1.0)),
                (d, Vec2::new(0.0, 1.0)),
            ];
            for (position, uv) in corners {
                vertices.push(MeshVertex::new(position, normal, uv));
            }
        }

        Self::from_vertices(vertices)
    }

    /// The raw vertex array
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Whether no vertex data is loaded
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of whole triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex]> {
        self.vertices.chunks_exact(3)
    }

    /// The local bounding volume computed at load
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }
}

/// What a part contributes to the hierarchy beyond its transform
#[derive(Debug, Clone)]
pub enum PartKind {
    /// A bare attachment point with no geometry
    Anchor,
    /// A triangle geometry provider
    Mesh(MeshGeometry),
}

/// A component-tier entry in the spatial hierarchy.
///
/// Parts nest under other parts of the same owning node; a part without a
/// parent hangs directly off the node root. Structural links are mutated
/// only through [`crate::scene::SceneGraph`] operations.
#[derive(Debug, Clone)]
pub struct SpatialPart {
    name: String,
    local: Transform,
    kind: PartKind,
    layer: CollisionLayer,
    active: bool,
    pub(crate) owner: NodeId,
    pub(crate) parent: Option<PartId>,
    pub(crate) children: Vec<PartId>,
}

impl SpatialPart {
    pub(crate) fn new(name: impl Into<String>, owner: NodeId, kind: PartKind, local: Transform) -> Self {
        Self {
            name: name.into(),
            local,
            kind,
            layer: CollisionLayer::default(),
            active: true,
            owner,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Part name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The local transform relative to the parent part or the node root
    pub fn transform(&self) -> &Transform {
        &self.local
    }

    /// Mutable access to the local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.local
    }

    /// The geometry this part provides, if it is a geometry provider.
    ///
    /// This is the capability dispatch the query pipeline uses instead of
    /// downcasting part types.
    pub fn geometry(&self) -> Option<&MeshGeometry> {
        match &self.kind {
            PartKind::Mesh(geometry) => Some(geometry),
            PartKind::Anchor => None,
        }
    }

    /// Whether this part provides triangle geometry
    pub fn is_geometry_provider(&self) -> bool {
        self.geometry().is_some()
    }

    /// The part's collision layer
    pub fn layer(&self) -> CollisionLayer {
        self.layer
    }

    /// Set the part's collision layer
    pub fn set_layer(&mut self, layer: CollisionLayer) {
        self.layer = layer;
    }

    /// Whether the part participates in queries
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the part for queries
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The node that owns this part
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// The parent part, if nested under one
    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    /// Child parts nested under this one
    pub fn children(&self) -> &[PartId] {
        &self.children
    }
}
