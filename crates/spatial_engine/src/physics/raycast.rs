//! Ray query pipeline against the spatial hierarchy
//!
//! Implements the query side of collision detection following Game Engine
//! Architecture Chapter 13.3.7 - Ray and Shape Casts. Every cast runs the
//! same pipeline: gather eligible mesh parts, reject parts whose world-space
//! bounding box misses (broad phase), confirm against world-space triangles
//! (narrow phase), then resolve the nearest confirmed hit and the full set
//! of parts the ray passed through.
//!
//! World matrices are pulled fresh from the scene for every cast; nothing
//! is cached between calls, so results always reflect current transforms.

use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

use crate::config::QuerySettings;
use crate::foundation::math::{Mat4, Point3, Vec2, Vec3};
use crate::physics::bounding::WorldBox;
use crate::physics::layers::CollisionLayer;
use crate::physics::primitives::{interpolate_barycentric, Ray, Triangle};
use crate::scene::{MeshGeometry, NodeId, PartId, SceneIndex};

const EPSILON: f32 = 0.000001;

/// Errors raised before a query reaches the scan.
///
/// These indicate a malformed query rather than empty space; a ray that
/// touches nothing returns an empty [`HitResult`], not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The query direction has no usable length
    #[error("Ray direction is zero or too short to normalize")]
    DegenerateDirection,

    /// A screen-space ray was cast without resolving it to world space first
    #[error("Screen-space ray must be resolved to world space before casting")]
    UnresolvedScreenSpace,

    /// The camera view matrix could not be inverted
    #[error("Camera view matrix is not invertible")]
    CameraNotInvertible,
}

/// Exclusion rules applied during the eligibility scan.
///
/// The same filter drives ray, segment, screen, and volume casts. The
/// default excludes nothing beyond the standing rule that parts on
/// [`CollisionLayer::None`] never participate.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    /// Nodes skipped wholesale, parts included
    pub ignored_nodes: HashSet<NodeId>,
    /// Individual parts skipped
    pub ignored_parts: HashSet<PartId>,
    /// Layer whose members are skipped for this query
    pub excluded_layer: CollisionLayer,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            ignored_nodes: HashSet::new(),
            ignored_parts: HashSet::new(),
            excluded_layer: CollisionLayer::None,
        }
    }
}

impl QueryFilter {
    /// Filter that only applies the standing layer rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip one node and everything it owns
    #[must_use]
    pub fn ignoring_node(mut self, node: NodeId) -> Self {
        self.ignored_nodes.insert(node);
        self
    }

    /// Skip several nodes and everything they own
    #[must_use]
    pub fn ignoring_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.ignored_nodes.extend(nodes);
        self
    }

    /// Skip one part
    #[must_use]
    pub fn ignoring_part(mut self, part: PartId) -> Self {
        self.ignored_parts.insert(part);
        self
    }

    /// Skip several parts
    #[must_use]
    pub fn ignoring_parts(mut self, parts: impl IntoIterator<Item = PartId>) -> Self {
        self.ignored_parts.extend(parts);
        self
    }

    /// Skip every part on the given layer
    #[must_use]
    pub fn excluding_layer(mut self, layer: CollisionLayer) -> Self {
        self.excluded_layer = layer;
        self
    }

    fn ignores_node(&self, node: NodeId) -> bool {
        self.ignored_nodes.contains(&node)
    }

    fn ignores_part(&self, part: PartId) -> bool {
        self.ignored_parts.contains(&part)
    }
}

/// A world-space ray cast request.
///
/// Construction normalizes the direction; a degenerate direction is
/// rejected up front so the scan never runs with NaN components. Screen
/// rays start life in view space and must pass through
/// [`crate::picking::resolve_screen_ray`] before they can be cast.
#[derive(Debug, Clone)]
pub struct RayQuery {
    origin: Vec3,
    direction: Vec3,
    range: f32,
    /// Exclusions applied during the scan
    pub filter: QueryFilter,
    from_screen: bool,
}

impl RayQuery {
    /// Build a world-space ray query.
    ///
    /// `direction` is normalized here; `range` caps how far the nearest
    /// hit may lie along the ray.
    pub fn new(origin: Vec3, direction: Vec3, range: f32) -> Result<Self, QueryError> {
        let length = direction.norm();
        if length <= EPSILON {
            return Err(QueryError::DegenerateDirection);
        }
        Ok(Self {
            origin,
            direction: direction / length,
            range,
            filter: QueryFilter::default(),
            from_screen: false,
        })
    }

    /// View-space ray awaiting camera resolution; direction is stored raw
    pub(crate) fn screen_space(origin: Vec3, direction: Vec3, range: f32) -> Self {
        Self {
            origin,
            direction,
            range,
            filter: QueryFilter::default(),
            from_screen: true,
        }
    }

    /// Replace the filter, consuming the query
    #[must_use]
    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Ray start point
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Ray direction; unit length for world-space queries
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Maximum distance for the nearest hit
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Whether this ray still lives in view space
    pub fn is_screen_space(&self) -> bool {
        self.from_screen
    }
}

/// Outcome of a cast.
///
/// `node`/`part` and the surface fields describe the nearest confirmed
/// hit within range. `hit_nodes`/`hit_parts` list everything the query
/// confirmed regardless of range, deduplicated, in scan order. Volume
/// casts fill only the set fields.
#[derive(Debug, Clone)]
pub struct HitResult {
    /// Node owning the nearest hit part, if one was within range
    pub node: Option<NodeId>,
    /// The nearest hit part, if one was within range
    pub part: Option<PartId>,
    /// Distance from the ray origin to the nearest hit
    pub distance: f32,
    /// World-space position of the nearest hit
    pub position: Vec3,
    /// Surface normal at the nearest hit, in mesh-local space
    pub normal: Vec3,
    /// Interpolated texture coordinates at the nearest hit
    pub uv: Vec2,
    /// Every node with a confirmed hit, in scan order
    pub hit_nodes: Vec<NodeId>,
    /// Every part with a confirmed hit, in scan order
    pub hit_parts: Vec<PartId>,
}

impl Default for HitResult {
    fn default() -> Self {
        Self {
            node: None,
            part: None,
            distance: 0.0,
            position: Vec3::zeros(),
            normal: Vec3::zeros(),
            uv: Vec2::zeros(),
            hit_nodes: Vec::new(),
            hit_parts: Vec::new(),
        }
    }
}

impl HitResult {
    /// Whether a nearest hit was confirmed within range
    pub fn is_hit(&self) -> bool {
        self.node.is_some()
    }

    /// Whether the query confirmed any parts at all, in or out of range
    pub fn has_overlaps(&self) -> bool {
        !self.hit_parts.is_empty()
    }
}

/// A mesh part that survived the eligibility scan
pub(crate) struct MeshCandidate<'a> {
    pub(crate) node: NodeId,
    pub(crate) part: PartId,
    pub(crate) mesh: &'a MeshGeometry,
    pub(crate) world: Mat4,
}

/// Gather mesh parts eligible for a query, in scan order.
///
/// Scan order is node creation order, then each node's part creation
/// order. Anchors, inactive parts, filtered entries, and parts on an
/// excluded layer are dropped here before any geometry work happens.
pub(crate) fn collect_mesh_parts<'a>(
    scene: &'a dyn SceneIndex,
    filter: &QueryFilter,
) -> Vec<MeshCandidate<'a>> {
    let mut candidates = Vec::new();
    for node_id in scene.active_nodes() {
        if filter.ignores_node(node_id) {
            continue;
        }
        let Some(node) = scene.node(node_id) else { continue };
        for &part_id in node.parts() {
            if filter.ignores_part(part_id) {
                continue;
            }
            let Some(part) = scene.part(part_id) else { continue };
            if !part.is_active() || part.layer().excluded_by(filter.excluded_layer) {
                continue;
            }
            let Some(mesh) = part.geometry() else { continue };
            if mesh.is_empty() {
                trace!("skipping part '{}' with empty geometry", part.name());
                continue;
            }
            let Some(world) = scene.part_world_matrix(part_id) else {
                trace!("skipping part '{}' with unresolved transform", part.name());
                continue;
            };
            candidates.push(MeshCandidate { node: node_id, part: part_id, mesh, world });
        }
    }
    candidates
}

struct NarrowHit {
    distance: f32,
    position: Vec3,
    normal: Vec3,
    uv: Vec2,
}

/// Closest triangle intersection for one part's geometry.
///
/// Triangles are transformed to world space per call (Game Engine
/// Architecture Chapter 13.3.4: collision geometry stays in model space
/// and is transformed when tested). The hit normal is the renormalized
/// average of the three stored vertex normals and stays in mesh-local
/// space; texture coordinates interpolate barycentrically.
fn closest_triangle_hit(mesh: &MeshGeometry, world: &Mat4, ray: &Ray) -> Option<NarrowHit> {
    let mut best: Option<NarrowHit> = None;
    for triple in mesh.triangles() {
        let triangle = Triangle::new(
            world.transform_point(&Point3::from(triple[0].position)).coords,
            world.transform_point(&Point3::from(triple[1].position)).coords,
            world.transform_point(&Point3::from(triple[2].position)).coords,
        );
        let Some((t, u, v)) = triangle.intersect_ray(ray) else { continue };
        if best.as_ref().map_or(false, |current| current.distance <= t) {
            continue;
        }
        let summed = triple[0].normal + triple[1].normal + triple[2].normal;
        best = Some(NarrowHit {
            distance: t,
            position: ray.point_at(t),
            normal: summed.normalize(),
            uv: interpolate_barycentric(triple[0].uv, triple[1].uv, triple[2].uv, u, v),
        });
    }
    best
}

/// Stateless-per-call query engine.
///
/// Holds tuning settings and, for volume casts, the most recent cast
/// volume for debug visualization. Scene data is borrowed per call
/// through [`SceneIndex`]; the engine never retains scene state.
#[derive(Debug)]
pub struct IntersectionEngine {
    settings: QuerySettings,
    last_volume: Option<WorldBox>,
}

impl IntersectionEngine {
    /// Engine with default settings
    pub fn new() -> Self {
        Self::with_settings(QuerySettings::default())
    }

    /// Engine with explicit settings
    pub fn with_settings(settings: QuerySettings) -> Self {
        Self { settings, last_volume: None }
    }

    /// Current tuning settings
    pub fn settings(&self) -> &QuerySettings {
        &self.settings
    }

    /// The volume used by the most recent box cast, when recording is on
    pub fn last_cast_volume(&self) -> Option<&WorldBox> {
        self.last_volume.as_ref()
    }

    pub(crate) fn record_volume(&mut self, volume: WorldBox) {
        if self.settings.record_cast_volumes {
            self.last_volume = Some(volume);
        }
    }

    /// Cast a world-space ray through the scene.
    ///
    /// Returns the nearest confirmed hit within the query range plus the
    /// deduplicated sets of everything the ray passed through at any
    /// distance. Equal distances resolve to the earlier part in scan
    /// order. A ray that confirms nothing returns an empty result.
    pub fn cast_ray(
        &mut self,
        scene: &dyn SceneIndex,
        query: &RayQuery,
    ) -> Result<HitResult, QueryError> {
        if query.is_screen_space() {
            return Err(QueryError::UnresolvedScreenSpace);
        }

        let ray = Ray::new(query.origin(), query.direction());
        let mut result = HitResult::default();
        let mut best = f32::INFINITY;

        for candidate in collect_mesh_parts(scene, &query.filter) {
            let bounds = candidate.mesh.bounds().to_world(&candidate.world);
            if bounds.intersect_ray(&ray).is_none() {
                continue;
            }
            let Some(hit) = closest_triangle_hit(candidate.mesh, &candidate.world, &ray) else {
                continue;
            };

            if !result.hit_parts.contains(&candidate.part) {
                result.hit_parts.push(candidate.part);
            }
            if !result.hit_nodes.contains(&candidate.node) {
                result.hit_nodes.push(candidate.node);
            }
            if hit.distance <= query.range() && hit.distance < best {
                best = hit.distance;
                result.node = Some(candidate.node);
                result.part = Some(candidate.part);
                result.distance = hit.distance;
                result.position = hit.position;
                result.normal = hit.normal;
                result.uv = hit.uv;
            }
        }

        if let (Some(node), Some(part)) = (result.node, result.part) {
            debug!(
                "ray hit part {:?} of node {:?} at distance {:.3}",
                part, node, result.distance
            );
        }
        Ok(result)
    }

    /// Cast between two points.
    ///
    /// The ray runs from `start` towards `end` with its range set to the
    /// segment length plus the configured padding, so grazing contact at
    /// the far endpoint still registers. Coincident endpoints are
    /// rejected as a degenerate direction.
    pub fn cast_segment(
        &mut self,
        scene: &dyn SceneIndex,
        start: Vec3,
        end: Vec3,
        filter: QueryFilter,
    ) -> Result<HitResult, QueryError> {
        let offset = end - start;
        let range = offset.norm() + self.settings.segment_range_padding;
        let query = RayQuery::new(start, offset, range)?.with_filter(filter);
        self.cast_ray(scene, &query)
    }
}

impl Default for IntersectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
