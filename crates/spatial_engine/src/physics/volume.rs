//! Volume overlap casts
//!
//! Shape casts in the sense of Game Engine Architecture Chapter 13.3.7:
//! a box is swept or placed in the world and every part whose world-space
//! bounding box overlaps it is reported. Volume casts are overlap queries
//! only; they fill the hit sets of a [`HitResult`] and never select a
//! nearest surface.

use log::debug;

use crate::foundation::math::{look_at_rotation, midpoint, Vec2, Vec3};
use crate::physics::bounding::{WorldBox, AABB};
use crate::physics::raycast::{
    collect_mesh_parts, HitResult, IntersectionEngine, QueryError, QueryFilter,
};
use crate::scene::SceneIndex;

impl IntersectionEngine {
    /// Sweep an oriented box from `start` to `end`.
    ///
    /// The box is aimed along the segment: its center sits at the
    /// midpoint, its depth covers half the segment length, and `extents`
    /// gives the half width and half height of the cross section.
    /// Coincident endpoints cannot be oriented and are rejected.
    ///
    /// When recording is enabled the swept box is kept and can be read
    /// back through [`Self::last_cast_volume`] for visualization.
    pub fn cast_oriented_box(
        &mut self,
        scene: &dyn SceneIndex,
        start: Vec3,
        end: Vec3,
        extents: Vec2,
        filter: QueryFilter,
    ) -> Result<HitResult, QueryError> {
        let orientation = look_at_rotation(end, start).ok_or(QueryError::DegenerateDirection)?;
        let half_depth = (end - start).norm() * 0.5;
        let volume = WorldBox::new(
            midpoint(start, end),
            Vec3::new(extents.x, extents.y, half_depth),
            orientation,
        );
        self.record_volume(volume);

        let result = overlap_scan(scene, &filter, &volume);
        debug!(
            "oriented box cast from {:?} to {:?} overlapped {} parts",
            start,
            end,
            result.hit_parts.len()
        );
        Ok(result)
    }

    /// Place an axis-aligned box and collect everything it overlaps.
    ///
    /// Unlike the ray casts this cannot fail: any placement is a valid
    /// volume, so a miss is just an empty result.
    pub fn cast_box(
        &mut self,
        scene: &dyn SceneIndex,
        center: Vec3,
        extents: Vec3,
        filter: QueryFilter,
    ) -> HitResult {
        let volume = AABB::from_center_extents(center, extents).to_world_box();
        self.record_volume(volume);

        let result = overlap_scan(scene, &filter, &volume);
        debug!("box cast at {:?} overlapped {} parts", center, result.hit_parts.len());
        result
    }
}

/// Test every eligible mesh part's world box against the volume,
/// collecting overlaps in scan order
fn overlap_scan(scene: &dyn SceneIndex, filter: &QueryFilter, volume: &WorldBox) -> HitResult {
    let mut result = HitResult::default();
    for candidate in collect_mesh_parts(scene, filter) {
        let bounds = candidate.mesh.bounds().to_world(&candidate.world);
        if !volume.intersects_box(&bounds) {
            continue;
        }
        if !result.hit_parts.contains(&candidate.part) {
            result.hit_parts.push(candidate.part);
        }
        if !result.hit_nodes.contains(&candidate.node) {
            result.hit_nodes.push(candidate.node);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuerySettings;
    use crate::foundation::math::Transform;
    use crate::physics::layers::CollisionLayer;
    use crate::scene::{MeshGeometry, NodeId, PartId, PartKind, SceneGraph};
    use approx::assert_relative_eq;

    fn cube_node(graph: &mut SceneGraph, name: &str, position: Vec3) -> (NodeId, PartId) {
        let node = graph.spawn_node(name, Transform::from_position(position));
        let part = graph
            .add_part(node, format!("{name}_hull"), PartKind::Mesh(MeshGeometry::unit_cube()), Transform::identity())
            .unwrap();
        (node, part)
    }

    #[test]
    fn test_oriented_sweep_collects_parts_along_the_segment() {
        let mut graph = SceneGraph::new();
        let (near, _) = cube_node(&mut graph, "near", Vec3::new(0.0, 0.0, 5.0));
        let (far, _) = cube_node(&mut graph, "far", Vec3::new(0.0, 0.0, 10.0));
        cube_node(&mut graph, "offside", Vec3::new(0.0, 5.0, 5.0));

        let mut engine = IntersectionEngine::new();
        let result = engine
            .cast_oriented_box(
                &graph,
                Vec3::zeros(),
                Vec3::new(0.0, 0.0, 12.0),
                Vec2::new(0.5, 0.5),
                QueryFilter::new(),
            )
            .unwrap();

        assert!(!result.is_hit());
        assert!(result.has_overlaps());
        assert_eq!(result.hit_nodes, vec![near, far]);
    }

    #[test]
    fn test_oriented_sweep_follows_a_diagonal() {
        let mut graph = SceneGraph::new();
        let (on_path, _) = cube_node(&mut graph, "on_path", Vec3::new(5.0, 0.0, 5.0));
        cube_node(&mut graph, "off_path", Vec3::new(5.0, 0.0, 0.0));

        let mut engine = IntersectionEngine::new();
        let result = engine
            .cast_oriented_box(
                &graph,
                Vec3::zeros(),
                Vec3::new(10.0, 0.0, 10.0),
                Vec2::new(0.5, 0.5),
                QueryFilter::new(),
            )
            .unwrap();

        assert_eq!(result.hit_nodes, vec![on_path]);
    }

    #[test]
    fn test_oriented_sweep_rejects_coincident_endpoints() {
        let graph = SceneGraph::new();
        let mut engine = IntersectionEngine::new();
        let point = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(
            engine
                .cast_oriented_box(&graph, point, point, Vec2::new(0.5, 0.5), QueryFilter::new())
                .unwrap_err(),
            QueryError::DegenerateDirection
        );
    }

    #[test]
    fn test_axis_aligned_box_overlap() {
        let mut graph = SceneGraph::new();
        let (node, part) = cube_node(&mut graph, "crate", Vec3::new(0.0, 0.0, 5.0));

        let mut engine = IntersectionEngine::new();
        let result = engine.cast_box(
            &graph,
            Vec3::new(0.0, 0.0, 4.8),
            Vec3::new(0.5, 0.5, 0.5),
            QueryFilter::new(),
        );
        assert_eq!(result.hit_nodes, vec![node]);
        assert_eq!(result.hit_parts, vec![part]);

        let result = engine.cast_box(
            &graph,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            QueryFilter::new(),
        );
        assert!(!result.has_overlaps());
    }

    #[test]
    fn test_volume_casts_respect_the_shared_filter() {
        let mut graph = SceneGraph::new();
        let (ignored, _) = cube_node(&mut graph, "ignored", Vec3::new(0.0, 0.0, 5.0));
        let (_, tagged_part) = cube_node(&mut graph, "tagged", Vec3::new(0.0, 0.0, 6.0));
        graph.part_mut(tagged_part).unwrap().set_layer(CollisionLayer::Editor);

        let mut engine = IntersectionEngine::new();
        let filter = QueryFilter::new()
            .ignoring_node(ignored)
            .excluding_layer(CollisionLayer::Editor);
        let result = engine.cast_box(
            &graph,
            Vec3::new(0.0, 0.0, 5.5),
            Vec3::new(2.0, 2.0, 2.0),
            filter,
        );

        assert!(!result.has_overlaps());
    }

    #[test]
    fn test_cast_volume_recording_follows_settings() {
        let graph = SceneGraph::new();

        let mut engine = IntersectionEngine::new();
        engine
            .cast_oriented_box(
                &graph,
                Vec3::zeros(),
                Vec3::new(0.0, 0.0, 10.0),
                Vec2::new(1.0, 2.0),
                QueryFilter::new(),
            )
            .unwrap();
        let volume = engine.last_cast_volume().unwrap();
        assert_relative_eq!(volume.center, Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-5);
        assert_relative_eq!(volume.extents, Vec3::new(1.0, 2.0, 5.0), epsilon = 1e-5);

        let settings = QuerySettings { record_cast_volumes: false, ..QuerySettings::default() };
        let mut quiet = IntersectionEngine::with_settings(settings);
        quiet.cast_box(&graph, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), QueryFilter::new());
        assert!(quiet.last_cast_volume().is_none());
    }
}
