//! Query-facing view of the spatial hierarchy

use crate::foundation::math::Mat4;
use crate::scene::geometry::SpatialPart;
use crate::scene::node::{NodeId, PartId, SceneGraph, SceneNode};

/// Trait for scene storage the query pipeline scans.
///
/// Allows pluggable hierarchy implementations behind the intersection
/// engine. Following Game Engine Architecture Chapter 11.2.7.4 pattern;
/// [`SceneGraph`] is the arena-backed implementation, and tests can stand
/// in lighter fixtures.
pub trait SceneIndex: Send + Sync {
    /// Live nodes eligible for queries, in creation order.
    ///
    /// Creation order is the scan order; queries use it to break exact
    /// distance ties deterministically.
    fn active_nodes(&self) -> Vec<NodeId>;

    /// Look up a node by handle
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Look up a part by handle
    fn part(&self, id: PartId) -> Option<&SpatialPart>;

    /// The part's current world matrix, or `None` when the handle or its
    /// chain no longer resolves
    fn part_world_matrix(&self, id: PartId) -> Option<Mat4>;
}

impl SceneIndex for SceneGraph {
    fn active_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        SceneGraph::node(self, id)
    }

    fn part(&self, id: PartId) -> Option<&SpatialPart> {
        SceneGraph::part(self, id)
    }

    fn part_world_matrix(&self, id: PartId) -> Option<Mat4> {
        SceneGraph::part_world_matrix(self, id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;

    #[test]
    fn test_active_nodes_follow_creation_order() {
        let mut graph = SceneGraph::new();
        let first = graph.spawn_node("first", Transform::identity());
        let second = graph.spawn_node("second", Transform::identity());
        let third = graph.spawn_node("third", Transform::identity());

        let index: &dyn SceneIndex = &graph;
        assert_eq!(index.active_nodes(), vec![first, second, third]);
    }

    #[test]
    fn test_inactive_and_despawned_nodes_are_skipped() {
        let mut graph = SceneGraph::new();
        let first = graph.spawn_node("first", Transform::identity());
        let second = graph.spawn_node("second", Transform::identity());
        let third = graph.spawn_node("third", Transform::identity());

        graph.node_mut(second).unwrap().set_active(false);
        graph.despawn_node(first).unwrap();

        let index: &dyn SceneIndex = &graph;
        assert_eq!(index.active_nodes(), vec![third]);
    }
}
