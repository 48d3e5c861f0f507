//! Spatial node arena and world-matrix composition
//!
//! Two arena-backed tiers form the hierarchy: nodes (actor tier) parent
//! nodes, and parts (component tier) nest under parts of the same node.
//! Generational handles keep references stable across despawns; a stale
//! handle surfaces as [`SceneError`] instead of dangling. World matrices
//! are recomputed from local transforms on every call and never cached.

use log::debug;
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::scene::geometry::{PartKind, SpatialPart};
use crate::scene::SceneError;

new_key_type! {
    /// Stable handle to an actor-tier node
    pub struct NodeId;
}

new_key_type! {
    /// Stable handle to a component-tier part
    pub struct PartId;
}

/// An actor-tier entry in the spatial hierarchy.
///
/// Structural links (parent, children, owned parts) are mutated only
/// through [`SceneGraph`] operations; the local transform and flags are
/// free to edit through [`SceneGraph::node_mut`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    local: Transform,
    active: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parts: Vec<PartId>,
}

impl SceneNode {
    fn new(name: impl Into<String>, local: Transform) -> Self {
        Self {
            name: name.into(),
            local,
            active: true,
            parent: None,
            children: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Node name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The local transform relative to the parent node
    pub fn transform(&self) -> &Transform {
        &self.local
    }

    /// Mutable access to the local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.local
    }

    /// Whether the node participates in queries
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the node for queries
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The parent node, if attached to one
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes attached to this one
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parts owned by this node, in creation order
    pub fn parts(&self) -> &[PartId] {
        &self.parts
    }
}

/// Arena-backed spatial hierarchy with on-demand world matrices.
///
/// Node enumeration follows creation order, which also fixes the scan
/// order queries use to break distance ties.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    parts: SlotMap<PartId, SpatialPart>,
    order: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new root node and return its handle
    pub fn spawn_node(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        let node = SceneNode::new(name, local);
        debug!("spawning node '{}'", node.name);
        let id = self.nodes.insert(node);
        self.order.push(id);
        id
    }

    /// Attach `child` under `parent`.
    ///
    /// Re-attaching a child to its current parent is a no-op. Fails on a
    /// self-attach, when the child already has a different parent, when
    /// the attachment would close a cycle, or on a stale handle.
    pub fn attach_node(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfAttach);
        }
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        match self.nodes.get(child).ok_or(SceneError::UnknownNode(child))?.parent {
            Some(existing) if existing == parent => return Ok(()),
            Some(_) => return Err(SceneError::AlreadyParented),
            None => {}
        }

        // The ancestor walk from `parent` must not reach `child`, or the
        // world-matrix recursion would never terminate.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(SceneError::WouldCycle);
            }
            cursor = self.nodes.get(current).and_then(|node| node.parent);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        debug!(
            "attached node '{}' under '{}'",
            self.nodes[child].name, self.nodes[parent].name
        );
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it a root node.
    ///
    /// Fails when `child` is not currently a child of `parent`.
    pub fn detach_node(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let child_parent = self.nodes.get(child).ok_or(SceneError::UnknownNode(child))?.parent;
        if child_parent != Some(parent) {
            return Err(SceneError::NotAChild);
        }

        self.nodes[parent].children.retain(|id| *id != child);
        self.nodes[child].parent = None;
        debug!("detached node '{}'", self.nodes[child].name);
        Ok(())
    }

    /// Remove a node, its parts, and its slot in the enumeration order.
    ///
    /// Children are promoted to root nodes rather than destroyed; their
    /// world pose changes accordingly. Use [`Self::despawn_subtree`] when
    /// destruction should propagate.
    pub fn despawn_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        let (parent, children, parts) = {
            let node = self.nodes.get(id).ok_or(SceneError::UnknownNode(id))?;
            (node.parent, node.children.clone(), node.parts.clone())
        };

        if let Some(parent) = parent {
            self.nodes[parent].children.retain(|child| *child != id);
        }
        for child in children {
            self.nodes[child].parent = None;
        }
        for part in parts {
            self.parts.remove(part);
        }

        let node = self.nodes.remove(id).ok_or(SceneError::UnknownNode(id))?;
        self.order.retain(|entry| *entry != id);
        debug!("despawned node '{}'", node.name);
        Ok(())
    }

    /// Remove a node and every node below it
    pub fn despawn_subtree(&mut self, id: NodeId) -> Result<(), SceneError> {
        let mut pending = vec![id];
        let mut subtree = Vec::new();
        while let Some(current) = pending.pop() {
            let node = self.nodes.get(current).ok_or(SceneError::UnknownNode(current))?;
            pending.extend(node.children.iter().copied());
            subtree.push(current);
        }

        // Leaves first so no despawn promotes a node that is about to go.
        for current in subtree.into_iter().rev() {
            self.despawn_node(current)?;
        }
        Ok(())
    }

    /// Immutable access to a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's transform and flags
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate live nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.order
            .iter()
            .filter_map(move |id| self.nodes.get(*id).map(|node| (*id, node)))
    }

    /// Compute the node's world matrix by walking up to its root.
    ///
    /// Each level composes `world(parent) * affine(local)`. A parented
    /// node's affine uses the parent's current world translation as its
    /// rotation pivot; root nodes use the plain local-origin affine.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let node = self.nodes.get(id).ok_or(SceneError::UnknownNode(id))?;
        match node.parent {
            Some(parent) => {
                let parent_world = self.world_matrix(parent)?;
                Ok(parent_world * node.local.to_matrix_about(translation_of(&parent_world)))
            }
            None => Ok(node.local.to_matrix()),
        }
    }

    /// Push a known parent world matrix down through a subtree, invoking
    /// `visit` with each node's freshly computed world matrix.
    ///
    /// With `parent_world` of `None` the subtree root composes as a root
    /// node. Agrees with [`Self::world_matrix`] at every node; use this
    /// form when one traversal should cover a whole subtree instead of
    /// each descendant re-walking to the root.
    pub fn visit_world_matrices<F>(
        &self,
        id: NodeId,
        parent_world: Option<&Mat4>,
        visit: &mut F,
    ) -> Result<(), SceneError>
    where
        F: FnMut(NodeId, &Mat4),
    {
        let node = self.nodes.get(id).ok_or(SceneError::UnknownNode(id))?;
        let world = match parent_world {
            Some(parent) => parent * node.local.to_matrix_about(translation_of(parent)),
            None => node.local.to_matrix(),
        };

        visit(id, &world);
        for child in &node.children {
            self.visit_world_matrices(*child, Some(&world), visit)?;
        }
        Ok(())
    }

    /// The node's forward vector (+Z basis column of the fresh world matrix)
    pub fn forward_vector(&self, id: NodeId) -> Result<Vec3, SceneError> {
        self.basis_vector(id, 2)
    }

    /// The node's right vector (+X basis column of the fresh world matrix)
    pub fn right_vector(&self, id: NodeId) -> Result<Vec3, SceneError> {
        self.basis_vector(id, 0)
    }

    /// The node's up vector (+Y basis column of the fresh world matrix)
    pub fn up_vector(&self, id: NodeId) -> Result<Vec3, SceneError> {
        self.basis_vector(id, 1)
    }

    fn basis_vector(&self, id: NodeId, column: usize) -> Result<Vec3, SceneError> {
        let world = self.world_matrix(id)?;
        let basis = Vec3::new(world[(0, column)], world[(1, column)], world[(2, column)]);
        Ok(basis.normalize())
    }

    /// Create a part owned by `node`, hanging off the node root
    pub fn add_part(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        kind: PartKind,
        local: Transform,
    ) -> Result<PartId, SceneError> {
        if !self.nodes.contains_key(node) {
            return Err(SceneError::UnknownNode(node));
        }
        let part = SpatialPart::new(name, node, kind, local);
        debug!("adding part '{}' to node '{}'", part.name(), self.nodes[node].name);
        let id = self.parts.insert(part);
        self.nodes[node].parts.push(id);
        Ok(id)
    }

    /// Nest `child` under `parent` within their shared owning node.
    ///
    /// Same preconditions as [`Self::attach_node`], plus both parts must
    /// belong to the same node.
    pub fn attach_part(&mut self, parent: PartId, child: PartId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfAttach);
        }
        let parent_owner = self.parts.get(parent).ok_or(SceneError::UnknownPart(parent))?.owner;
        let child_part = self.parts.get(child).ok_or(SceneError::UnknownPart(child))?;
        if child_part.owner != parent_owner {
            return Err(SceneError::DifferentOwner);
        }
        match child_part.parent {
            Some(existing) if existing == parent => return Ok(()),
            Some(_) => return Err(SceneError::AlreadyParented),
            None => {}
        }

        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(SceneError::WouldCycle);
            }
            cursor = self.parts.get(current).and_then(|part| part.parent);
        }

        self.parts[parent].children.push(child);
        self.parts[child].parent = Some(parent);
        Ok(())
    }

    /// Un-nest `child` from `parent`, re-attaching it to the node root
    pub fn detach_part(&mut self, parent: PartId, child: PartId) -> Result<(), SceneError> {
        if !self.parts.contains_key(parent) {
            return Err(SceneError::UnknownPart(parent));
        }
        let child_parent = self.parts.get(child).ok_or(SceneError::UnknownPart(child))?.parent;
        if child_parent != Some(parent) {
            return Err(SceneError::NotAChild);
        }

        self.parts[parent].children.retain(|id| *id != child);
        self.parts[child].parent = None;
        Ok(())
    }

    /// Remove a part; nested children re-attach to the node root
    pub fn remove_part(&mut self, id: PartId) -> Result<(), SceneError> {
        let (owner, parent, children) = {
            let part = self.parts.get(id).ok_or(SceneError::UnknownPart(id))?;
            (part.owner, part.parent, part.children.clone())
        };

        if let Some(parent) = parent {
            self.parts[parent].children.retain(|child| *child != id);
        }
        for child in children {
            self.parts[child].parent = None;
        }
        if let Some(node) = self.nodes.get_mut(owner) {
            node.parts.retain(|part| *part != id);
        }
        self.parts.remove(id).ok_or(SceneError::UnknownPart(id))?;
        Ok(())
    }

    /// Immutable access to a part
    pub fn part(&self, id: PartId) -> Option<&SpatialPart> {
        self.parts.get(id)
    }

    /// Mutable access to a part's transform and flags
    pub fn part_mut(&mut self, id: PartId) -> Option<&mut SpatialPart> {
        self.parts.get_mut(id)
    }

    /// Compute a part's world matrix: plain local-origin affines up the
    /// part chain, then the owning node's world matrix
    pub fn part_world_matrix(&self, id: PartId) -> Result<Mat4, SceneError> {
        let part = self.parts.get(id).ok_or(SceneError::UnknownPart(id))?;
        let local = part.transform().to_matrix();
        match part.parent {
            Some(parent) => Ok(self.part_world_matrix(parent)? * local),
            None => Ok(self.world_matrix(part.owner)? * local),
        }
    }
}

fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, Quat};
    use crate::scene::geometry::MeshGeometry;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn arbitrary_transform(seed: f32) -> Transform {
        let mut transform = Transform::from_position(Vec3::new(seed, -seed * 0.5, seed * 2.0));
        transform.rotation = Quat::from_axis_angle(&Vec3::y_axis(), seed * 0.3);
        transform.scale = Vec3::new(1.0 + seed * 0.1, 1.0, 1.0 + seed * 0.05);
        transform
    }

    #[test]
    fn test_three_level_chain_composes_local_affines() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn_node("root", arbitrary_transform(1.0));
        let child = graph.spawn_node("child", arbitrary_transform(2.0));
        let grandchild = graph.spawn_node("grandchild", arbitrary_transform(3.0));
        graph.attach_node(root, child).unwrap();
        graph.attach_node(child, grandchild).unwrap();

        let root_world = arbitrary_transform(1.0).to_matrix();
        let child_world = root_world
            * arbitrary_transform(2.0).to_matrix_about(translation_of(&root_world));
        let expected = child_world
            * arbitrary_transform(3.0).to_matrix_about(translation_of(&child_world));

        let actual = graph.world_matrix(grandchild).unwrap();
        assert_relative_eq!(actual, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_world_matrix_is_idempotent() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn_node("root", arbitrary_transform(1.5));
        let child = graph.spawn_node("child", arbitrary_transform(0.7));
        graph.attach_node(root, child).unwrap();

        let first = graph.world_matrix(child).unwrap();
        let second = graph.world_matrix(child).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parented_node_rotates_about_parent_position() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn_node("parent", Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
        let child = graph.spawn_node(
            "child",
            Transform::from_position_rotation(
                Vec3::zeros(),
                Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI),
            ),
        );
        graph.attach_node(parent, child).unwrap();

        let world = graph.world_matrix(child).unwrap();
        let origin = world.transform_point(&crate::foundation::math::Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(origin.x, 10.0, epsilon = EPSILON);
        assert_relative_eq!(origin.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(origin.z, 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_basis_vectors_follow_world_rotation() {
        let mut graph = SceneGraph::new();
        let node = graph.spawn_node(
            "spinner",
            Transform::from_position_rotation(
                Vec3::new(0.0, 2.0, 0.0),
                Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI),
            ),
        );

        assert_relative_eq!(graph.forward_vector(node).unwrap(), Vec3::x(), epsilon = EPSILON);
        assert_relative_eq!(graph.right_vector(node).unwrap(), -Vec3::z(), epsilon = EPSILON);
        assert_relative_eq!(graph.up_vector(node).unwrap(), Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_attach_rejects_self_and_double_parenting() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::identity());
        let c = graph.spawn_node("c", Transform::identity());

        assert_eq!(graph.attach_node(a, a), Err(SceneError::SelfAttach));
        graph.attach_node(a, b).unwrap();
        assert_eq!(graph.attach_node(c, b), Err(SceneError::AlreadyParented));
        // Re-attaching to the current parent is a no-op.
        assert_eq!(graph.attach_node(a, b), Ok(()));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::identity());
        let c = graph.spawn_node("c", Transform::identity());
        graph.attach_node(a, b).unwrap();
        graph.attach_node(b, c).unwrap();

        assert_eq!(graph.attach_node(c, a), Err(SceneError::WouldCycle));
    }

    #[test]
    fn test_detach_restores_root_composition() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn_node("parent", Transform::from_position(Vec3::new(3.0, 0.0, 0.0)));
        let child = graph.spawn_node("child", Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        graph.attach_node(parent, child).unwrap();
        graph.detach_node(parent, child).unwrap();

        let world = graph.world_matrix(child).unwrap();
        assert_relative_eq!(translation_of(&world), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert!(graph.node(parent).unwrap().children().is_empty());
    }

    #[test]
    fn test_detach_absent_child_fails() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::identity());

        assert_eq!(graph.detach_node(a, b), Err(SceneError::NotAChild));
    }

    #[test]
    fn test_despawn_promotes_children_and_drops_parts() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
        let c = graph.spawn_node("c", Transform::from_position(Vec3::new(2.0, 0.0, 0.0)));
        graph.attach_node(a, b).unwrap();
        graph.attach_node(b, c).unwrap();
        let part = graph
            .add_part(b, "hull", PartKind::Mesh(MeshGeometry::unit_cube()), Transform::identity())
            .unwrap();

        graph.despawn_node(b).unwrap();

        assert!(graph.node(b).is_none());
        assert!(graph.part(part).is_none());
        assert!(graph.node(a).unwrap().children().is_empty());
        assert_eq!(graph.node(c).unwrap().parent(), None);
        // Promoted to root, `c` now composes from its own local transform.
        let world = graph.world_matrix(c).unwrap();
        assert_relative_eq!(translation_of(&world), Vec3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_despawn_subtree_removes_every_descendant() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::identity());
        let c = graph.spawn_node("c", Transform::identity());
        let d = graph.spawn_node("d", Transform::identity());
        graph.attach_node(a, b).unwrap();
        graph.attach_node(b, c).unwrap();
        graph.attach_node(a, d).unwrap();

        graph.despawn_subtree(a).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.nodes().count(), 0);
    }

    #[test]
    fn test_downward_push_matches_upward_walks() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn_node("root", arbitrary_transform(0.9));
        let left = graph.spawn_node("left", arbitrary_transform(1.7));
        let right = graph.spawn_node("right", arbitrary_transform(2.3));
        let leaf = graph.spawn_node("leaf", arbitrary_transform(0.4));
        graph.attach_node(root, left).unwrap();
        graph.attach_node(root, right).unwrap();
        graph.attach_node(left, leaf).unwrap();

        let mut visited = Vec::new();
        graph
            .visit_world_matrices(root, None, &mut |id, world| visited.push((id, *world)))
            .unwrap();

        assert_eq!(visited.len(), 4);
        for (id, world) in visited {
            assert_relative_eq!(world, graph.world_matrix(id).unwrap(), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_part_world_matrix_chains_through_node() {
        let mut graph = SceneGraph::new();
        let node = graph.spawn_node("rig", arbitrary_transform(1.2));
        let base = graph
            .add_part(node, "base", PartKind::Anchor, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        let tip = graph
            .add_part(node, "tip", PartKind::Anchor, Transform::from_position(Vec3::new(0.0, 0.0, 2.0)))
            .unwrap();
        graph.attach_part(base, tip).unwrap();

        let expected = graph.world_matrix(node).unwrap()
            * Transform::from_position(Vec3::new(0.0, 1.0, 0.0)).to_matrix()
            * Transform::from_position(Vec3::new(0.0, 0.0, 2.0)).to_matrix();
        let actual = graph.part_world_matrix(tip).unwrap();
        assert_relative_eq!(actual, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_attach_part_requires_same_owner() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        let b = graph.spawn_node("b", Transform::identity());
        let part_a = graph.add_part(a, "pa", PartKind::Anchor, Transform::identity()).unwrap();
        let part_b = graph.add_part(b, "pb", PartKind::Anchor, Transform::identity()).unwrap();

        assert_eq!(graph.attach_part(part_a, part_b), Err(SceneError::DifferentOwner));
    }

    #[test]
    fn test_remove_part_reattaches_children_to_node_root() {
        let mut graph = SceneGraph::new();
        let node = graph.spawn_node("rig", Transform::identity());
        let base = graph
            .add_part(node, "base", PartKind::Anchor, Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let tip = graph
            .add_part(node, "tip", PartKind::Anchor, Transform::from_position(Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();
        graph.attach_part(base, tip).unwrap();

        graph.remove_part(base).unwrap();

        assert!(graph.part(base).is_none());
        let tip_part = graph.part(tip).unwrap();
        assert_eq!(tip_part.parent(), None);
        assert_eq!(graph.node(node).unwrap().parts(), &[tip]);
        // Without the removed parent in the chain, only the tip's local
        // transform applies.
        let world = graph.part_world_matrix(tip).unwrap();
        assert_relative_eq!(translation_of(&world), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_stale_handles_surface_as_errors() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn_node("a", Transform::identity());
        graph.despawn_node(a).unwrap();

        assert_eq!(graph.world_matrix(a), Err(SceneError::UnknownNode(a)));
        assert_eq!(graph.despawn_node(a), Err(SceneError::UnknownNode(a)));
    }
}
