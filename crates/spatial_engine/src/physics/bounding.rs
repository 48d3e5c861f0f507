//! Bounding volumes for the broad phase
//!
//! Oriented and axis-aligned boxes with ray and box-box intersection tests,
//! following Game Engine Architecture 3rd Edition, Chapter 13 (collision
//! detection primitives). Local volumes are fixed at geometry load; world
//! volumes are rebuilt from the owning part's world transform on every
//! query and never cached.

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::physics::primitives::Ray;

/// Oriented bounding box in mesh-local space.
///
/// Computed once from raw vertex extents when geometry loads. The local
/// center stays at the mesh origin under [`Self::from_vertex_extents`];
/// arbitrary centers are accepted through [`Self::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Offset of the box center from the mesh origin
    pub center: Vec3,
    /// Half-size along each local axis
    pub extents: Vec3,
    /// Local orientation of the box
    pub orientation: Quat,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            extents: Vec3::zeros(),
            orientation: Quat::identity(),
        }
    }
}

impl BoundingVolume {
    /// Create a bounding volume from explicit components
    pub fn new(center: Vec3, extents: Vec3, orientation: Quat) -> Self {
        Self { center, extents, orientation }
    }

    /// Build the local volume from raw mesh vertex positions.
    ///
    /// Extents are half the per-axis vertex span; the center stays at the
    /// mesh origin and the orientation is identity. Assumes non-empty
    /// input; an empty iterator yields a degenerate zero-extent box.
    pub fn from_vertex_extents<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut min = Vec3::from_element(f32::MAX);
        let mut max = Vec3::from_element(f32::MIN);
        let mut any = false;

        for position in positions {
            min = min.inf(&position);
            max = max.sup(&position);
            any = true;
        }

        if !any {
            return Self::default();
        }

        Self {
            center: Vec3::zeros(),
            extents: (max - min) * 0.5,
            orientation: Quat::identity(),
        }
    }

    /// Whether the volume has no spatial extent
    pub fn is_degenerate(&self) -> bool {
        self.extents.x <= 0.0 && self.extents.y <= 0.0 && self.extents.z <= 0.0
    }

    /// Combine this local volume with a world transform to produce the
    /// world-space box used by the broad phase.
    ///
    /// World center = world position + local center (raw offset), world
    /// extents = world scale ⊙ local extents, world orientation = the
    /// world rotation. The world transform is decomposed fresh on every
    /// call.
    pub fn to_world(&self, world: &Mat4) -> WorldBox {
        let decomposed = Transform::from_matrix(*world);
        WorldBox {
            center: decomposed.position + self.center,
            extents: decomposed.scale.component_mul(&self.extents),
            orientation: decomposed.rotation,
        }
    }
}

/// World-space oriented bounding box produced per query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    /// Box center in world space
    pub center: Vec3,
    /// Half-size along each box axis
    pub extents: Vec3,
    /// Box orientation in world space
    pub orientation: Quat,
}

impl WorldBox {
    /// Create a world-space box from explicit components
    pub fn new(center: Vec3, extents: Vec3, orientation: Quat) -> Self {
        Self { center, extents, orientation }
    }

    /// The three box axes in world space
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.orientation * Vec3::x(),
            self.orientation * Vec3::y(),
            self.orientation * Vec3::z(),
        ]
    }

    /// Test ray intersection using the slab method in the box-local frame.
    /// Returns the distance to the entry point if the ray intersects,
    /// None otherwise.
    /// Based on "An Efficient and Robust Ray-Box Intersection Algorithm"
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inverse = self.orientation.inverse();
        let origin = inverse * (ray.origin - self.center);
        let dir = inverse * ray.direction;

        let inv_dir = Vec3::new(
            if dir.x != 0.0 { 1.0 / dir.x } else { f32::INFINITY },
            if dir.y != 0.0 { 1.0 / dir.y } else { f32::INFINITY },
            if dir.z != 0.0 { 1.0 / dir.z } else { f32::INFINITY },
        );

        let t1 = (-self.extents.x - origin.x) * inv_dir.x;
        let t2 = (self.extents.x - origin.x) * inv_dir.x;
        let t3 = (-self.extents.y - origin.y) * inv_dir.y;
        let t4 = (self.extents.y - origin.y) * inv_dir.y;
        let t5 = (-self.extents.z - origin.z) * inv_dir.z;
        let t6 = (self.extents.z - origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            // Return entry point distance (or 0 if we're inside the box)
            Some(tmin.max(0.0))
        } else {
            None
        }
    }

    /// Test if this box intersects another oriented box.
    /// Uses the Separating Axis Theorem over the 15 candidate axes:
    /// - 3 face normals per box
    /// - 9 edge-edge cross products
    pub fn intersects_box(&self, other: &WorldBox) -> bool {
        const EPSILON: f32 = 0.000001;

        // Helper to project a box onto an axis: interval center and radius
        fn project_box(center: Vec3, extents: Vec3, axes: &[Vec3; 3], axis: Vec3) -> (f32, f32) {
            let mid = axis.dot(&center);
            let radius = extents.x * axis.dot(&axes[0]).abs()
                + extents.y * axis.dot(&axes[1]).abs()
                + extents.z * axis.dot(&axes[2]).abs();
            (mid, radius)
        }

        let axes_a = self.axes();
        let axes_b = other.axes();

        // Test axis (returns false if it's a separating axis)
        let test_axis = |axis: Vec3| -> bool {
            let axis_len_sq = axis.magnitude_squared();
            if axis_len_sq < EPSILON {
                return true; // Degenerate axis, skip
            }

            let normalized_axis = axis * (1.0 / axis_len_sq.sqrt());
            let (mid_a, radius_a) = project_box(self.center, self.extents, &axes_a, normalized_axis);
            let (mid_b, radius_b) = project_box(other.center, other.extents, &axes_b, normalized_axis);

            (mid_b - mid_a).abs() <= radius_a + radius_b
        };

        // Test 1-6: face normals of both boxes
        for axis in axes_a.iter().chain(axes_b.iter()) {
            if !test_axis(*axis) {
                return false;
            }
        }

        // Test 7-15: all 9 edge-edge cross products
        for axis_a in &axes_a {
            for axis_b in &axes_b {
                if !test_axis(axis_a.cross(axis_b)) {
                    return false;
                }
            }
        }

        // No separating axis found = boxes intersect
        true
    }
}

/// Axis-Aligned Bounding Box, the cast volume of the axis-aligned box cast
#[derive(Debug, Clone, Copy)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// View this AABB as an identity-orientation world box so it can share
    /// the oriented intersection tests
    pub fn to_world_box(&self) -> WorldBox {
        WorldBox::new(self.center(), self.extents(), Quat::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_from_vertex_extents_spans_the_mesh() {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.25, -0.1, 0.0),
        ];

        let volume = BoundingVolume::from_vertex_extents(positions);
        assert_relative_eq!(volume.center, Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(volume.extents, Vec3::new(0.5, 0.5, 0.5), epsilon = EPSILON);
        assert!(!volume.is_degenerate());
    }

    #[test]
    fn test_from_vertex_extents_empty_is_degenerate() {
        let volume = BoundingVolume::from_vertex_extents(std::iter::empty());
        assert!(volume.is_degenerate());
    }

    #[test]
    fn test_to_world_composes_position_scale_rotation() {
        let local = BoundingVolume::new(
            Vec3::zeros(),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );

        let mut world_transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        world_transform.rotation = Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI);
        world_transform.scale = Vec3::new(2.0, 2.0, 2.0);

        let world = local.to_world(&world_transform.to_matrix());
        assert_relative_eq!(world.center, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(world.extents, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(world.orientation, world_transform.rotation, epsilon = EPSILON);
    }

    #[test]
    fn test_to_world_offsets_center_without_rotating_it() {
        // The local center is added to the world position as a raw offset.
        let local = BoundingVolume::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );

        let mut world_transform = Transform::from_position(Vec3::new(5.0, 0.0, 0.0));
        world_transform.rotation = Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI);

        let world = local.to_world(&world_transform.to_matrix());
        assert_relative_eq!(world.center, Vec3::new(5.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_intersect_ray_hits_axis_aligned_box_center() {
        let world_box = WorldBox::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        let entry = world_box.intersect_ray(&ray).unwrap();
        assert_relative_eq!(entry, 4.5, epsilon = EPSILON);
    }

    #[test]
    fn test_intersect_ray_aimed_away_misses() {
        let world_box = WorldBox::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(world_box.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_intersect_ray_from_inside_reports_zero_entry() {
        let world_box = WorldBox::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), Quat::identity());
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world_box.intersect_ray(&ray).unwrap(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_intersect_ray_respects_orientation() {
        // A half-unit cube rotated 45 degrees presents its edge to the ray,
        // so the entry point moves closer than the flat face would be.
        let world_box = WorldBox::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::from_axis_angle(&Vec3::y_axis(), constants::QUARTER_PI),
        );
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        let entry = world_box.intersect_ray(&ray).unwrap();
        let half_diagonal = 0.5 * std::f32::consts::SQRT_2;
        assert_relative_eq!(entry, 5.0 - half_diagonal, epsilon = EPSILON);
    }

    #[test]
    fn test_intersects_box_overlap_and_separation() {
        let a = WorldBox::new(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), Quat::identity());
        let b = WorldBox::new(
            Vec3::new(0.8, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );
        let c = WorldBox::new(
            Vec3::new(1.2, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::identity(),
        );

        assert!(a.intersects_box(&b));
        assert!(!a.intersects_box(&c));
    }

    #[test]
    fn test_intersects_box_rotation_extends_reach() {
        // Axis-aligned, these boxes are 0.2 apart. Rotating one 45 degrees
        // about Y swings its corner across the gap.
        let a = WorldBox::new(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5), Quat::identity());
        let rotated = WorldBox::new(
            Vec3::new(1.2, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
            Quat::from_axis_angle(&Vec3::y_axis(), constants::QUARTER_PI),
        );

        assert!(a.intersects_box(&rotated));
    }

    #[test]
    fn test_aabb_round_trips_center_and_extents() {
        let aabb = AABB::from_center_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.5));
        assert_relative_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(aabb.extents(), Vec3::new(0.5, 1.0, 1.5), epsilon = EPSILON);

        let world_box = aabb.to_world_box();
        assert_relative_eq!(world_box.center, aabb.center(), epsilon = EPSILON);
        assert_relative_eq!(world_box.orientation, Quat::identity(), epsilon = EPSILON);
    }
}
