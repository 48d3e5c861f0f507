//! Primitive geometric types and intersection algorithms
//!
//! Provides the ray and triangle primitives the narrow phase is built on,
//! with exact intersection testing.

use crate::foundation::math::{Vec2, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (should be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    ///
    /// The direction is normalized here and must be non-zero; query entry
    /// points reject zero-length directions before building a ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A triangle for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Triangle vertices in world space
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculates the geometric normal of the triangle (right-hand rule)
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    ///
    /// This is one of the fastest ray-triangle intersection algorithms.
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000001;  // Very small value for numerical stability

        // Calculate edges from v0
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        // Calculate determinant
        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);

        // Hit outside triangle on u axis?
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);

        // Hit outside triangle on v axis?
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        // Calculate t (distance along ray)
        let t = f * edge2.dot(&q);

        // Accept any positive distance (including very small values)
        if t >= 0.0 {
            Some((t, u, v)) // Hit!
        } else {
            None // Behind ray origin
        }
    }
}

/// Interpolate per-vertex attributes at the barycentric coordinates
/// returned by [`Triangle::intersect_ray`].
///
/// `u` weights the second vertex and `v` the third, with the first vertex
/// taking the remainder.
pub fn interpolate_barycentric(a0: Vec2, a1: Vec2, a2: Vec2, u: f32, v: f32) -> Vec2 {
    a0 * (1.0 - u - v) + a1 * u + a2 * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        )
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(ray.direction.magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(ray.point_at(3.0), Vec3::new(0.0, 0.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_triangle_intersect_ray_reports_distance_and_barycentrics() {
        let triangle = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 0.0), Vec3::new(0.0, 0.0, 1.0));

        let (t, u, v) = triangle.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 5.0, epsilon = EPSILON);
        assert_relative_eq!(u, 0.25, epsilon = EPSILON);
        assert_relative_eq!(v, 0.25, epsilon = EPSILON);
    }

    #[test]
    fn test_triangle_intersect_ray_misses_outside() {
        let triangle = unit_triangle();
        let ray = Ray::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_triangle_intersect_ray_rejects_hits_behind_origin() {
        let triangle = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_triangle_intersect_ray_parallel_is_a_miss() {
        let triangle = unit_triangle();
        let ray = Ray::new(Vec3::new(0.0, -1.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(triangle.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_triangle_normal_follows_right_hand_rule() {
        let triangle = Triangle::new(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(triangle.normal(), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_interpolate_barycentric_blends_vertex_attributes() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);

        assert_relative_eq!(interpolate_barycentric(a, b, c, 0.0, 0.0), a, epsilon = EPSILON);
        assert_relative_eq!(interpolate_barycentric(a, b, c, 1.0, 0.0), b, epsilon = EPSILON);
        assert_relative_eq!(
            interpolate_barycentric(a, b, c, 0.25, 0.25),
            Vec2::new(0.25, 0.25),
            epsilon = EPSILON
        );
    }
}
