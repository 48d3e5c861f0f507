//! Screen-space picking
//!
//! Orchestrates the picking pipeline: screen coordinates → camera →
//! query engine. A pick starts as a view-space ray built from pixel
//! coordinates and the projection, is resolved to world space through
//! the inverse view matrix, and then runs the ordinary ray cast.
//!
//! The two-step split exists so callers can build rays while only the
//! projection is known and resolve them later against whichever camera
//! ends up active; [`cast_screen_ray`] does both in one call.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Point3, Vec3};
use crate::physics::raycast::{HitResult, IntersectionEngine, QueryError, QueryFilter, RayQuery};
use crate::scene::SceneIndex;

/// Window surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport from pixel dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Matrices a camera must expose for picking
///
/// Decouples ray construction from any concrete camera type; anything
/// that can produce view and projection matrices can drive a pick.
pub trait CameraMatrices {
    /// World-to-view transformation
    fn view_matrix(&self) -> Mat4;

    /// View-to-clip projection
    fn projection_matrix(&self) -> Mat4;
}

/// Position-and-target camera for perspective picking
///
/// Represents a camera in 3D space with position, orientation, and
/// projection parameters.
///
/// # Coordinate System
/// Uses the engine's right-handed Y-up convention in view space:
/// - X+ = Right
/// - Y+ = Up
/// - Z+ = Forward
///
/// # Performance Notes
/// Matrix calculations are performed on-demand rather than cached. For
/// performance-critical applications with static cameras, consider
/// caching the computed matrices.
#[derive(Debug, Clone)]
pub struct TargetCamera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians (for perspective projection)
    pub fov: f32,

    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl TargetCamera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Field of view angle in degrees (converted to radians internally)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Configure camera to look at a specific point with custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs aspect ratio changes when the difference is significant
    /// (> 0.01) to reduce log noise during window resize events.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Generate view matrix for world-to-camera space transformation
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Generate perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl CameraMatrices for TargetCamera {
    fn view_matrix(&self) -> Mat4 {
        self.get_view_matrix()
    }

    fn projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix()
    }
}

/// Build a view-space ray from pixel coordinates.
///
/// The returned query is marked screen-space and cannot be cast until
/// [`resolve_screen_ray`] moves it into world space.
///
/// # Mathematical Process
/// 1. Map pixels to normalized device coordinates, flipping Y so screen
///    top maps to view-space up
/// 2. Divide by the projection's focal terms to undo the projection at
///    unit view depth
/// 3. The view-space ray runs from the view origin through `(x, y, 1)`
///
/// # Arguments
/// * `camera` - Source of the projection matrix
/// * `viewport` - Surface dimensions for the pixel-to-NDC mapping
/// * `screen_x` - Pixel X, left to right
/// * `screen_y` - Pixel Y, top to bottom
/// * `range` - Maximum distance for the eventual cast
pub fn build_screen_ray(
    camera: &impl CameraMatrices,
    viewport: Viewport,
    screen_x: f32,
    screen_y: f32,
    range: f32,
) -> RayQuery {
    let projection = camera.projection_matrix();
    let ndc_x = 2.0 * screen_x / viewport.width as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * screen_y / viewport.height as f32;
    let view_x = ndc_x / projection[(0, 0)];
    let view_y = ndc_y / projection[(1, 1)];

    RayQuery::screen_space(Vec3::zeros(), Vec3::new(view_x, view_y, 1.0), range)
}

/// Resolve a view-space ray into a castable world-space query.
///
/// Transforms the ray through the inverse view matrix, renormalizes the
/// direction, and clears the screen-space mark. The filter carries over
/// unchanged.
pub fn resolve_screen_ray(
    query: RayQuery,
    camera: &impl CameraMatrices,
) -> Result<RayQuery, QueryError> {
    let inverse_view = camera
        .view_matrix()
        .try_inverse()
        .ok_or(QueryError::CameraNotInvertible)?;

    let origin = inverse_view.transform_point(&Point3::from(query.origin())).coords;
    let direction = inverse_view.transform_vector(&query.direction());
    let resolved = RayQuery::new(origin, direction, query.range())?;
    Ok(resolved.with_filter(query.filter))
}

/// Pick through a pixel: build, resolve, and cast in one call.
///
/// The ray range comes from the engine's configured screen ray range.
pub fn cast_screen_ray(
    engine: &mut IntersectionEngine,
    scene: &dyn SceneIndex,
    camera: &impl CameraMatrices,
    viewport: Viewport,
    screen_x: f32,
    screen_y: f32,
    filter: QueryFilter,
) -> Result<HitResult, QueryError> {
    let range = engine.settings().screen_ray_range;
    let query = build_screen_ray(camera, viewport, screen_x, screen_y, range).with_filter(filter);
    let resolved = resolve_screen_ray(query, camera)?;
    engine.cast_ray(scene, &resolved)
}
