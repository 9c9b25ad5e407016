//! Camera transform pipeline
//!
//! The camera owns the per-frame derived state: view matrix, projection
//! matrix, the combined inverse used for world-space direction
//! reconstruction (sky/background passes), and the view frustum. All four
//! are recomputed lazily through an explicit dirty-flag dependency graph,
//! so a frame in which nothing changed recomputes nothing.
//!
//! Propagation table (transitions only clear a flag after recomputing, and
//! may set downstream flags):
//!
//! | event                         | sets                  |
//! |-------------------------------|-----------------------|
//! | set_fov / set_near / set_far  | PROJECTION, FRUSTUM   |
//! | set_aspect_ratio (resize)     | PROJECTION, FRUSTUM   |
//! | set_frame (transform change)  | VIEW                  |
//! | view recomputed               | DERIVED, FRUSTUM      |
//! | projection recomputed         | DERIVED, FRUSTUM      |
//!
//! Every setter short-circuits on exact equality with the current value, so
//! re-sending unchanged state never dirties anything. [`Camera::refresh`]
//! must run once per frame before any consumer reads a matrix or queries
//! the frustum.

use bitflags::bitflags;

use crate::foundation::math::{utils, Mat4, Mat4Ext, Transform, Vec3};
use crate::geometry::Frustum;

bitflags! {
    /// Staleness markers for the camera's derived values
    ///
    /// A set bit means the corresponding value no longer reflects its
    /// inputs; it is cleared only when [`Camera::refresh`] recomputes it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// View matrix is stale (spatial frame changed)
        const VIEW = 1 << 0;
        /// Projection matrix is stale (fov/near/far/aspect changed)
        const PROJECTION = 1 << 1;
        /// Derived inverse matrix is stale (view or projection recomputed)
        const DERIVED = 1 << 2;
        /// Frustum planes are stale (any upstream input changed)
        const FRUSTUM = 1 << 3;
    }
}

/// Per-category recomputation counters
///
/// Incremented each time [`Camera::refresh`] actually recomputes a value.
/// Useful for profiling and for asserting that equality short-circuits
/// really elide work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    /// View matrix recomputations
    pub view: u32,
    /// Projection matrix recomputations
    pub projection: u32,
    /// Derived inverse recomputations
    pub derived: u32,
    /// Frustum rebuilds
    pub frustum: u32,
}

/// Perspective camera with lazily derived matrices and frustum
#[derive(Debug, Clone)]
pub struct Camera {
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,

    position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    view: Mat4,
    projection: Mat4,
    derived_inverse: Mat4,
    frustum: Frustum,

    dirty: DirtyFlags,
    stats: RecomputeStats,
}

impl Camera {
    /// Create a perspective camera at the origin looking down Z-
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees (stored in radians)
    /// * `aspect` - Viewport aspect ratio (width / height)
    /// * `near` - Distance to the near clipping plane (must be > 0)
    /// * `far` - Distance to the far clipping plane (must be > near)
    ///
    /// All derived values start dirty; the first [`refresh`](Self::refresh)
    /// computes everything.
    #[must_use]
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov: utils::deg_to_rad(fov_degrees),
            near,
            far,
            aspect,
            position: Vec3::zeros(),
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            derived_inverse: Mat4::identity(),
            frustum: Frustum::default(),
            dirty: DirtyFlags::all(),
            stats: RecomputeStats::default(),
        }
    }

    /// Set the vertical field of view in radians
    ///
    /// Unchanged values are a complete no-op: no flag is dirtied and no
    /// recomputation will be triggered by the next refresh.
    pub fn set_fov(&mut self, fov: f32) {
        if self.fov == fov {
            return;
        }
        self.fov = fov;
        self.dirty |= DirtyFlags::PROJECTION | DirtyFlags::FRUSTUM;
    }

    /// Set the vertical field of view in degrees
    ///
    /// Degree-taking counterpart of [`set_fov`](Self::set_fov), matching the
    /// unit of [`perspective`](Self::perspective).
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.set_fov(utils::deg_to_rad(fov_degrees));
    }

    /// Set the near clipping distance
    pub fn set_near(&mut self, near: f32) {
        if self.near == near {
            return;
        }
        self.near = near;
        self.dirty |= DirtyFlags::PROJECTION | DirtyFlags::FRUSTUM;
    }

    /// Set the far clipping distance
    pub fn set_far(&mut self, far: f32) {
        if self.far == far {
            return;
        }
        self.far = far;
        self.dirty |= DirtyFlags::PROJECTION | DirtyFlags::FRUSTUM;
    }

    /// Update the aspect ratio from the viewport collaborator
    ///
    /// Called on surface resize. Shares the equality short-circuit of the
    /// other projection inputs, so resize events that settle on the same
    /// dimensions cost nothing.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if self.aspect == aspect {
            return;
        }
        log::debug!("camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        self.aspect = aspect;
        self.dirty |= DirtyFlags::PROJECTION | DirtyFlags::FRUSTUM;
    }

    /// Transform-change notification from the spatial collaborator
    ///
    /// Whatever mutates the camera's world transform calls this with the new
    /// frame; an unchanged frame dirties nothing. Only VIEW is marked here:
    /// the view recompute itself cascades to the downstream values.
    pub fn set_frame(&mut self, frame: &Transform) {
        let forward = frame.forward();
        let up = frame.up();
        let right = frame.right();

        if self.position == frame.position
            && self.forward == forward
            && self.up == up
            && self.right == right
        {
            return;
        }

        self.position = frame.position;
        self.forward = forward;
        self.up = up;
        self.right = right;
        self.dirty |= DirtyFlags::VIEW;
    }

    /// Settle every dirty derived value
    ///
    /// Must run once per frame before renderers read matrices or query the
    /// frustum; afterwards all four dirty flags are clear. Recompute order
    /// follows the dependency graph: view and projection first (each marks
    /// DERIVED and FRUSTUM), then the derived inverse, then the frustum.
    pub fn refresh(&mut self) {
        if self.dirty.contains(DirtyFlags::VIEW) {
            self.view = Mat4::look_at(self.position, self.position + self.forward, self.up);
            self.stats.view += 1;
            self.dirty.remove(DirtyFlags::VIEW);
            self.dirty |= DirtyFlags::DERIVED | DirtyFlags::FRUSTUM;
        }

        if self.dirty.contains(DirtyFlags::PROJECTION) {
            self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
            self.stats.projection += 1;
            self.dirty.remove(DirtyFlags::PROJECTION);
            self.dirty |= DirtyFlags::DERIVED | DirtyFlags::FRUSTUM;
        }

        if self.dirty.contains(DirtyFlags::DERIVED) {
            self.recompute_derived_inverse();
            self.stats.derived += 1;
            self.dirty.remove(DirtyFlags::DERIVED);
        }

        if self.dirty.contains(DirtyFlags::FRUSTUM) {
            self.frustum.set_from_camera(
                self.position,
                self.forward,
                self.up,
                self.right,
                self.fov,
                self.aspect,
                self.near,
                self.far,
            );
            self.stats.frustum += 1;
            self.dirty.remove(DirtyFlags::FRUSTUM);
        }
    }

    /// Rotation-only view premultiplied by projection, inverted.
    ///
    /// Used to reconstruct world-space directions from clip-space positions
    /// (sky rendering). If the combined matrix is numerically degenerate
    /// (near == far, zero-length forward) the previous value is kept and a
    /// warning logged; degenerate inputs are a caller precondition.
    fn recompute_derived_inverse(&mut self) {
        let mut rotation_view = self.view;
        rotation_view[(0, 3)] = 0.0;
        rotation_view[(1, 3)] = 0.0;
        rotation_view[(2, 3)] = 0.0;

        match (self.projection * rotation_view).try_inverse() {
            Some(inverse) => self.derived_inverse = inverse,
            None => {
                log::warn!("camera projection-view matrix is not invertible; keeping previous inverse");
            }
        }
    }

    /// Current dirty flags (empty after [`refresh`](Self::refresh))
    #[must_use]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Recompute counters for diagnostics and tests
    #[must_use]
    pub fn stats(&self) -> RecomputeStats {
        self.stats
    }

    /// World-to-view matrix (valid after refresh)
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// View-to-clip projection matrix (valid after refresh)
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Inverse of projection x rotation-only view (valid after refresh)
    #[must_use]
    pub fn derived_inverse(&self) -> &Mat4 {
        &self.derived_inverse
    }

    /// The view frustum (valid after refresh)
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Vertical field of view in radians
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Near clipping distance
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping distance
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Aspect ratio
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Camera position in world space
    #[must_use]
    pub fn position(&self) -> &Vec3 {
        &self.position
    }
}
