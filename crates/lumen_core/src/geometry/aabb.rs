//! Axis-aligned bounding box primitive

use crate::foundation::math::Vec3;

/// Axis-aligned box given by its minimum and maximum corners.
///
/// Invariant: `min[i] <= max[i]` on every axis. The box is a pure value
/// type; the only non-trivial query is the support point used by the
/// frustum's plane tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBox {
    /// Minimum corner
    pub min: Vec3,

    /// Maximum corner
    pub max: Vec3,
}

impl AxisAlignedBox {
    /// Create a box from its two extreme corners
    ///
    /// Debug builds assert the `min <= max` invariant per axis.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "AxisAlignedBox corners out of order: min {min:?}, max {max:?}"
        );
        Self { min, max }
    }

    /// Create a box from its center and half-extents
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Center of the box
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box along each axis
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The box vertex most extreme along `normal`
    ///
    /// With `positive` set, returns the corner farthest along the direction
    /// of `normal`; otherwise the corner farthest against it. Each coordinate
    /// is picked independently from `min`/`max` by the sign of the matching
    /// normal component, a zero component taking the positive branch.
    #[must_use]
    pub fn support_point(&self, normal: &Vec3, positive: bool) -> Vec3 {
        let pick = |component: f32, min: f32, max: f32| {
            if (component >= 0.0) == positive {
                max
            } else {
                min
            }
        };

        Vec3::new(
            pick(normal.x, self.min.x, self.max.x),
            pick(normal.y, self.min.y, self.max.y),
            pick(normal.z, self.min.z, self.max.z),
        )
    }
}
