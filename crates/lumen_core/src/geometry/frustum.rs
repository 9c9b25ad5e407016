//! Six-plane view frustum and box classification

use crate::foundation::math::Vec3;
use crate::geometry::{AxisAlignedBox, Plane};

/// Result of testing a bounding volume against the frustum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// The volume is entirely inside all six planes
    Inside,
    /// The volume is entirely behind at least one plane
    Outside,
    /// The volume straddles at least one plane boundary
    Intersecting,
}

/// Index of one of the six frustum planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum FrustumPlane {
    /// Top clipping plane
    Top = 0,
    /// Bottom clipping plane
    Bottom = 1,
    /// Left clipping plane
    Left = 2,
    /// Right clipping plane
    Right = 3,
    /// Near clipping plane
    Near = 4,
    /// Far clipping plane
    Far = 5,
}

/// Camera view frustum as six inward-facing planes.
///
/// Plane storage is fixed-order ({Top, Bottom, Left, Right, Near, Far}) and
/// rewritten in place whenever the owning camera's view or projection inputs
/// change. Every plane's winding is chosen so that a positive
/// [`Plane::distance_to_point`] means "inside" consistently across all six;
/// [`classify`](Self::classify) relies on that convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            planes: [Plane::default(); 6],
        }
    }
}

impl Frustum {
    /// Access an individual plane
    #[must_use]
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// All six planes in fixed index order
    #[must_use]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Rebuild the six planes in place from the camera description
    ///
    /// The eight frustum corner points are derived from the camera position,
    /// its forward/up/right basis, the vertical field of view (radians),
    /// aspect ratio, and near/far distances; each plane is then set from
    /// three of those corners with a winding that keeps its normal pointing
    /// into the frustum volume.
    pub fn set_from_camera(
        &mut self,
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        right: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) {
        let tan_half_fovy = (fov_y * 0.5).tan();
        let near_half_height = tan_half_fovy * near;
        let near_half_width = near_half_height * aspect;
        let far_half_height = tan_half_fovy * far;
        let far_half_width = far_half_height * aspect;

        let near_center = position + forward * near;
        let far_center = position + forward * far;

        let near_top_left = near_center + up * near_half_height - right * near_half_width;
        let near_top_right = near_center + up * near_half_height + right * near_half_width;
        let near_bottom_left = near_center - up * near_half_height - right * near_half_width;
        let near_bottom_right = near_center - up * near_half_height + right * near_half_width;

        let far_top_left = far_center + up * far_half_height - right * far_half_width;
        let far_top_right = far_center + up * far_half_height + right * far_half_width;
        let far_bottom_left = far_center - up * far_half_height - right * far_half_width;
        let far_bottom_right = far_center - up * far_half_height + right * far_half_width;

        // Windings keep each normal inward: a point inside the volume gets a
        // positive distance from all six planes.
        self.planes[FrustumPlane::Top as usize]
            .set_from_points(near_top_right, near_top_left, far_top_left);
        self.planes[FrustumPlane::Bottom as usize]
            .set_from_points(near_bottom_left, near_bottom_right, far_bottom_right);
        self.planes[FrustumPlane::Left as usize]
            .set_from_points(near_top_left, far_bottom_left, far_top_left);
        self.planes[FrustumPlane::Right as usize]
            .set_from_points(near_top_right, far_top_right, far_bottom_right);
        self.planes[FrustumPlane::Near as usize]
            .set_from_points(near_top_left, near_top_right, near_bottom_right);
        self.planes[FrustumPlane::Far as usize]
            .set_from_points(far_top_right, far_top_left, far_bottom_left);
    }

    /// Classify an axis-aligned box against the frustum
    ///
    /// Per plane: if the box's positive support point is behind the plane,
    /// the whole box is outside and the scan short-circuits. If only the
    /// negative support point is behind, the box straddles that plane and
    /// the scan continues, since an outside verdict on a later plane still
    /// wins. Plane order affects only best-case speed, never the result.
    #[must_use]
    pub fn classify(&self, bounds: &AxisAlignedBox) -> Containment {
        let mut intersecting = false;

        for plane in &self.planes {
            let positive_support = bounds.support_point(plane.normal(), true);
            if plane.distance_to_point(&positive_support) < 0.0 {
                return Containment::Outside;
            }

            let negative_support = bounds.support_point(plane.normal(), false);
            if plane.distance_to_point(&negative_support) < 0.0 {
                intersecting = true;
            }
        }

        if intersecting {
            Containment::Intersecting
        } else {
            Containment::Inside
        }
    }
}
