//! Math utilities and types
//!
//! Provides the fundamental math types for the rendering core. All spatial
//! values use a right-handed, Y-up coordinate system: X+ is right, Y+ is up,
//! and the camera looks down Z-.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Spatial frame of an object in world space: position plus orientation.
///
/// This is the surface the camera consumes from whatever owns entity
/// placement. The basis accessors derive unit-length world-space axes from
/// the rotation quaternion; callers that mutate a transform are responsible
/// for pushing the new frame into interested consumers (the camera exposes
/// [`crate::camera::Camera::set_frame`] for exactly that).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a transform at `position` oriented so that its forward axis
    /// points at `target`.
    ///
    /// The `up` hint does not need to be perpendicular to the view direction;
    /// the basis is orthonormalized during construction.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(&up.normalize()).normalize();
        let frame_up = right.cross(&forward);

        // Columns map local axes (X right, Y up, Z backward) to world space.
        let rotation_mat3 = Mat3::new(
            right.x, frame_up.x, -forward.x, //
            right.y, frame_up.y, -forward.y, //
            right.z, frame_up.z, -forward.z,
        );
        let rotation = Quat::from_matrix(&rotation_mat3);

        Self { position, rotation }
    }

    /// World-space forward axis (local Z-)
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }

    /// World-space up axis (local Y+)
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 1.0, 0.0)
    }

    /// World-space right axis (local X+)
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::new(1.0, 0.0, 0.0)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    #[must_use]
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with the camera matrix constructors
pub trait Mat4Ext {
    /// Create a perspective projection matrix
    ///
    /// `fov_y` is the vertical field of view in radians; depth maps to the
    /// [-1, 1] clip range of the target backend.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0; // Perspective divide trigger

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x, //
            0.0, 1.0, 0.0, -eye.y, //
            0.0, 0.0, 1.0, -eye.z, //
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0, //
            camera_up.x, camera_up.y, camera_up.z, 0.0, //
            -forward.x, -forward.y, -forward.z, 0.0, // Negative forward for right-handed
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity_basis() {
        let transform = Transform::identity();

        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(transform.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_looking_at_points_forward_at_target() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let target = Vec3::zeros();
        let transform = Transform::looking_at(eye, target, Vec3::new(0.0, 1.0, 0.0));

        let expected_forward = (target - eye).normalize();
        assert_relative_eq!(transform.forward(), expected_forward, epsilon = 1e-5);
        assert_relative_eq!(transform.position, eye, epsilon = EPSILON);
    }

    #[test]
    fn test_basis_is_right_handed() {
        let transform = Transform::looking_at(
            Vec3::new(3.0, 1.0, -2.0),
            Vec3::new(0.0, 0.5, 4.0),
            Vec3::new(0.0, 1.0, 0.0),
        );

        // forward x up = right in a right-handed frame
        let cross = transform.forward().cross(&transform.up());
        assert_relative_eq!(cross, transform.right(), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));

        let eye_h = Vec4::new(eye.x, eye.y, eye.z, 1.0);
        let in_view = view * eye_h;
        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_view_direction_maps_to_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));

        // A point in front of the camera lands on the view-space Z- axis
        let point = Vec4::new(0.0, 0.0, 2.0, 1.0);
        let in_view = view * point;
        assert!(in_view.z < 0.0, "point ahead of camera should have negative view Z");
    }

    #[test]
    fn test_perspective_is_invertible() {
        let projection = Mat4::perspective(utils::deg_to_rad(60.0), 16.0 / 9.0, 0.1, 100.0);
        assert!(projection.try_inverse().is_some());
    }

    #[test]
    fn test_deg_rad_round_trip() {
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(123.0)), 123.0, epsilon = 1e-4);
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}
