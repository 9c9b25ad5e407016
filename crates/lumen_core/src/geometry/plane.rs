//! Half-space plane primitive

use crate::foundation::math::Vec3;

/// Geometric half-space: a unit normal and an offset such that
/// `dot(normal, point) + offset` is the signed distance of `point` from the
/// plane. Positive distance means the point lies on the side the normal
/// points into ("in front" / inside).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Default for Plane {
    /// The Z = 0 plane with its positive side toward Z+
    fn default() -> Self {
        Self {
            normal: Vec3::new(0.0, 0.0, 1.0),
            offset: 0.0,
        }
    }
}

impl Plane {
    /// Create a plane directly from coefficients
    ///
    /// `normal` must be unit length for distance queries to return true
    /// distances.
    #[must_use]
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Create a plane passing through three points
    ///
    /// See [`set_from_points`](Self::set_from_points) for the winding and
    /// precondition rules.
    #[must_use]
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let mut plane = Self::default();
        plane.set_from_points(p1, p2, p3);
        plane
    }

    /// Re-derive the plane in place from three points
    ///
    /// The normal is `normalize((p2 - p1) x (p3 - p1))`, so the winding of
    /// the three points decides which side is positive. Collinear points are
    /// a caller precondition: they produce a degenerate normal and are not
    /// checked here.
    pub fn set_from_points(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) {
        self.normal = (p2 - p1).cross(&(p3 - p1)).normalize();
        self.offset = -self.normal.dot(&p1);
    }

    /// Signed distance from `point` to the plane
    ///
    /// Positive values are in front of the plane (the side the normal points
    /// into), negative values behind it.
    #[must_use]
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// The plane's unit normal
    #[must_use]
    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    /// The plane's offset term
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_sign_convention_from_points() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );

        assert_relative_eq!(*plane.normal(), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 0.0, 5.0)), 5.0, epsilon = EPSILON);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 0.0, -5.0)), -5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_reversed_winding_flips_normal() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );

        assert_relative_eq!(*plane.normal(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_offset_for_plane_not_through_origin() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );

        // Plane z = 2: a point on the plane is at distance zero
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(7.0, -3.0, 2.0)), 0.0, epsilon = EPSILON);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 0.0, 3.0)), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_set_from_points_reuses_storage() {
        let mut plane = Plane::default();
        plane.set_from_points(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );

        // Plane y = 1 with normal pointing up: the origin sits behind it
        assert_relative_eq!(*plane.normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 0.0, 0.0)), -1.0, epsilon = EPSILON);
    }
}
