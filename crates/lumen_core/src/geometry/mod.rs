//! Geometric primitives for visibility determination
//!
//! Leaf math types with no backend coupling: half-space planes, axis-aligned
//! boxes, and the six-plane camera frustum built from them. The camera owns
//! and rebuilds the frustum; renderers only ever query it.

mod aabb;
mod frustum;
mod plane;

pub use aabb::AxisAlignedBox;
pub use frustum::{Containment, Frustum, FrustumPlane};
pub use plane::Plane;
