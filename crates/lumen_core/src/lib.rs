//! # Lumen Core
//!
//! The runtime core of a small real-time 3D rendering engine. This crate
//! owns the two pieces of per-frame machinery everything else leans on:
//!
//! - **Camera derivation graph**: view/projection/derived-inverse matrices
//!   and the view frustum, recomputed lazily through an explicit dirty-flag
//!   dependency graph so that a frame only pays for what actually changed.
//! - **Backend state caching**: a mirror of the graphics context's bound
//!   state (program, vertex binding, texture units, raster toggles) plus a
//!   per-program uniform cache, so redundant state-change calls never reach
//!   the driver.
//!
//! Windowing, context creation, geometry loading, texture decoding, and
//! scene management are external collaborators: this crate consumes spatial
//! frames and mesh/layout descriptors, and exposes matrices, a frustum
//! classification test, and state-setting entry points.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumen_core::prelude::*;
//!
//! # fn run(backend: impl GraphicsBackend) -> RenderResult<()> {
//! let mut ctx = GraphicsContext::new(backend, RenderSettings::default())?;
//! let mut camera = Camera::perspective(45.0, 16.0 / 9.0, 0.1, 1000.0);
//!
//! // Once per frame, before anything reads matrices or queries the frustum:
//! camera.refresh();
//!
//! let bounds = AxisAlignedBox::new(
//!     Vec3::new(-1.0, -1.0, -50.0),
//!     Vec3::new(1.0, 1.0, -49.0),
//! );
//! if camera.frustum().classify(&bounds) != Containment::Outside {
//!     // bind state and draw through `ctx` ...
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod camera;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        backend::{
            BufferHandle, CullMode, DepthFunc, GraphicsBackend, ProgramHandle, StateCache,
            TextureHandle, TextureKind, UniformKind, UniformValue, VertexArrayHandle,
        },
        camera::{Camera, DirtyFlags},
        config::RenderSettings,
        foundation::math::{Mat4, Transform, Vec3, Vec4},
        geometry::{AxisAlignedBox, Containment, Frustum, Plane},
        render::{
            GraphicsContext, InstancedMeshRenderer, MeshBinding, MeshRenderer, RenderError,
            RenderResult, Renderer,
        },
    };
}
