//! Graphics backend abstraction and redundant-call elimination
//!
//! This module defines the raw device interface ([`GraphicsBackend`]) that
//! concrete backends implement, the opaque handle types that cross that
//! boundary, and the caching layers built on top of it:
//!
//! - [`StateCache`]: mirrors bound program / vertex binding / texture units
//!   / raster toggles and elides state calls that would be no-ops.
//! - [`UniformTable`]: per-program last-uploaded-value cache that skips
//!   bit-identical uniform uploads.
//! - [`ShaderRegistry`] / [`TextureRegistry`]: process-scoped create-or-fetch
//!   caches keyed by source/path, with explicit teardown.
//!
//! The invariant the whole module exists to protect: the cached mirror must
//! equal the real backend state at all times, which holds exactly as long as
//! every state change is routed through these layers.

mod registry;
mod state_cache;
mod uniforms;

#[cfg(test)]
pub(crate) mod testing;

pub use registry::{ShaderRegistry, TextureRegistry};
pub use state_cache::StateCache;
pub use uniforms::{UniformKind, UniformSlot, UniformTable, UniformValue};

use crate::render::RenderResult;

slotmap::new_key_type! {
    /// Opaque handle to a linked GPU program
    pub struct ProgramHandle;

    /// Opaque handle to a GPU texture
    pub struct TextureHandle;

    /// Opaque handle to a GPU buffer
    pub struct BufferHandle;

    /// Opaque handle to a vertex-attribute binding set
    pub struct VertexArrayHandle;
}

/// Opaque location of a uniform within a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(i32);

impl UniformLocation {
    /// Wrap a raw backend location value
    #[must_use]
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw backend location value
    #[must_use]
    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Standard 2D texture
    Texture2D,
    /// Six-face cube map
    CubeMap,
}

/// Depth comparison function for the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthFunc {
    /// Never passes
    Never,
    /// Passes when incoming depth is less
    Less,
    /// Passes when depths are equal
    Equal,
    /// Passes when incoming depth is less or equal
    LessOrEqual,
    /// Passes when incoming depth is greater
    Greater,
    /// Passes when depths differ
    NotEqual,
    /// Passes when incoming depth is greater or equal
    GreaterOrEqual,
    /// Always passes
    Always,
}

/// Face-culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Face culling disabled
    Disabled,
    /// Cull back faces
    Back,
    /// Cull front faces
    Front,
}

/// Raw rendering backend interface
///
/// Implementations own the actual graphics context (GL, WebGL, a software
/// rasterizer, or a test double) and are intentionally dumb: every call maps
/// to one underlying operation with no caching of its own. Redundant-call
/// elimination lives entirely in [`StateCache`] and [`UniformTable`], which
/// is also why no other code path may talk to a backend directly once a
/// cache sits in front of it.
pub trait GraphicsBackend {
    /// Compile and link a program from shader sources
    ///
    /// Creation failure is fatal to the caller: a missing program handle
    /// makes the owning object unusable, so errors must propagate.
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str)
        -> RenderResult<ProgramHandle>;

    /// Destroy a program and its backend resources
    fn destroy_program(&mut self, program: ProgramHandle);

    /// Create a texture for the resource identified by `key`
    ///
    /// Image decoding and upload are owned by the backend implementation;
    /// this core only tracks the resulting handle.
    fn create_texture(&mut self, key: &str) -> RenderResult<TextureHandle>;

    /// Destroy a texture and its backend resources
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Resolve a uniform name to its location within `program`
    ///
    /// Returns `None` when the program has no such active uniform (for
    /// example when the compiler optimized it out).
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Make `program` the active program
    fn use_program(&mut self, program: ProgramHandle);

    /// Bind a vertex-attribute binding set
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Select the active texture unit
    fn set_active_texture_unit(&mut self, unit: u32);

    /// Bind `texture` to the currently active texture unit
    fn bind_texture(&mut self, kind: TextureKind, texture: TextureHandle);

    /// Enable or disable the depth test
    fn set_depth_test(&mut self, enabled: bool);

    /// Set the depth comparison function
    fn set_depth_func(&mut self, func: DepthFunc);

    /// Set the face-culling mode
    fn set_cull_mode(&mut self, mode: CullMode);

    /// Set the clear color
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Set the clear depth value
    fn set_clear_depth(&mut self, depth: f32);

    /// Upload a uniform value to `location` in the active program
    ///
    /// [`UniformValue::Sampler`] uploads its texture-unit index as an
    /// integer uniform.
    fn upload_uniform(&mut self, location: UniformLocation, value: &UniformValue);

    /// Replace the contents of a GPU buffer
    fn write_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> RenderResult<()>;

    /// Issue an indexed draw with the bound program and vertex binding
    fn draw_indexed(&mut self, index_count: u32);

    /// Issue an instanced indexed draw
    fn draw_indexed_instanced(&mut self, index_count: u32, instance_count: u32);
}
