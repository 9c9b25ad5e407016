//! Backend state mirror for redundant-call elimination

use crate::backend::{
    CullMode, DepthFunc, GraphicsBackend, ProgramHandle, TextureHandle, TextureKind,
    VertexArrayHandle,
};

/// Mirror of the backend's currently bound state.
///
/// Every setter compares the requested value against the cached one and
/// returns without side effects when they match; otherwise it updates the
/// mirror and issues exactly one backend call. Each entry starts unknown so
/// the first set always reaches the backend.
///
/// The mirror is only correct while *all* state changes are routed through
/// it: a single out-of-band backend call desynchronizes the cache and
/// corrupts rendering silently. When a handle is destroyed elsewhere, the
/// owner must call the matching `forget_*` method so a recycled handle value
/// cannot masquerade as already-bound state.
#[derive(Debug)]
pub struct StateCache {
    program: Option<ProgramHandle>,
    vertex_array: Option<VertexArrayHandle>,
    active_unit: Option<u32>,
    bound_textures: Vec<Option<TextureHandle>>,
    depth_test: Option<bool>,
    depth_func: Option<DepthFunc>,
    cull_mode: Option<CullMode>,
    clear_color: Option<[f32; 4]>,
    clear_depth: Option<f32>,
}

impl StateCache {
    /// Create a cache sized to the backend's texture-unit limit
    #[must_use]
    pub fn new(max_texture_units: usize) -> Self {
        Self {
            program: None,
            vertex_array: None,
            active_unit: None,
            bound_textures: vec![None; max_texture_units],
            depth_test: None,
            depth_func: None,
            cull_mode: None,
            clear_color: None,
            clear_depth: None,
        }
    }

    /// Number of texture units the cache tracks
    #[must_use]
    pub fn max_texture_units(&self) -> usize {
        self.bound_textures.len()
    }

    /// Bind `program` unless it is already bound
    pub fn bind_program<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        program: ProgramHandle,
    ) {
        if self.program == Some(program) {
            return;
        }
        self.program = Some(program);
        backend.use_program(program);
    }

    /// The currently bound program, if known
    #[must_use]
    pub fn bound_program(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Bind a vertex-attribute binding set unless it is already bound
    pub fn bind_vertex_array<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        vertex_array: VertexArrayHandle,
    ) {
        if self.vertex_array == Some(vertex_array) {
            return;
        }
        self.vertex_array = Some(vertex_array);
        backend.bind_vertex_array(vertex_array);
    }

    /// Select the active texture unit unless it is already active
    ///
    /// Out-of-range units are a configuration error: logged and ignored.
    pub fn set_active_texture_unit<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        unit: u32,
    ) {
        if unit as usize >= self.bound_textures.len() {
            log::warn!(
                "texture unit {unit} out of range (limit {}), ignoring",
                self.bound_textures.len()
            );
            return;
        }
        if self.active_unit == Some(unit) {
            return;
        }
        self.active_unit = Some(unit);
        backend.set_active_texture_unit(unit);
    }

    /// Bind `texture` into `unit`, activating the unit as needed
    ///
    /// Both the unit switch and the bind are elided when redundant. An
    /// out-of-range unit is logged and the call is a no-op.
    pub fn bind_texture<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        kind: TextureKind,
        texture: TextureHandle,
        unit: u32,
    ) {
        let Some(slot) = self.bound_textures.get(unit as usize).copied() else {
            log::warn!(
                "texture unit {unit} out of range (limit {}), ignoring bind",
                self.bound_textures.len()
            );
            return;
        };
        if slot == Some(texture) {
            return;
        }
        self.set_active_texture_unit(backend, unit);
        self.bound_textures[unit as usize] = Some(texture);
        backend.bind_texture(kind, texture);
    }

    /// Enable or disable the depth test unless already in that state
    pub fn set_depth_test<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B, enabled: bool) {
        if self.depth_test == Some(enabled) {
            return;
        }
        self.depth_test = Some(enabled);
        backend.set_depth_test(enabled);
    }

    /// Set the depth comparison function unless it is already current
    pub fn set_depth_func<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B, func: DepthFunc) {
        if self.depth_func == Some(func) {
            return;
        }
        self.depth_func = Some(func);
        backend.set_depth_func(func);
    }

    /// Set the face-culling mode unless it is already current
    pub fn set_cull_mode<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B, mode: CullMode) {
        if self.cull_mode == Some(mode) {
            return;
        }
        self.cull_mode = Some(mode);
        backend.set_cull_mode(mode);
    }

    /// Set the clear color unless it is already current
    pub fn set_clear_color<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        color: [f32; 4],
    ) {
        if self.clear_color == Some(color) {
            return;
        }
        self.clear_color = Some(color);
        backend.set_clear_color(color);
    }

    /// Set the clear depth unless it is already current
    pub fn set_clear_depth<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B, depth: f32) {
        if self.clear_depth == Some(depth) {
            return;
        }
        self.clear_depth = Some(depth);
        backend.set_clear_depth(depth);
    }

    /// Drop any cached binding of a destroyed program
    pub fn forget_program(&mut self, program: ProgramHandle) {
        if self.program == Some(program) {
            self.program = None;
        }
    }

    /// Drop any cached bindings of a destroyed texture
    pub fn forget_texture(&mut self, texture: TextureHandle) {
        for slot in &mut self.bound_textures {
            if *slot == Some(texture) {
                *slot = None;
            }
        }
    }

    /// Drop any cached binding of a destroyed vertex binding set
    pub fn forget_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if self.vertex_array == Some(vertex_array) {
            self.vertex_array = None;
        }
    }
}
