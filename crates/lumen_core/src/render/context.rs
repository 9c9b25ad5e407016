//! Process-wide graphics context

use slotmap::SecondaryMap;

use crate::backend::{
    CullMode, DepthFunc, GraphicsBackend, ProgramHandle, ShaderRegistry, StateCache, TextureHandle,
    TextureKind, TextureRegistry, UniformKind, UniformTable, UniformValue, VertexArrayHandle,
};
use crate::config::RenderSettings;
use crate::render::RenderResult;

/// Owner of the backend and every cache layered on top of it.
///
/// Created once with the graphics context and torn down with it. All state
/// changes and resource lifetimes are routed through this object; nothing
/// else may talk to the backend once a context wraps it, or the state
/// mirror desynchronizes.
///
/// Not reentrant: one logical writer per frame. A multi-threaded embedding
/// must confine the context to the thread owning the backend and funnel
/// draw requests to it.
pub struct GraphicsContext<B: GraphicsBackend> {
    backend: B,
    states: StateCache,
    shaders: ShaderRegistry,
    textures: TextureRegistry,
    uniforms: SecondaryMap<ProgramHandle, UniformTable>,
    settings: RenderSettings,
}

impl<B: GraphicsBackend> GraphicsContext<B> {
    /// Wrap a backend, validate the settings, and apply the default raster
    /// state through the cache
    pub fn new(backend: B, settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;

        let mut context = Self {
            backend,
            states: StateCache::new(settings.max_texture_units),
            shaders: ShaderRegistry::new(),
            textures: TextureRegistry::new(),
            uniforms: SecondaryMap::new(),
            settings,
        };
        context.apply_default_state();
        Ok(context)
    }

    fn apply_default_state(&mut self) {
        let settings = self.settings.clone();
        self.states.set_depth_test(&mut self.backend, settings.depth_test);
        self.states.set_depth_func(&mut self.backend, settings.depth_func);
        self.states.set_cull_mode(&mut self.backend, settings.cull_mode);
        self.states.set_clear_color(&mut self.backend, settings.clear_color);
        self.states.set_clear_depth(&mut self.backend, settings.clear_depth);
    }

    /// The settings this context was created with
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Fetch or create the program registered under `key`
    ///
    /// First creation also installs the program's (empty) uniform table.
    /// Creation failure is fatal and propagates.
    pub fn load_program(
        &mut self,
        key: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> RenderResult<ProgramHandle> {
        let program = self
            .shaders
            .create_or_fetch(&mut self.backend, key, vertex_src, fragment_src)?;
        if !self.uniforms.contains_key(program) {
            self.uniforms.insert(program, UniformTable::new(program));
        }
        Ok(program)
    }

    /// Fetch or create the texture registered under `key`
    pub fn load_texture(&mut self, key: &str) -> RenderResult<TextureHandle> {
        self.textures.create_or_fetch(&mut self.backend, key)
    }

    /// Destroy the program registered under `key`
    ///
    /// Clears the program's uniform table and any cached binding before the
    /// backend handle is released.
    pub fn destroy_program(&mut self, key: &str) {
        let Some(program) = self.shaders.remove(key) else {
            log::warn!("no program registered under '{key}', nothing to destroy");
            return;
        };
        self.uniforms.remove(program);
        self.states.forget_program(program);
        self.backend.destroy_program(program);
    }

    /// Destroy the texture registered under `key`
    pub fn destroy_texture(&mut self, key: &str) {
        let Some(texture) = self.textures.remove(key) else {
            log::warn!("no texture registered under '{key}', nothing to destroy");
            return;
        };
        self.states.forget_texture(texture);
        self.backend.destroy_texture(texture);
    }

    /// Release every registry-owned resource
    ///
    /// Explicit teardown call for context shutdown; the context stays usable
    /// afterwards but owns no programs or textures.
    pub fn teardown(&mut self) {
        for (key, program) in self.shaders.drain() {
            log::debug!("tearing down program '{key}'");
            self.uniforms.remove(program);
            self.states.forget_program(program);
            self.backend.destroy_program(program);
        }
        for (key, texture) in self.textures.drain() {
            log::debug!("tearing down texture '{key}'");
            self.states.forget_texture(texture);
            self.backend.destroy_texture(texture);
        }
    }

    /// Declare a uniform on a loaded program
    ///
    /// Unknown programs and unresolved names are configuration errors:
    /// logged, never fatal.
    pub fn declare_uniform(&mut self, program: ProgramHandle, name: &str, kind: UniformKind) {
        let Some(table) = self.uniforms.get_mut(program) else {
            log::warn!("declare_uniform on unknown program {program:?}, ignoring");
            return;
        };
        table.declare(&self.backend, name, kind);
    }

    /// Set a declared uniform, skipping bit-identical re-uploads
    pub fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        let Some(table) = self.uniforms.get_mut(program) else {
            return;
        };
        table.set(&mut self.backend, name, value);
    }

    /// Bind a texture for a sampler uniform and upload its unit index
    pub fn set_sampler(
        &mut self,
        program: ProgramHandle,
        name: &str,
        kind: TextureKind,
        texture: TextureHandle,
        unit: u32,
    ) {
        let Some(table) = self.uniforms.get_mut(program) else {
            return;
        };
        table.set_sampler(&mut self.backend, &mut self.states, name, kind, texture, unit);
    }

    /// Bind a program through the state cache
    pub fn bind_program(&mut self, program: ProgramHandle) {
        self.states.bind_program(&mut self.backend, program);
    }

    /// Bind a vertex binding set through the state cache
    pub fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.states.bind_vertex_array(&mut self.backend, vertex_array);
    }

    /// Bind a texture into a unit through the state cache
    pub fn bind_texture(&mut self, kind: TextureKind, texture: TextureHandle, unit: u32) {
        self.states.bind_texture(&mut self.backend, kind, texture, unit);
    }

    /// Enable or disable the depth test through the state cache
    pub fn set_depth_test(&mut self, enabled: bool) {
        self.states.set_depth_test(&mut self.backend, enabled);
    }

    /// Set the depth comparison function through the state cache
    pub fn set_depth_func(&mut self, func: DepthFunc) {
        self.states.set_depth_func(&mut self.backend, func);
    }

    /// Set the face-culling mode through the state cache
    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.states.set_cull_mode(&mut self.backend, mode);
    }

    /// Set the clear color through the state cache
    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.states.set_clear_color(&mut self.backend, color);
    }

    /// Set the clear depth through the state cache
    pub fn set_clear_depth(&mut self, depth: f32) {
        self.states.set_clear_depth(&mut self.backend, depth);
    }

    /// Replace the contents of a GPU buffer
    pub fn write_buffer(
        &mut self,
        buffer: crate::backend::BufferHandle,
        data: &[u8],
    ) -> RenderResult<()> {
        self.backend.write_buffer(buffer, data)
    }

    /// Issue an indexed draw with the currently bound state
    pub fn draw_indexed(&mut self, index_count: u32) {
        self.backend.draw_indexed(index_count);
    }

    /// Issue an instanced indexed draw with the currently bound state
    pub fn draw_indexed_instanced(&mut self, index_count: u32, instance_count: u32) {
        self.backend.draw_indexed_instanced(index_count, instance_count);
    }

    /// Test-only view of the wrapped backend
    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    /// Test-only mutable view of the wrapped backend
    ///
    /// Used exclusively to mint handles on the test double; production code
    /// must never reach past the caches.
    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
