//! Counting backend double shared by the cache and renderer tests
//!
//! Records every raw call so tests can assert exactly how many operations
//! survived the caching layers.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use slotmap::SlotMap;

use crate::backend::{
    BufferHandle, CullMode, DepthFunc, GraphicsBackend, ProgramHandle, TextureHandle, TextureKind,
    UniformLocation, UniformValue, VertexArrayHandle,
};
use crate::render::{RenderError, RenderResult};

/// Per-operation call counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub create_program: u32,
    pub destroy_program: u32,
    pub create_texture: u32,
    pub destroy_texture: u32,
    pub use_program: u32,
    pub bind_vertex_array: u32,
    pub set_active_texture_unit: u32,
    pub bind_texture: u32,
    pub set_depth_test: u32,
    pub set_depth_func: u32,
    pub set_cull_mode: u32,
    pub set_clear_color: u32,
    pub set_clear_depth: u32,
    pub upload_uniform: u32,
    pub write_buffer: u32,
    pub draw_indexed: u32,
    pub draw_indexed_instanced: u32,
}

/// Backend double that mints real handles and counts every raw call
#[derive(Default)]
pub struct RecordingBackend {
    pub counts: CallCounts,
    /// Names `uniform_location` reports as unresolved
    pub missing_uniforms: HashSet<String>,
    /// When set, resource creation fails
    pub fail_creation: bool,
    /// Data of the most recent buffer write
    pub last_buffer_write: Option<(BufferHandle, Vec<u8>)>,
    programs: SlotMap<ProgramHandle, ()>,
    textures: SlotMap<TextureHandle, ()>,
    buffers: SlotMap<BufferHandle, ()>,
    vertex_arrays: SlotMap<VertexArrayHandle, ()>,
}

impl RecordingBackend {
    /// Mint a program handle without touching the creation counters
    pub fn make_program(&mut self) -> ProgramHandle {
        self.programs.insert(())
    }

    /// Mint a texture handle without touching the creation counters
    pub fn make_texture(&mut self) -> TextureHandle {
        self.textures.insert(())
    }

    /// Mint a buffer handle
    pub fn make_buffer(&mut self) -> BufferHandle {
        self.buffers.insert(())
    }

    /// Mint a vertex-binding handle
    pub fn make_vertex_array(&mut self) -> VertexArrayHandle {
        self.vertex_arrays.insert(())
    }

    /// Whether a program handle is still alive
    pub fn program_alive(&self, program: ProgramHandle) -> bool {
        self.programs.contains_key(program)
    }

    /// Whether a texture handle is still alive
    pub fn texture_alive(&self, texture: TextureHandle) -> bool {
        self.textures.contains_key(texture)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_program(
        &mut self,
        _vertex_src: &str,
        _fragment_src: &str,
    ) -> RenderResult<ProgramHandle> {
        self.counts.create_program += 1;
        if self.fail_creation {
            return Err(RenderError::ResourceCreationFailed(
                "program creation disabled by test".to_owned(),
            ));
        }
        Ok(self.programs.insert(()))
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.counts.destroy_program += 1;
        self.programs.remove(program);
    }

    fn create_texture(&mut self, key: &str) -> RenderResult<TextureHandle> {
        self.counts.create_texture += 1;
        if self.fail_creation {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture creation disabled by test: {key}"
            )));
        }
        Ok(self.textures.insert(()))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.counts.destroy_texture += 1;
        self.textures.remove(texture);
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        if self.missing_uniforms.contains(name) {
            return None;
        }
        // Deterministic pseudo-location derived from the name
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        name.hash(&mut hasher);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        Some(UniformLocation::new((hasher.finish() & 0x7fff_ffff) as i32))
    }

    fn use_program(&mut self, _program: ProgramHandle) {
        self.counts.use_program += 1;
    }

    fn bind_vertex_array(&mut self, _vertex_array: VertexArrayHandle) {
        self.counts.bind_vertex_array += 1;
    }

    fn set_active_texture_unit(&mut self, _unit: u32) {
        self.counts.set_active_texture_unit += 1;
    }

    fn bind_texture(&mut self, _kind: TextureKind, _texture: TextureHandle) {
        self.counts.bind_texture += 1;
    }

    fn set_depth_test(&mut self, _enabled: bool) {
        self.counts.set_depth_test += 1;
    }

    fn set_depth_func(&mut self, _func: DepthFunc) {
        self.counts.set_depth_func += 1;
    }

    fn set_cull_mode(&mut self, _mode: CullMode) {
        self.counts.set_cull_mode += 1;
    }

    fn set_clear_color(&mut self, _color: [f32; 4]) {
        self.counts.set_clear_color += 1;
    }

    fn set_clear_depth(&mut self, _depth: f32) {
        self.counts.set_clear_depth += 1;
    }

    fn upload_uniform(&mut self, _location: UniformLocation, _value: &UniformValue) {
        self.counts.upload_uniform += 1;
    }

    fn write_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> RenderResult<()> {
        self.counts.write_buffer += 1;
        self.last_buffer_write = Some((buffer, data.to_vec()));
        Ok(())
    }

    fn draw_indexed(&mut self, _index_count: u32) {
        self.counts.draw_indexed += 1;
    }

    fn draw_indexed_instanced(&mut self, _index_count: u32, _instance_count: u32) {
        self.counts.draw_indexed_instanced += 1;
    }
}
