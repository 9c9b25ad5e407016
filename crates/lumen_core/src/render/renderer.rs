//! Renderer variants for draw-call issuers
//!
//! A small closed set of renderer capabilities behind one interface: the
//! plain mesh renderer issues a single indexed draw, the instanced variant
//! maintains a per-instance buffer and overrides the binding update. Both
//! route every bind through the state cache, never the raw backend.

use crate::backend::{BufferHandle, GraphicsBackend, ProgramHandle, VertexArrayHandle};
use crate::foundation::math::Mat4;
use crate::render::{GraphicsContext, RenderResult};

/// Mesh description handed in by the geometry collaborator
///
/// The vertex/index buffers and the attribute layout behind the binding
/// handle are created and owned elsewhere; the core only needs the binding
/// set and the index count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBinding {
    /// Vertex-attribute binding set covering the mesh's buffers
    pub vertex_array: VertexArrayHandle,

    /// Number of indices to draw
    pub index_count: u32,
}

/// Capability interface for the renderer variants
///
/// `update_binding` refreshes whatever per-draw GPU data the variant owns
/// (a no-op for static meshes); `render` binds state through the context's
/// caches and issues the draw. Dispatch is via this trait, not inheritance.
pub trait Renderer<B: GraphicsBackend> {
    /// Refresh the variant's GPU-side binding data
    fn update_binding(&mut self, ctx: &mut GraphicsContext<B>) -> RenderResult<()>;

    /// Bind state and issue the draw call
    fn render(&mut self, ctx: &mut GraphicsContext<B>) -> RenderResult<()>;
}

/// Renderer for a single static mesh
#[derive(Debug)]
pub struct MeshRenderer {
    program: ProgramHandle,
    mesh: MeshBinding,
}

impl MeshRenderer {
    /// Create a renderer drawing `mesh` with `program`
    #[must_use]
    pub fn new(program: ProgramHandle, mesh: MeshBinding) -> Self {
        Self { program, mesh }
    }
}

impl<B: GraphicsBackend> Renderer<B> for MeshRenderer {
    fn update_binding(&mut self, _ctx: &mut GraphicsContext<B>) -> RenderResult<()> {
        // Static geometry: the binding set never changes after creation
        Ok(())
    }

    fn render(&mut self, ctx: &mut GraphicsContext<B>) -> RenderResult<()> {
        ctx.bind_program(self.program);
        ctx.bind_vertex_array(self.mesh.vertex_array);
        ctx.draw_indexed(self.mesh.index_count);
        Ok(())
    }
}

/// Renderer drawing many copies of one mesh in a single instanced call
///
/// Owns the CPU-side list of per-instance model matrices and the GPU buffer
/// they are streamed into. `update_binding` must run after the instance
/// list changes and before the next `render`.
#[derive(Debug)]
pub struct InstancedMeshRenderer {
    program: ProgramHandle,
    mesh: MeshBinding,
    instance_buffer: BufferHandle,
    instances: Vec<Mat4>,
    buffer_stale: bool,
}

impl InstancedMeshRenderer {
    /// Create an instanced renderer streaming into `instance_buffer`
    #[must_use]
    pub fn new(program: ProgramHandle, mesh: MeshBinding, instance_buffer: BufferHandle) -> Self {
        Self {
            program,
            mesh,
            instance_buffer,
            instances: Vec::new(),
            buffer_stale: false,
        }
    }

    /// Replace the per-instance model matrices
    pub fn set_instances(&mut self, instances: Vec<Mat4>) {
        self.instances = instances;
        self.buffer_stale = true;
    }

    /// Number of instances currently queued
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

impl<B: GraphicsBackend> Renderer<B> for InstancedMeshRenderer {
    fn update_binding(&mut self, ctx: &mut GraphicsContext<B>) -> RenderResult<()> {
        if !self.buffer_stale {
            return Ok(());
        }

        let mut data = Vec::with_capacity(self.instances.len() * 16);
        for matrix in &self.instances {
            data.extend_from_slice(matrix.as_slice());
        }
        ctx.write_buffer(self.instance_buffer, bytemuck::cast_slice(&data))?;
        self.buffer_stale = false;
        Ok(())
    }

    fn render(&mut self, ctx: &mut GraphicsContext<B>) -> RenderResult<()> {
        if self.instances.is_empty() {
            return Ok(());
        }
        ctx.bind_program(self.program);
        ctx.bind_vertex_array(self.mesh.vertex_array);
        #[allow(clippy::cast_possible_truncation)]
        ctx.draw_indexed_instanced(self.mesh.index_count, self.instances.len() as u32);
        Ok(())
    }
}
