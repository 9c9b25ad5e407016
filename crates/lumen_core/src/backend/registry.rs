//! Process-scoped shader and texture registries
//!
//! Deduplicating create-or-fetch caches keyed by source/path. These are
//! explicit objects owned by the graphics context and passed where needed,
//! never ambient globals, and they require an explicit teardown so handle
//! destruction is visible in the call graph.

use std::collections::HashMap;

use crate::backend::{GraphicsBackend, ProgramHandle, TextureHandle};
use crate::render::RenderResult;

/// Create-or-fetch cache of linked programs keyed by a caller-chosen key
/// (typically the shader source path or URL).
#[derive(Debug, Default)]
pub struct ShaderRegistry {
    programs: HashMap<String, ProgramHandle>,
}

impl ShaderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the program for `key`, creating it on first request
    ///
    /// Creation failure aborts with an error: a program that cannot be
    /// created leaves its would-be owner unusable, so the failure must not
    /// be swallowed here.
    pub fn create_or_fetch<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> RenderResult<ProgramHandle> {
        if let Some(&program) = self.programs.get(key) {
            return Ok(program);
        }
        let program = backend.create_program(vertex_src, fragment_src)?;
        log::debug!("created program {program:?} for '{key}'");
        self.programs.insert(key.to_owned(), program);
        Ok(program)
    }

    /// Look up a program without creating it
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ProgramHandle> {
        self.programs.get(key).copied()
    }

    /// Remove and return the program registered under `key`
    ///
    /// The caller is responsible for destroying the handle and clearing any
    /// cached bindings of it.
    pub fn remove(&mut self, key: &str) -> Option<ProgramHandle> {
        self.programs.remove(key)
    }

    /// Number of registered programs
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Drain every registered program for teardown
    pub fn drain(&mut self) -> impl Iterator<Item = (String, ProgramHandle)> + '_ {
        self.programs.drain()
    }
}

/// Create-or-fetch cache of textures keyed by their source path or URL.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureHandle>,
}

impl TextureRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the texture for `key`, creating it on first request
    pub fn create_or_fetch<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: &str,
    ) -> RenderResult<TextureHandle> {
        if let Some(&texture) = self.textures.get(key) {
            return Ok(texture);
        }
        let texture = backend.create_texture(key)?;
        log::debug!("created texture {texture:?} for '{key}'");
        self.textures.insert(key.to_owned(), texture);
        Ok(texture)
    }

    /// Look up a texture without creating it
    #[must_use]
    pub fn get(&self, key: &str) -> Option<TextureHandle> {
        self.textures.get(key).copied()
    }

    /// Remove and return the texture registered under `key`
    pub fn remove(&mut self, key: &str) -> Option<TextureHandle> {
        self.textures.remove(key)
    }

    /// Number of registered textures
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drain every registered texture for teardown
    pub fn drain(&mut self) -> impl Iterator<Item = (String, TextureHandle)> + '_ {
        self.textures.drain()
    }
}
