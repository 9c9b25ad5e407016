//! Rendering coordination layer
//!
//! Ties the caching layers together behind one owner: the
//! [`GraphicsContext`] holds the backend, the state cache, both resource
//! registries, and the per-program uniform tables, so every state change and
//! resource lifetime flows through a single choke point. Draw-call issuers
//! use the small closed set of [`Renderer`] variants on top of it.

mod context;
mod renderer;


pub use context::GraphicsContext;
pub use renderer::{InstancedMeshRenderer, MeshBinding, MeshRenderer, Renderer};

use thiserror::Error;

/// Errors produced by the rendering core
///
/// Only resource creation is fatal here; configuration mistakes (bad
/// uniform names, out-of-range texture units) are logged and ignored at the
/// call site instead of surfacing as errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A backend resource (program, texture, buffer) could not be created
    ///
    /// Fatal to the owning object: a missing handle makes it unusable, so
    /// construction must abort rather than continue with a hole in it.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// The renderer settings describe an unusable configuration
    #[error("invalid render settings: {0}")]
    InvalidSettings(#[from] crate::config::ConfigError),

    /// Backend-specific failure surfaced through the abstraction
    #[error("backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
