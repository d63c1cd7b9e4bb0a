//! Error types for the texquad renderer.

use crate::render::shader::ShaderError;
use thiserror::Error;

/// Errors produced while bootstrapping or driving the renderer.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// No graphics context could be created for the canvas.
    #[error("WebGL isn't available (canvas '{canvas_id}')")]
    ContextUnavailable { canvas_id: String },

    /// The host has no shader source registered under this identifier.
    #[error("shader source not found: {id}")]
    ShaderSourceMissing { id: String },

    /// A shader stage failed to compile or the program failed to link.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The linked program does not expose a vertex attribute the quad needs.
    #[error("attribute '{name}' not found in linked program")]
    MissingAttribute { name: String },

    /// The context refused to create a GPU object.
    #[error("could not create {what}: {reason}")]
    ResourceCreation { what: &'static str, reason: String },

    /// The graphics error flag was set. `context` is the caller's label.
    #[error("{}OpenGL error: {code:x}", context_prefix(.context))]
    GraphicsApi { code: u32, context: Option<String> },

    /// The texture image could not be loaded or decoded.
    #[error("failed to load image '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// The demo configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
}

impl RenderError {
    /// Whether this error stops the lifecycle.
    ///
    /// Only a set error flag is recoverable: it is reported and startup
    /// carries on. Everything else stops the lifecycle.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::GraphicsApi { .. })
    }
}

fn context_prefix(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!("{c}\n"))
        .unwrap_or_default()
}
