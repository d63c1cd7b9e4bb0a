//! GPU context acquisition for the demo canvas.
//!
//! `GpuContext` pairs the graphics context handed out by the platform with
//! the surface it draws to. It is created once at startup and lives for the
//! rest of the page.

use crate::config::DemoConfig;
use crate::error::RenderError;
use crate::gpu::Gpu;
use crate::platform::{Platform, Surface};

/// A graphics context bound to its drawing surface.
pub struct GpuContext<G: Gpu> {
    gl: G,
    surface: Surface,
}

impl<G: Gpu> GpuContext<G> {
    /// Asks the platform for a context on `canvas_id`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ContextUnavailable` if the platform cannot
    /// provide one. Nothing is retried.
    pub fn acquire<P: Platform<Gpu = G> + ?Sized>(
        platform: &P,
        canvas_id: &str,
    ) -> Result<Self, RenderError> {
        let (gl, surface) = platform.acquire_context(canvas_id).ok_or_else(|| {
            RenderError::ContextUnavailable {
                canvas_id: canvas_id.to_string(),
            }
        })?;
        log::debug!(
            "acquired graphics context for '{}' ({}x{})",
            surface.canvas_id,
            surface.width,
            surface.height
        );
        Ok(Self { gl, surface })
    }

    /// Sets the viewport to the full surface and installs the clear color.
    pub fn configure(&self, config: &DemoConfig) {
        let [r, g, b, a] = config.clear_color;
        let (width, height) = (self.surface.width as i32, self.surface.height as i32);
        self.gl.viewport(0, 0, width, height);
        self.gl.clear_color(r, g, b, a);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Consumes this wrapper and returns the context and its surface.
    pub fn into_parts(self) -> (G, Surface) {
        (self.gl, self.surface)
    }
}
