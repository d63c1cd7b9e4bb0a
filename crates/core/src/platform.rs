//! The host environment the renderer runs inside.
//!
//! A [`Platform`] owns everything outside the GPU: finding the canvas and its
//! graphics context, looking up shader text, decoding the texture image,
//! animation-frame scheduling, and user-facing alerts. The browser
//! implementation lives in the `texquad-wasm` crate.

use crate::gpu::Gpu;
use image::RgbImage;

/// Completion callback for an asynchronous image load.
///
/// Receives the decoded RGB8 image, or a human-readable failure reason.
pub type ImageCallback = Box<dyn FnOnce(Result<RgbImage, String>)>;

/// Callback run on the next animation frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// The drawing surface a context was acquired for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Host identifier of the canvas element.
    pub canvas_id: String,
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl Surface {
    pub fn new(canvas_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            width,
            height,
        }
    }
}

/// Host services the renderer bootstrap depends on.
///
/// Everything here runs on one thread; callbacks handed to the platform are
/// invoked later from its event loop, never re-entrantly from the call that
/// registered them.
pub trait Platform {
    type Gpu: Gpu;

    /// Finds the canvas and creates a graphics context for it.
    ///
    /// Returns `None` when the canvas is missing or the context cannot be
    /// created.
    fn acquire_context(&self, canvas_id: &str) -> Option<(Self::Gpu, Surface)>;

    /// Returns the text of the shader registered under `id`.
    fn shader_source(&self, id: &str) -> Option<String>;

    /// Starts loading the image at `path`; `on_complete` fires exactly once.
    fn load_image(&self, path: &str, on_complete: ImageCallback);

    /// Runs `frame` on the next display refresh for `surface`.
    fn request_animation_frame(&self, surface: &Surface, frame: FrameCallback);

    /// Shows a blocking, user-facing message.
    fn alert(&self, message: &str);
}
