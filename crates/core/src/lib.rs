#![deny(unsafe_code)]
//! Renderer bootstrap for the texquad demo: one textured quad, animated by a
//! per-frame uniform.
//!
//! The lifecycle ([`bootstrap::run`]) is generic over two seams: [`Gpu`], the
//! host graphics API (implemented for `glow::Context`), and [`Platform`], the
//! host environment (canvas, shader text, image loading, animation frames,
//! alerts).

pub mod bootstrap;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gpu;
pub mod platform;
pub mod render;
pub mod render_loop;

#[cfg(test)]
pub(crate) mod fake;

pub use bootstrap::{run, Bootstrap};
pub use config::DemoConfig;
pub use error::RenderError;
pub use gpu::Gpu;
pub use platform::{FrameCallback, ImageCallback, Platform, Surface};
pub use render_loop::{FrameCounter, LoopHandle, LoopState, RenderLoop};
