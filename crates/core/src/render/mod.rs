//! WebGL rendering pieces of the demo.
//!
//! # Module overview
//!
//! - [`context`] -- Context acquisition and viewport setup.
//! - [`shader`] -- Shader compilation, linking, and error formatting.
//! - [`quad`] -- Quad geometry, buffer upload, and the draw call.
//! - [`texture`] -- Image texture upload and sampler binding.

pub mod context;
pub mod quad;
pub mod shader;
pub mod texture;

pub use context::GpuContext;
pub use quad::{draw_quad, upload_quad, QuadBuffers, QUAD_POSITIONS, QUAD_TEX_COORDS};
pub use shader::{compile_program, format_shader_error, init_shaders, ShaderError};
pub use texture::{bind_sampler, create_image_texture, mip_level_count, TextureConfig};
