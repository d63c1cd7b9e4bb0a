//! Image texture creation for the quad.
//!
//! Provides `TextureConfig` for the sampling and upload parameters and
//! `create_image_texture` for turning a decoded RGB8 image into a
//! mipmapped GPU texture on unit 0.

use crate::gpu::Gpu;
use image::RgbImage;

/// Upload and sampling parameters for an image texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// GL internal format (e.g. `glow::RGB`).
    pub internal_format: u32,
    /// GL filter used when the texture is minified.
    pub min_filter: u32,
    /// GL filter used when the texture is magnified.
    pub mag_filter: u32,
    /// Flip rows so the image's top row lands at `t = 1`.
    pub flip_y: bool,
    /// Build the full mip chain after upload.
    pub generate_mipmaps: bool,
}

impl TextureConfig {
    /// RGB8 upload, vertically flipped, with a full mip chain sampled
    /// `NEAREST_MIPMAP_LINEAR` / `NEAREST`.
    pub fn mipmapped_rgb8() -> Self {
        Self {
            internal_format: glow::RGB,
            min_filter: glow::NEAREST_MIPMAP_LINEAR,
            mag_filter: glow::NEAREST,
            flip_y: true,
            generate_mipmaps: true,
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self::mipmapped_rgb8()
    }
}

/// Number of levels in a full mip chain for a `width` x `height` base level.
///
/// `floor(log2(max(width, height))) + 1`; zero for an empty image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    match width.max(height) {
        0 => 0,
        side => u32::BITS - side.leading_zeros(),
    }
}

/// Creates a texture on unit 0 from a decoded RGB8 image.
///
/// Leaves the texture bound to `TEXTURE_2D` on unit 0, which is where the
/// sampler uniform points.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
pub fn create_image_texture<G: Gpu>(
    gl: &G,
    image: &RgbImage,
    config: &TextureConfig,
) -> Result<G::Texture, String> {
    let texture = gl.create_texture()?;

    gl.active_texture(glow::TEXTURE0);
    gl.bind_texture(glow::TEXTURE_2D, Some(texture));

    let flipped;
    let pixels = if config.flip_y {
        flipped = image::imageops::flip_vertical(image);
        flipped.as_raw()
    } else {
        image.as_raw()
    };

    // RGB rows are 3 * width bytes and need not be 4-byte aligned.
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        config.internal_format as i32,
        image.width() as i32,
        image.height() as i32,
        glow::RGB,
        glow::UNSIGNED_BYTE,
        pixels,
    );

    if config.generate_mipmaps {
        gl.generate_mipmap(glow::TEXTURE_2D);
    }
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        config.min_filter as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MAG_FILTER,
        config.mag_filter as i32,
    );

    Ok(texture)
}

/// Points the sampler uniform `name` at texture unit `unit`.
///
/// A sampler the program optimized away is not an error; the upload is
/// skipped, as GL does for a missing location.
pub fn bind_sampler<G: Gpu>(gl: &G, program: G::Program, name: &str, unit: u32) {
    gl.active_texture(glow::TEXTURE0 + unit);
    let location = gl.get_uniform_location(program, name);
    if location.is_none() {
        log::warn!("sampler uniform '{name}' not active in program");
    }
    gl.uniform_1_i32(location.as_ref(), unit as i32);
}
