//! Conversion of host-decoded pixels into the RGB8 layout the texture upload expects.

use image::RgbImage;

/// Drops the alpha channel from a row-major RGBA8 buffer.
///
/// Returns `None` if `rgba` is not exactly `width * height * 4` bytes.
pub fn rgba_to_rgb(width: u32, height: u32, rgba: &[u8]) -> Option<RgbImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)?;
    if rgba.len() != expected {
        return None;
    }
    let rgb = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb)
}
