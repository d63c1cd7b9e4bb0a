//! The textured quad: static geometry, its upload, and the draw call.
//!
//! Four vertices drawn as a triangle fan, so vertex 0 is shared by both
//! triangles (`[0, 1, 2]` and `[0, 2, 3]`). Both attribute buffers are
//! uploaded once with `STATIC_DRAW` and never touched again.

use crate::error::RenderError;
use crate::gpu::Gpu;
use glam::Vec2;

/// Number of vertices in the quad.
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Clip-space corners of a unit quad centered at the origin, counter-clockwise.
pub const QUAD_POSITIONS: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
];

/// Texture coordinates matching [`QUAD_POSITIONS`], spanning [0, 1]².
pub const QUAD_TEX_COORDS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Vertex attribute names the shader program must declare.
pub const POSITION_ATTRIBUTE: &str = "vPos";
pub const TEX_COORD_ATTRIBUTE: &str = "vTexCoord";

/// GPU buffers holding the quad's two attributes.
pub struct QuadBuffers<G: Gpu> {
    pub positions: G::Buffer,
    pub tex_coords: G::Buffer,
}

/// Uploads both attribute arrays and wires them to the program's attributes.
///
/// # Errors
///
/// Returns `RenderError::MissingAttribute` if the linked program does not
/// declare `vPos` or `vTexCoord`, and `RenderError::ResourceCreation` if a
/// buffer object cannot be created.
pub fn upload_quad<G: Gpu>(gl: &G, program: G::Program) -> Result<QuadBuffers<G>, RenderError> {
    let positions = upload_attribute(gl, program, POSITION_ATTRIBUTE, &QUAD_POSITIONS)?;
    let tex_coords = upload_attribute(gl, program, TEX_COORD_ATTRIBUTE, &QUAD_TEX_COORDS)?;
    log::debug!("uploaded quad buffers ({QUAD_VERTEX_COUNT} vertices)");
    Ok(QuadBuffers {
        positions,
        tex_coords,
    })
}

fn upload_attribute<G: Gpu>(
    gl: &G,
    program: G::Program,
    name: &str,
    data: &[Vec2],
) -> Result<G::Buffer, RenderError> {
    let buffer = gl
        .create_buffer()
        .map_err(|reason| RenderError::ResourceCreation {
            what: "vertex buffer",
            reason: format!("{name}: {reason}"),
        })?;
    gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
    gl.buffer_data_u8_slice(
        glow::ARRAY_BUFFER,
        bytemuck::cast_slice(data),
        glow::STATIC_DRAW,
    );

    let location = gl
        .get_attrib_location(program, name)
        .ok_or_else(|| RenderError::MissingAttribute {
            name: name.to_string(),
        })?;
    // Tightly packed (stride 0), 2 non-normalized floats per vertex.
    gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(location);
    Ok(buffer)
}

/// Issues the quad's single draw call.
pub fn draw_quad<G: Gpu>(gl: &G) {
    gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD_VERTEX_COUNT);
}
