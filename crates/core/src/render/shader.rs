//! Shader program construction from named sources.
//!
//! The two stage sources are looked up on the host by identifier, compiled,
//! and linked into the single program the demo draws with. Compile failures
//! carry the line-numbered source next to the driver log.

use crate::error::RenderError;
use crate::gpu::Gpu;
use crate::platform::Platform;
use thiserror::Error;

/// Why the demo's program could not be built.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile {
        /// `"vertex"` or `"fragment"`.
        stage: &'static str,
        /// Numbered source followed by the driver log.
        log: String,
    },
    #[error("program failed to link:\n{log}")]
    Link { log: String },
}

/// Pairs each source line with a right-aligned line number, then appends the
/// driver log after a blank line.
///
/// Driver logs cite `0:<line>`, so this is what makes them readable. Empty
/// parts are left out.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let line_count = source.lines().count();
    let width = line_count.max(1).to_string().len();

    let mut out = String::new();
    for (n, line) in (1..).zip(source.lines()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{n:>width$}: {line}"));
    }
    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log);
    }
    out
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compiles one stage of type `shader_type` (`glow::VERTEX_SHADER` or
/// `glow::FRAGMENT_SHADER`).
///
/// On failure the shader object is deleted and the error carries the
/// numbered source.
pub fn compile_shader<G: Gpu>(
    gl: &G,
    shader_type: u32,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let stage = stage_name(shader_type);
    let shader = gl
        .create_shader(shader_type)
        .map_err(|log| ShaderError::Compile { stage, log })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let driver_log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile {
            stage,
            log: format_shader_error(source, &driver_log),
        });
    }
    Ok(shader)
}

/// Attaches both stages to a fresh program and links it.
///
/// The stages are detached again whatever the outcome; a program that fails
/// to link is deleted.
///
/// # Errors
///
/// `ShaderError::Link` with the driver's program log.
pub fn link_program<G: Gpu>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, ShaderError> {
    let program = gl
        .create_program()
        .map_err(|log| ShaderError::Link { log })?;

    for stage in [vertex, fragment] {
        gl.attach_shader(program, stage);
    }
    gl.link_program(program);
    for stage in [vertex, fragment] {
        gl.detach_shader(program, stage);
    }

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(ShaderError::Link { log });
    }
    Ok(program)
}

/// Builds the vertex + fragment program. Stage objects never outlive this
/// call.
pub fn compile_program<G: Gpu>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, ShaderError> {
    let vertex = compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
    let linked = compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src).and_then(|fragment| {
        let linked = link_program(gl, vertex, fragment);
        gl.delete_shader(fragment);
        linked
    });
    gl.delete_shader(vertex);
    linked
}

/// Looks up both shader sources on the host, builds the program and makes
/// it current.
///
/// # Errors
///
/// `RenderError::ShaderSourceMissing` if the host has no source for an
/// identifier, otherwise whatever [`compile_program`] reports.
pub fn init_shaders<G: Gpu, P: Platform + ?Sized>(
    gl: &G,
    platform: &P,
    vertex_id: &str,
    fragment_id: &str,
) -> Result<G::Program, RenderError> {
    let lookup = |id: &str| {
        platform
            .shader_source(id)
            .ok_or_else(|| RenderError::ShaderSourceMissing { id: id.to_string() })
    };
    let vertex_src = lookup(vertex_id)?;
    let fragment_src = lookup(fragment_id)?;

    let program = compile_program(gl, &vertex_src, &fragment_src)?;
    gl.use_program(Some(program));
    log::debug!("linked shader program from '{vertex_id}' and '{fragment_id}'");
    Ok(program)
}
