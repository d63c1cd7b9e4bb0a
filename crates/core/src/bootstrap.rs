//! Renderer bootstrap: the whole startup sequence, from canvas to first frame.
//!
//! [`run`] is the entry point a platform calls once. It performs the
//! synchronous initialization ([`Bootstrap::initialize`]), starts the image
//! load, and returns. The load's completion handler uploads the texture and
//! starts the render loop; nothing renders before that handler runs.

use crate::config::DemoConfig;
use crate::diagnostics::{report_error, report_gl_error};
use crate::error::RenderError;
use crate::gpu::Gpu;
use crate::platform::{Platform, Surface};
use crate::render::context::GpuContext;
use crate::render::quad::{upload_quad, QuadBuffers};
use crate::render::shader::init_shaders;
use crate::render::texture::{bind_sampler, create_image_texture, TextureConfig};
use crate::render_loop::{LoopHandle, RenderLoop, FRAME_UNIFORM};
use image::RgbImage;
use std::rc::Rc;

/// Name of the sampler uniform bound to texture unit 0.
pub const SAMPLER_UNIFORM: &str = "uTexture";

/// An initialized renderer waiting for its texture (the Idle state).
pub struct Bootstrap<G: Gpu> {
    gl: G,
    surface: Surface,
    buffers: QuadBuffers<G>,
    frame_uniform: Option<G::UniformLocation>,
}

impl<G: Gpu> Bootstrap<G> {
    /// Runs every synchronous setup step.
    ///
    /// Graphics errors raised between steps are alerted and logged but do not
    /// stop initialization.
    ///
    /// # Errors
    ///
    /// Fails on a missing context, missing shader source, shader compile or
    /// link failure, or a missing vertex attribute.
    pub fn initialize<P: Platform<Gpu = G> + ?Sized>(
        platform: &P,
        config: &DemoConfig,
    ) -> Result<Self, RenderError> {
        let ctx = GpuContext::acquire(platform, &config.canvas_id)?;
        ctx.configure(config);
        let (gl, surface) = ctx.into_parts();
        checkpoint(platform, &gl, "viewport")?;

        let program = init_shaders(
            &gl,
            platform,
            &config.vertex_shader_id,
            &config.fragment_shader_id,
        )?;
        checkpoint(platform, &gl, "shader program")?;

        let buffers = upload_quad(&gl, program)?;
        checkpoint(platform, &gl, "buffer upload")?;

        bind_sampler(&gl, program, SAMPLER_UNIFORM, 0);
        let frame_uniform = gl.get_uniform_location(program, FRAME_UNIFORM);
        if frame_uniform.is_none() {
            log::warn!("uniform '{FRAME_UNIFORM}' not active in program");
        }
        checkpoint(platform, &gl, "texture sampler")?;

        Ok(Self {
            gl,
            surface,
            buffers,
            frame_uniform,
        })
    }

    /// Uploads the loaded image and hands back the ready render loop.
    ///
    /// Consuming `self` makes this the only way to reach the Rendering state.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ResourceCreation` if the texture object cannot be
    /// created.
    pub fn configure_texture<P: Platform<Gpu = G> + ?Sized>(
        self,
        platform: &P,
        image: &RgbImage,
    ) -> Result<RenderLoop<G>, RenderError> {
        let texture = create_image_texture(&self.gl, image, &TextureConfig::mipmapped_rgb8())
            .map_err(|reason| RenderError::ResourceCreation {
                what: "texture",
                reason,
            })?;
        log::debug!(
            "uploaded {}x{} texture with mipmaps",
            image.width(),
            image.height()
        );
        checkpoint(platform, &self.gl, "texture upload")?;

        Ok(RenderLoop::new(
            self.gl,
            self.surface,
            self.frame_uniform,
            self.buffers,
            texture,
        ))
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// Reports a set error flag after `phase`. Only a fatal error stops startup.
fn checkpoint<P: Platform + ?Sized>(
    platform: &P,
    gl: &P::Gpu,
    phase: &str,
) -> Result<(), RenderError> {
    match report_gl_error(platform, gl, Some(phase)) {
        Err(e) if e.is_fatal() => Err(e),
        _ => Ok(()),
    }
}

/// Starts the demo on `platform`.
///
/// Returns once the image load has been requested; the render loop starts
/// later from the load's completion handler. Fatal errors are alerted before
/// they are returned. An image that fails to load is alerted with its path
/// and leaves the handle idle for good.
pub fn run<P>(platform: Rc<P>, config: &DemoConfig) -> Result<LoopHandle<P::Gpu>, RenderError>
where
    P: Platform + 'static,
    P::Gpu: 'static,
{
    let bootstrap = Bootstrap::initialize(&*platform, config)
        .inspect_err(|e| report_error(&*platform, e))?;

    let handle = LoopHandle::idle();
    let on_load_handle = handle.clone();
    let on_load_platform = Rc::clone(&platform);
    let path = config.image_path.clone();

    log::debug!("loading texture image '{path}'");
    platform.load_image(
        &config.image_path,
        Box::new(move |result| {
            let render_loop = result
                .map_err(|reason| RenderError::AssetLoad { path, reason })
                .and_then(|image| bootstrap.configure_texture(&*on_load_platform, &image));
            match render_loop {
                Ok(render_loop) => on_load_handle.start(render_loop, on_load_platform),
                Err(e) => report_error(&*on_load_platform, &e),
            }
        }),
    );

    Ok(handle)
}
