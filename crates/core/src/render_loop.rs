//! The per-frame loop.
//!
//! A [`RenderLoop`] only exists once the texture has been uploaded: it is
//! built by [`Bootstrap::configure_texture`](crate::bootstrap::Bootstrap::configure_texture),
//! which is the sole Idle→Rendering transition. Each tick writes the frame
//! number, clears, draws, and asks the platform for the next frame. There is
//! no way to stop it; the host tears the page down.

use crate::gpu::Gpu;
use crate::platform::{Platform, Surface};
use crate::render::quad::{draw_quad, QuadBuffers};
use std::cell::RefCell;
use std::rc::Rc;

/// Name of the per-frame scalar uniform.
pub const FRAME_UNIFORM: &str = "uFrame";

/// Monotonic frame number, starting at 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter(u64);

impl FrameCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Returns the current frame number and advances by one.
    pub fn advance(&mut self) -> u64 {
        let frame = self.0;
        self.0 += 1;
        frame
    }

    /// Number of frames rendered so far.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Everything a tick needs: the context, the quad, the texture, and the counter.
pub struct RenderLoop<G: Gpu> {
    gl: G,
    surface: Surface,
    frame_uniform: Option<G::UniformLocation>,
    // Held for the program lifetime; nothing rebinds or frees them.
    _buffers: QuadBuffers<G>,
    _texture: G::Texture,
    frames: FrameCounter,
}

impl<G: Gpu> RenderLoop<G> {
    pub(crate) fn new(
        gl: G,
        surface: Surface,
        frame_uniform: Option<G::UniformLocation>,
        buffers: QuadBuffers<G>,
        texture: G::Texture,
    ) -> Self {
        Self {
            gl,
            surface,
            frame_uniform,
            _buffers: buffers,
            _texture: texture,
            frames: FrameCounter::new(),
        }
    }

    /// Renders one frame and returns the frame number written to `uFrame`.
    pub fn render_frame(&mut self) -> u64 {
        let frame = self.frames.advance();
        self.gl.uniform_1_f32(self.frame_uniform.as_ref(), frame as f32);
        self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        draw_quad(&self.gl);
        frame
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// Lifecycle state shared between the load handler and frame callbacks.
pub enum LoopState<G: Gpu> {
    /// Waiting for the texture image.
    Idle,
    /// Texture uploaded; frames are being produced.
    Rendering(RenderLoop<G>),
}

/// Read-only view of a running demo's lifecycle.
pub struct LoopHandle<G: Gpu> {
    state: Rc<RefCell<LoopState<G>>>,
}

impl<G: Gpu> Clone for LoopHandle<G> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<G: Gpu> LoopHandle<G> {
    pub(crate) fn idle() -> Self {
        Self {
            state: Rc::new(RefCell::new(LoopState::Idle)),
        }
    }

    pub fn is_rendering(&self) -> bool {
        matches!(*self.state.borrow(), LoopState::Rendering(_))
    }

    /// Frames rendered so far; zero while idle.
    pub fn frame_count(&self) -> u64 {
        match &*self.state.borrow() {
            LoopState::Idle => 0,
            LoopState::Rendering(render_loop) => render_loop.frame_count(),
        }
    }

    /// Moves to `Rendering` and runs the first tick immediately.
    pub(crate) fn start<P>(&self, render_loop: RenderLoop<G>, platform: Rc<P>)
    where
        G: 'static,
        P: Platform<Gpu = G> + 'static,
    {
        {
            let mut state = self.state.borrow_mut();
            debug_assert!(matches!(*state, LoopState::Idle), "render loop started twice");
            *state = LoopState::Rendering(render_loop);
        }
        log::info!("texture ready, render loop started");
        tick(Rc::clone(&self.state), platform);
    }
}

fn tick<G, P>(state: Rc<RefCell<LoopState<G>>>, platform: Rc<P>)
where
    G: Gpu + 'static,
    P: Platform<Gpu = G> + 'static,
{
    let surface = match &mut *state.borrow_mut() {
        LoopState::Rendering(render_loop) => {
            render_loop.render_frame();
            render_loop.surface().clone()
        }
        LoopState::Idle => {
            log::error!("frame callback fired before the texture was ready");
            return;
        }
    };

    let next_platform = Rc::clone(&platform);
    platform.request_animation_frame(
        &surface,
        Box::new(move || tick(state, next_platform)),
    );
}
