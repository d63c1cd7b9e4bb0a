//! Recording test doubles for [`Gpu`] and [`Platform`].
//!
//! `FakeGpu` logs every call as a [`Call`] and hands out sequential integer
//! handles. `FakePlatform` queues image loads and animation frames so tests
//! decide when each callback fires.

use crate::gpu::Gpu;
use crate::platform::{FrameCallback, ImageCallback, Platform, Surface};
use image::RgbImage;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// One recorded GPU call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    CreateShader(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    CreateBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BufferData {
        target: u32,
        data: Vec<u8>,
        usage: u32,
    },
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(u32, Option<u32>),
    PixelStore(u32, i32),
    TexImage2d {
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Vec<u8>,
    },
    GenerateMipmap(u32),
    TexParameter(u32, u32, i32),
    Uniform1i(Option<String>, i32),
    Uniform1f(Option<String>, f32),
    DrawArrays(u32, i32, i32),
}

#[derive(Default)]
struct GpuState {
    calls: Vec<Call>,
    next_handle: u32,
    errors: VecDeque<u32>,
    error_after_buffer_upload: Option<u32>,
    compile_failure: Option<String>,
    link_failure: Option<String>,
    buffer_failure: Option<String>,
    texture_failure: Option<String>,
    missing_names: HashSet<String>,
}

/// Recording GPU. Clones share the same log.
#[derive(Clone, Default)]
pub struct FakeGpu {
    state: Rc<RefCell<GpuState>>,
}

impl FakeGpu {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        let mut state = self.state.borrow_mut();
        if matches!(call, Call::BufferData { .. }) {
            if let Some(code) = state.error_after_buffer_upload.take() {
                state.errors.push_back(code);
            }
        }
        state.calls.push(call);
    }

    fn handle(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        state.next_handle
    }

    /// Queues an error code for the next `get_error`.
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().errors.push_back(code);
    }

    /// Raises `code` right after the next buffer upload.
    pub fn push_error_after_buffer_upload(&self, code: u32) {
        self.state.borrow_mut().error_after_buffer_upload = Some(code);
    }

    /// Makes every shader compile fail with `log`.
    pub fn fail_compile(&self, log: &str) {
        self.state.borrow_mut().compile_failure = Some(log.to_string());
    }

    /// Makes every program link fail with `log`.
    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    /// Makes every `create_buffer` fail with `reason`.
    pub fn fail_create_buffer(&self, reason: &str) {
        self.state.borrow_mut().buffer_failure = Some(reason.to_string());
    }

    /// Makes every `create_texture` fail with `reason`.
    pub fn fail_create_texture(&self, reason: &str) {
        self.state.borrow_mut().texture_failure = Some(reason.to_string());
    }

    /// Hides an attribute or uniform from the linked program.
    pub fn remove_attribute(&self, name: &str) {
        self.state.borrow_mut().missing_names.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Bytes of every `bufferData` call, in order.
    pub fn buffer_uploads(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::BufferData { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(width, height, pixels)` of the most recent texture upload.
    pub fn last_tex_image(&self) -> Option<(i32, i32, Vec<u8>)> {
        self.state.borrow().calls.iter().rev().find_map(|c| match c {
            Call::TexImage2d {
                width,
                height,
                pixels,
                ..
            } => Some((*width, *height, pixels.clone())),
            _ => None,
        })
    }

    /// Every value written to `uFrame`, in order.
    pub fn frame_uniform_writes(&self) -> Vec<f32> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Uniform1f(Some(name), v) if name == "uFrame" => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn draw_calls(&self) -> Vec<(u32, i32, i32)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawArrays(mode, first, count) => Some((*mode, *first, *count)),
                _ => None,
            })
            .collect()
    }
}

impl Gpu for FakeGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = String;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        self.record(Call::CreateShader(shader_type));
        Ok(self.handle())
    }

    fn shader_source(&self, _shader: u32, _source: &str) {}

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn get_shader_compile_status(&self, _shader: u32) -> bool {
        self.state.borrow().compile_failure.is_none()
    }

    fn get_shader_info_log(&self, _shader: u32) -> String {
        self.state.borrow().compile_failure.clone().unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let program = self.handle();
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    fn attach_shader(&self, _program: u32, _shader: u32) {}

    fn detach_shader(&self, _program: u32, _shader: u32) {}

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn get_program_link_status(&self, _program: u32) -> bool {
        self.state.borrow().link_failure.is_none()
    }

    fn get_program_info_log(&self, _program: u32) -> String {
        self.state.borrow().link_failure.clone().unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if let Some(reason) = self.state.borrow().buffer_failure.clone() {
            return Err(reason);
        }
        let buffer = self.handle();
        self.record(Call::CreateBuffer(buffer));
        Ok(buffer)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn get_attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        if self.state.borrow().missing_names.contains(name) {
            return None;
        }
        match name {
            "vPos" => Some(0),
            "vTexCoord" => Some(1),
            _ => None,
        }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn create_texture(&self) -> Result<u32, String> {
        if let Some(reason) = self.state.borrow().texture_failure.clone() {
            return Err(reason);
        }
        let texture = self.handle();
        self.record(Call::CreateTexture(texture));
        Ok(texture)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: u32, texture: Option<u32>) {
        self.record(Call::BindTexture(target, texture));
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.record(Call::PixelStore(parameter, value));
    }

    fn tex_image_2d(
        &self,
        _target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        self.record(Call::TexImage2d {
            level,
            internal_format,
            width,
            height,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn generate_mipmap(&self, target: u32) {
        self.record(Call::GenerateMipmap(target));
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(target, parameter, value));
    }

    fn get_uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        (!self.state.borrow().missing_names.contains(name)).then(|| name.to_string())
    }

    fn uniform_1_i32(&self, location: Option<&String>, x: i32) {
        self.record(Call::Uniform1i(location.cloned(), x));
    }

    fn uniform_1_f32(&self, location: Option<&String>, x: f32) {
        self.record(Call::Uniform1f(location.cloned(), x));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn get_error(&self) -> u32 {
        self.state
            .borrow_mut()
            .errors
            .pop_front()
            .unwrap_or(glow::NO_ERROR)
    }
}

/// Platform double with manually pumped image loads and frames.
pub struct FakePlatform {
    gpu: FakeGpu,
    context_available: bool,
    size: (u32, u32),
    shaders: HashMap<String, String>,
    alerts: RefCell<Vec<String>>,
    image_requests: RefCell<Vec<String>>,
    pending_load: RefCell<Option<ImageCallback>>,
    frames: RefCell<VecDeque<FrameCallback>>,
    scheduled: RefCell<Vec<Surface>>,
}

impl FakePlatform {
    /// A platform whose canvas yields `gpu`; no shader sources registered.
    pub fn new(gpu: FakeGpu) -> Self {
        Self {
            gpu,
            context_available: true,
            size: (128, 128),
            shaders: HashMap::new(),
            alerts: RefCell::default(),
            image_requests: RefCell::default(),
            pending_load: RefCell::default(),
            frames: RefCell::default(),
            scheduled: RefCell::default(),
        }
    }

    /// A platform with the stock `vertex-shader` / `fragment-shader` sources.
    pub fn with_default_shaders(gpu: FakeGpu) -> Self {
        Self::new(gpu)
            .with_shader(
                "vertex-shader",
                "attribute vec2 vPos;\nattribute vec2 vTexCoord;\nuniform float uFrame;\n\
                 varying vec2 fTexCoord;\nvoid main() {\n  fTexCoord = vTexCoord;\n\
                 gl_Position = vec4(vPos, 0.0, 1.0);\n}",
            )
            .with_shader(
                "fragment-shader",
                "precision mediump float;\nuniform sampler2D uTexture;\nvarying vec2 fTexCoord;\n\
                 void main() {\n  gl_FragColor = texture2D(uTexture, fTexCoord);\n}",
            )
    }

    /// A platform with the stock shaders whose context creation always
    /// fails. `gpu` is still shared so tests can check it stayed untouched.
    pub fn failing_context(gpu: FakeGpu) -> Self {
        Self {
            context_available: false,
            ..Self::with_default_shaders(gpu)
        }
    }

    pub fn with_shader(mut self, id: &str, source: &str) -> Self {
        self.shaders.insert(id.to_string(), source.to_string());
        self
    }

    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn requested_images(&self) -> Vec<String> {
        self.image_requests.borrow().clone()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Surfaces passed to every `request_animation_frame`, in order.
    pub fn scheduled_surfaces(&self) -> Vec<Surface> {
        self.scheduled.borrow().clone()
    }

    /// Fires the pending load callback with `image`.
    pub fn complete_image_load(&self, image: RgbImage) {
        let callback = self.pending_load.borrow_mut().take();
        callback.expect("no image load pending")(Ok(image));
    }

    /// Fires the pending load callback with a failure.
    pub fn fail_image_load(&self, reason: &str) {
        let callback = self.pending_load.borrow_mut().take();
        callback.expect("no image load pending")(Err(reason.to_string()));
    }

    /// Runs up to `n` queued animation frames, oldest first.
    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            let frame = self.frames.borrow_mut().pop_front();
            match frame {
                Some(frame) => frame(),
                None => break,
            }
        }
    }
}

impl Platform for FakePlatform {
    type Gpu = FakeGpu;

    fn acquire_context(&self, canvas_id: &str) -> Option<(FakeGpu, Surface)> {
        if !self.context_available {
            return None;
        }
        Some((self.gpu.clone(), Surface::new(canvas_id, self.size.0, self.size.1)))
    }

    fn shader_source(&self, id: &str) -> Option<String> {
        self.shaders.get(id).cloned()
    }

    fn load_image(&self, path: &str, on_complete: ImageCallback) {
        self.image_requests.borrow_mut().push(path.to_string());
        *self.pending_load.borrow_mut() = Some(on_complete);
    }

    fn request_animation_frame(&self, surface: &Surface, frame: FrameCallback) {
        self.scheduled.borrow_mut().push(surface.clone());
        self.frames.borrow_mut().push_back(frame);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
