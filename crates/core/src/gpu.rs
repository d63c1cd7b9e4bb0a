//! The host graphics API seen by the renderer.
//!
//! [`Gpu`] is the small slice of the GL/WebGL surface this demo touches,
//! mirroring `glow::HasContext` method for method but safe to call. The
//! renderer is generic over it so the lifecycle can be exercised against a
//! recording fake, while [`glow::Context`] is the production backend on both
//! WebGL2 and desktop GL. Enum arguments are the `glow` constants.

/// Graphics capability surface used by the renderer bootstrap.
pub trait Gpu {
    type Shader: Copy;
    type Program: Copy;
    type Buffer: Copy;
    type Texture: Copy;
    type UniformLocation: Clone;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear(&self, mask: u32);

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn get_program_link_status(&self, program: Self::Program) -> bool;
    fn get_program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);
    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32);
    fn get_attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn enable_vertex_attrib_array(&self, index: u32);

    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: u32, texture: Option<Self::Texture>);
    fn pixel_store_i32(&self, parameter: u32, value: i32);
    /// Uploads tightly packed 8-bit pixel rows, first row at texture `t = 0`.
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    );
    fn generate_mipmap(&self, target: u32);
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);

    fn get_uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, x: i32);
    fn uniform_1_f32(&self, location: Option<&Self::UniformLocation>, x: f32);

    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    /// Returns and resets the oldest pending error flag (`glow::NO_ERROR` if none).
    fn get_error(&self) -> u32;
}

// SAFETY (all methods below): glow marks raw GL entry points unsafe because
// the driver cannot validate handles. Every handle passed through here was
// produced by the same context via this trait, and enum arguments are glow
// constants chosen by the renderer.
#[allow(unsafe_code)]
impl Gpu for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type UniformLocation = glow::UniformLocation;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { glow::HasContext::viewport(self, x, y, width, height) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { glow::HasContext::clear_color(self, red, green, blue, alpha) }
    }

    fn clear(&self, mask: u32) {
        unsafe { glow::HasContext::clear(self, mask) }
    }

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
        unsafe { glow::HasContext::create_shader(self, shader_type) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { glow::HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { glow::HasContext::compile_shader(self, shader) }
    }

    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { glow::HasContext::get_shader_compile_status(self, shader) }
    }

    fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { glow::HasContext::get_shader_info_log(self, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { glow::HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { glow::HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { glow::HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { glow::HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { glow::HasContext::link_program(self, program) }
    }

    fn get_program_link_status(&self, program: Self::Program) -> bool {
        unsafe { glow::HasContext::get_program_link_status(self, program) }
    }

    fn get_program_info_log(&self, program: Self::Program) -> String {
        unsafe { glow::HasContext::get_program_info_log(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { glow::HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { glow::HasContext::use_program(self, program) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { glow::HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { glow::HasContext::bind_buffer(self, target, buffer) }
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { glow::HasContext::buffer_data_u8_slice(self, target, data, usage) }
    }

    fn get_attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { glow::HasContext::get_attrib_location(self, program, name) }
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
        unsafe {
            glow::HasContext::vertex_attrib_pointer_f32(
                self, index, size, data_type, normalized, stride, offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { glow::HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { glow::HasContext::create_texture(self) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { glow::HasContext::active_texture(self, unit) }
    }

    fn bind_texture(&self, target: u32, texture: Option<Self::Texture>) {
        unsafe { glow::HasContext::bind_texture(self, target, texture) }
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        unsafe { glow::HasContext::pixel_store_i32(self, parameter, value) }
    }

    fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        unsafe {
            glow::HasContext::tex_image_2d(
                self,
                target,
                level,
                internal_format,
                width,
                height,
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn generate_mipmap(&self, target: u32) {
        unsafe { glow::HasContext::generate_mipmap(self, target) }
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { glow::HasContext::tex_parameter_i32(self, target, parameter, value) }
    }

    fn get_uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { glow::HasContext::get_uniform_location(self, program, name) }
    }

    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, x: i32) {
        unsafe { glow::HasContext::uniform_1_i32(self, location, x) }
    }

    fn uniform_1_f32(&self, location: Option<&Self::UniformLocation>, x: f32) {
        unsafe { glow::HasContext::uniform_1_f32(self, location, x) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { glow::HasContext::draw_arrays(self, mode, first, count) }
    }

    fn get_error(&self) -> u32 {
        unsafe { glow::HasContext::get_error(self) }
    }
}
