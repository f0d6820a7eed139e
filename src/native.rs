//! A real window with a current OpenGL 3.3 core context, driven through glow.

use std::ffi::CStr;
use std::num::NonZeroU32;

use glow::{HasContext, PixelUnpackData};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, error, info, warn};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::context::{
    GlHandle, RenderContext, ShaderStage, TextureImage, UniformLocation, UniformValue,
};
use crate::error::CreationError;
use crate::window::WindowConfig;

/// A native window plus the OpenGL context that renders into it.
///
/// GL entry points are loaded into the [`glow::Context`] owned by this value
/// when it is created, so there is no process-wide loader state. The context
/// stays current on the creating thread for the lifetime of the value.
///
/// Fields drop in declaration order: GL function table, surface, context,
/// and finally the window they belong to.
pub struct GlowContext {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlowContext {
    /// Opens a window and makes a fresh OpenGL 3.3 core context current on it.
    ///
    /// # Errors
    ///
    /// Returns [`CreationError`] if the window, a matching GL config, the
    /// surface, or the context cannot be created.
    pub fn new(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self, CreationError> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(true);

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| CreationError::Window(e.to_string()))?;
        let window =
            window.ok_or_else(|| CreationError::Window("no window was created".to_string()))?;

        let display = gl_config.display();
        let raw_window_handle = window.window_handle()?.as_raw();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        // SAFETY: the raw window handle comes from `window`, which outlives
        // both the surface and the context (see the field order above).
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes)? };
        let context = unsafe { display.create_context(&gl_config, &context_attributes)? }
            .make_current(&surface)?;

        if config.vsync {
            if let Err(e) =
                surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("Failed to enable vsync: {e}");
            }
        }

        // SAFETY: the context was made current just above.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol: &CStr| {
                display.get_proc_address(symbol)
            })
        };

        let this = Self {
            gl,
            surface,
            context,
            window,
        };
        this.log_info();
        Ok(this)
    }

    /// The native window, e.g. to request a redraw.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn log_info(&self) {
        info!("OpenGL Version: {}", self.parameter_string(glow::VERSION));
        info!(
            "GLSL Version: {}",
            self.parameter_string(glow::SHADING_LANGUAGE_VERSION)
        );
        info!("Vendor: {}", self.parameter_string(glow::VENDOR));
        info!("Renderer: {}", self.parameter_string(glow::RENDERER));
    }
}

/// Prefer the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin only calls the picker with at least one config")
}

// SAFETY (applies to every `unsafe` block below): `GlowContext::new` made the
// context current on this thread and it is never released, and every handle
// passed in was created by this same context.
impl RenderContext for GlowContext {
    fn create_shader(&self, stage: ShaderStage) -> Result<GlHandle, String> {
        unsafe { self.gl.create_shader(stage.gl_type()) }.map(|s| s.0)
    }

    fn shader_source(&self, shader: GlHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader), source) };
    }

    fn compile_shader(&self, shader: GlHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader)) };
    }

    fn shader_compile_status(&self, shader: GlHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader)) }
    }

    fn shader_info_log(&self, shader: GlHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader)) }
    }

    fn delete_shader(&self, shader: GlHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader)) };
    }

    fn create_program(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_program() }.map(|p| p.0)
    }

    fn attach_shader(&self, program: GlHandle, shader: GlHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program), glow::NativeShader(shader));
        }
    }

    fn detach_shader(&self, program: GlHandle, shader: GlHandle) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program), glow::NativeShader(shader));
        }
    }

    fn link_program(&self, program: GlHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program)) };
    }

    fn program_link_status(&self, program: GlHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program)) }
    }

    fn program_info_log(&self, program: GlHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program)) }
    }

    fn delete_program(&self, program: GlHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program)) };
    }

    fn use_program(&self, program: Option<GlHandle>) {
        unsafe { self.gl.use_program(program.map(glow::NativeProgram)) };
    }

    fn uniform_location(&self, program: GlHandle, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program), name)
        }
        .map(|location| UniformLocation(location.0))
    }

    fn set_uniform(&self, location: Option<&UniformLocation>, value: UniformValue) {
        let location = location.map(|l| glow::NativeUniformLocation(l.0));
        let location = location.as_ref();
        let gl = &self.gl;
        unsafe {
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => gl.uniform_1_f32(location, v),
                UniformValue::Vec2([x, y]) => gl.uniform_2_f32(location, x, y),
                UniformValue::Vec3([x, y, z]) => gl.uniform_3_f32(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl.uniform_4_f32(location, x, y, z, w),
                UniformValue::Mat4(m) => gl.uniform_matrix_4_f32_slice(location, false, &m),
            }
        }
    }

    fn create_vertex_array(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| v.0)
    }

    fn bind_vertex_array(&self, vertex_array: Option<GlHandle>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(glow::NativeVertexArray));
        }
    }

    fn delete_vertex_array(&self, vertex_array: GlHandle) {
        unsafe {
            self.gl
                .delete_vertex_array(glow::NativeVertexArray(vertex_array));
        }
    }

    fn create_buffer(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_buffer() }.map(|b| b.0)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<GlHandle>) {
        unsafe { self.gl.bind_buffer(target, buffer.map(glow::NativeBuffer)) };
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) };
    }

    fn delete_buffer(&self, buffer: GlHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer)) };
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, glow::FLOAT, false, stride, offset);
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn create_texture(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_texture() }.map(|t| t.0)
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(unit) };
    }

    fn bind_texture(&self, texture: Option<GlHandle>) {
        unsafe {
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.map(glow::NativeTexture));
        }
    }

    fn tex_parameter_i32(&self, pname: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(glow::TEXTURE_2D, pname, value) };
    }

    fn pixel_unpack_alignment(&self, alignment: i32) {
        unsafe { self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, alignment) };
    }

    fn tex_image_2d(&self, image: TextureImage<'_>) {
        // GL format constants are far below i32::MAX.
        #[expect(clippy::cast_possible_wrap)]
        let internal_format = image.format as i32;
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                image.width,
                image.height,
                0,
                image.format,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(image.pixels)),
            );
        }
    }

    fn generate_mipmap(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) };
    }

    fn delete_texture(&self, texture: GlHandle) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture)) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) };
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) };
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode, first, count) };
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { self.gl.draw_elements(mode, count, element_type, offset) };
    }

    fn parameter_string(&self, pname: u32) -> String {
        unsafe { self.gl.get_parameter_string(pname) }
    }

    fn present(&self) {
        if let Err(e) = self.surface.swap_buffers(&self.context) {
            error!("Failed to swap buffers: {e}");
        }
    }

    fn resize_surface(&self, width: u32, height: u32) {
        let Some((width, height)) = surface_size(width, height) else {
            debug!("Skipping surface resize to {width}x{height}");
            return;
        };
        self.surface.resize(&self.context, width, height);
    }
}

/// The size to resize a window surface to, or `None` when either side is
/// zero. A minimized window reports 0x0 and the surface cannot be that small.
fn surface_size(width: u32, height: u32) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(width)?, NonZeroU32::new(height)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surfaces_are_skipped() {
        assert_eq!(surface_size(0, 0), None);
        assert_eq!(surface_size(0, 600), None);
        assert_eq!(surface_size(800, 0), None);
    }

    #[test]
    fn non_zero_sizes_pass_through() {
        let (width, height) = surface_size(1280, 720).unwrap();
        assert_eq!((width.get(), height.get()), (1280, 720));
    }
}
