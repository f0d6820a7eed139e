//! The slice of OpenGL that shader programs and scenes are written against.
//!
//! [`RenderContext`] mirrors the subset of [`glow::HasContext`] this crate
//! uses, with GL object names reduced to plain non-zero integers. The real
//! implementation is [`GlowContext`](crate::native::GlowContext); unit tests
//! run against a recording implementation that tracks every live object.
//!
//! Enum-like parameters (`target`, `mode`, `pname`, ...) take the raw `glow`
//! constants, e.g. [`glow::ARRAY_BUFFER`] or [`glow::TRIANGLES`].

use std::fmt;
use std::num::NonZeroU32;

/// Name of a GL object (shader, program, buffer, vertex array, texture).
///
/// GL reserves `0` for "no object", so a valid name is never zero and an
/// absent one is `None`.
pub type GlHandle = NonZeroU32;

/// Location of a uniform inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// One of the two programmable stages a [`ShaderProgram`] links together.
///
/// [`ShaderProgram`]: crate::program::ShaderProgram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per fragment.
    Fragment,
}

impl ShaderStage {
    /// The GL shader type passed to `glCreateShader`.
    #[must_use]
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "VERTEX",
            Self::Fragment => "FRAGMENT",
        })
    }
}

/// A value written to a uniform with `glUniform*`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int`, `bool` or `sampler2D`.
    Int(i32),
    /// `float`.
    Float(f32),
    /// `vec2`.
    Vec2([f32; 2]),
    /// `vec3`.
    Vec3([f32; 3]),
    /// `vec4`.
    Vec4([f32; 4]),
    /// Column-major 4×4 matrix.
    Mat4([f32; 16]),
}

/// Pixel data for a single 2D texture level.
#[derive(Debug, Clone, Copy)]
pub struct TextureImage<'a> {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// `glow::RGB` or `glow::RGBA`; also used as the internal format.
    pub format: u32,
    /// Tightly packed, row-major, unsigned bytes.
    pub pixels: &'a [u8],
}

/// OpenGL operations on the context that is current on this thread.
///
/// Every method assumes the context is current; implementations guarantee
/// that at construction time, so the methods themselves are safe to call.
/// Object names passed in must have been created by the same context.
pub trait RenderContext {
    // Shaders and programs.

    /// `glCreateShader`.
    ///
    /// # Errors
    ///
    /// Returns the driver's message if no shader object could be allocated.
    fn create_shader(&self, stage: ShaderStage) -> Result<GlHandle, String>;
    /// `glShaderSource`.
    fn shader_source(&self, shader: GlHandle, source: &str);
    /// `glCompileShader`.
    fn compile_shader(&self, shader: GlHandle);
    /// Whether the last compile of `shader` succeeded.
    fn shader_compile_status(&self, shader: GlHandle) -> bool;
    /// The compiler's log for `shader`.
    fn shader_info_log(&self, shader: GlHandle) -> String;
    /// `glDeleteShader`.
    fn delete_shader(&self, shader: GlHandle);

    /// `glCreateProgram`.
    ///
    /// # Errors
    ///
    /// Returns the driver's message if no program object could be allocated.
    fn create_program(&self) -> Result<GlHandle, String>;
    /// `glAttachShader`.
    fn attach_shader(&self, program: GlHandle, shader: GlHandle);
    /// `glDetachShader`.
    fn detach_shader(&self, program: GlHandle, shader: GlHandle);
    /// `glLinkProgram`.
    fn link_program(&self, program: GlHandle);
    /// Whether the last link of `program` succeeded.
    fn program_link_status(&self, program: GlHandle) -> bool;
    /// The linker's log for `program`.
    fn program_info_log(&self, program: GlHandle) -> String;
    /// `glDeleteProgram`.
    fn delete_program(&self, program: GlHandle);
    /// `glUseProgram`; `None` unbinds.
    fn use_program(&self, program: Option<GlHandle>);

    /// `glGetUniformLocation`; `None` when the program has no active uniform
    /// with that name.
    fn uniform_location(&self, program: GlHandle, name: &str) -> Option<UniformLocation>;
    /// Writes a uniform of the currently used program. A `None` location is
    /// silently ignored, as GL does for location `-1`.
    fn set_uniform(&self, location: Option<&UniformLocation>, value: UniformValue);

    // Vertex state.

    /// `glGenVertexArrays`.
    ///
    /// # Errors
    ///
    /// Returns the driver's message on allocation failure.
    fn create_vertex_array(&self) -> Result<GlHandle, String>;
    /// `glBindVertexArray`; `None` unbinds.
    fn bind_vertex_array(&self, vertex_array: Option<GlHandle>);
    /// `glDeleteVertexArrays`.
    fn delete_vertex_array(&self, vertex_array: GlHandle);

    /// `glGenBuffers`.
    ///
    /// # Errors
    ///
    /// Returns the driver's message on allocation failure.
    fn create_buffer(&self) -> Result<GlHandle, String>;
    /// `glBindBuffer`; `None` unbinds `target`.
    fn bind_buffer(&self, target: u32, buffer: Option<GlHandle>);
    /// Copies `data` into the buffer bound to `target`.
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);
    /// `glDeleteBuffers`.
    fn delete_buffer(&self, buffer: GlHandle);

    /// Describes a float attribute of `size` components at byte `offset`
    /// within each `stride`-byte vertex of the bound `ARRAY_BUFFER`.
    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32);
    /// `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, index: u32);

    // Textures.

    /// `glGenTextures`.
    ///
    /// # Errors
    ///
    /// Returns the driver's message on allocation failure.
    fn create_texture(&self) -> Result<GlHandle, String>;
    /// `glActiveTexture`, e.g. `glow::TEXTURE0`.
    fn active_texture(&self, unit: u32);
    /// Binds to `TEXTURE_2D`.
    fn bind_texture(&self, texture: Option<GlHandle>);
    /// `glTexParameteri` on `TEXTURE_2D`.
    fn tex_parameter_i32(&self, pname: u32, value: i32);
    /// `glPixelStorei(GL_UNPACK_ALIGNMENT, ..)`.
    fn pixel_unpack_alignment(&self, alignment: i32);
    /// Uploads level 0 of the bound `TEXTURE_2D`.
    fn tex_image_2d(&self, image: TextureImage<'_>);
    /// Builds the mipmap chain of the bound `TEXTURE_2D`.
    fn generate_mipmap(&self);
    /// `glDeleteTextures`.
    fn delete_texture(&self, texture: GlHandle);

    // Frame.

    /// `glViewport`.
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// `glClearColor`.
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    /// `glClear` with a mask such as `glow::COLOR_BUFFER_BIT`.
    fn clear(&self, mask: u32);
    /// Non-indexed draw from the bound vertex array.
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    /// Indexed draw from the bound element buffer, starting at byte `offset`.
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);

    /// `glGetString`.
    fn parameter_string(&self, pname: u32) -> String;

    /// Swaps the front and back buffers of the window surface.
    fn present(&self);
    /// Resizes the window surface after the window itself changed size.
    fn resize_surface(&self, width: u32, height: u32);
}
