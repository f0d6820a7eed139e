//! Shader program compilation and uniform access.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{debug, error};

use crate::context::{GlHandle, RenderContext, ShaderStage, UniformLocation, UniformValue};
use crate::error::ShaderError;

/// A linked vertex + fragment shader program.
///
/// The program is either valid (a linked GL program) or invalid (no handle);
/// a failed build never leaves a half-built program behind. The program is
/// deleted on [`Drop`].
///
/// # Example
///
/// ```no_run
/// # use std::rc::Rc;
/// # use learnopengl::{program::ShaderProgram, context::RenderContext};
/// # fn example<C: RenderContext>(ctx: Rc<C>, vs: &str, fs: &str) {
/// let mut shader = ShaderProgram::new(ctx);
/// if shader.compile(vs, fs).is_ok() {
///     shader.use_program();
///     shader.set_float("u_time", 1.5);
/// }
/// # }
/// ```
pub struct ShaderProgram<C: RenderContext> {
    ctx: Rc<C>,
    program: Option<GlHandle>,
}

impl<C: RenderContext> ShaderProgram<C> {
    /// An invalid program; call [`compile`](Self::compile) or
    /// [`load_from_file`](Self::load_from_file) to build it.
    #[must_use]
    pub fn new(ctx: Rc<C>) -> Self {
        Self { ctx, program: None }
    }

    /// Compile both stages and link them.
    ///
    /// Any program this value already holds is deleted first. The fragment
    /// stage is only compiled once the vertex stage succeeded, and linking is
    /// only attempted once both did. Shader objects are deleted before
    /// returning, on success and on failure.
    ///
    /// # Errors
    ///
    /// [`ShaderError::Compile`] names the failing stage, [`ShaderError::Link`]
    /// carries the link log. Either way the program is left invalid.
    pub fn compile(&mut self, vertex_src: &str, fragment_src: &str) -> Result<(), ShaderError> {
        self.release();
        let ctx = &*self.ctx;

        let vertex = compile_stage(ctx, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(ctx, ShaderStage::Fragment, fragment_src) {
            Ok(fragment) => fragment,
            Err(e) => {
                ctx.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match ctx.create_program() {
            Ok(program) => program,
            Err(e) => {
                ctx.delete_shader(vertex);
                ctx.delete_shader(fragment);
                return Err(ShaderError::Object(e));
            }
        };

        ctx.attach_shader(program, vertex);
        ctx.attach_shader(program, fragment);
        ctx.link_program(program);
        let linked = ctx.program_link_status(program);

        // The linked program keeps its own copy of the stages.
        ctx.detach_shader(program, vertex);
        ctx.detach_shader(program, fragment);
        ctx.delete_shader(vertex);
        ctx.delete_shader(fragment);

        if !linked {
            let log = ctx.program_info_log(program);
            ctx.delete_program(program);
            error!("Shader program linking failed:\n{log}");
            return Err(ShaderError::Link { log });
        }

        debug!("Linked shader program {program}");
        self.program = Some(program);
        Ok(())
    }

    /// Read both stages from UTF-8 text files, then [`compile`](Self::compile).
    ///
    /// # Errors
    ///
    /// [`ShaderError::Io`] if either file cannot be read; nothing is compiled
    /// and the current program is kept. Otherwise as for `compile`.
    pub fn load_from_file(
        &mut self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<(), ShaderError> {
        let vertex_src = read_source(vertex_path.as_ref())?;
        let fragment_src = read_source(fragment_path.as_ref())?;
        self.compile(&vertex_src, &fragment_src)
    }

    /// Make this the current program. Does nothing while invalid.
    pub fn use_program(&self) {
        if let Some(program) = self.program {
            self.ctx.use_program(Some(program));
        }
    }

    /// The GL program name, or `0` while invalid.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.program.map_or(0, GlHandle::get)
    }

    /// Whether a linked program is held.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.program.is_some()
    }

    /// Look up a uniform. `None` if the program is invalid or has no active
    /// uniform called `name`.
    #[must_use]
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.program
            .and_then(|program| self.ctx.uniform_location(program, name))
    }

    /// `bool` uniforms are written as the integers 0 and 1.
    pub fn set_bool(&self, name: &str, value: bool) {
        self.set(name, UniformValue::Int(i32::from(value)));
    }

    /// Also used for `sampler2D` texture units.
    pub fn set_int(&self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }

    /// Writes a `float` uniform.
    pub fn set_float(&self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    /// Writes a `vec2` uniform.
    pub fn set_vec2(&self, name: &str, x: f32, y: f32) {
        self.set(name, UniformValue::Vec2([x, y]));
    }

    /// Writes a `vec3` uniform.
    pub fn set_vec3(&self, name: &str, x: f32, y: f32, z: f32) {
        self.set(name, UniformValue::Vec3([x, y, z]));
    }

    /// Writes a `vec4` uniform.
    pub fn set_vec4(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        self.set(name, UniformValue::Vec4([x, y, z, w]));
    }

    /// `value` is column-major.
    pub fn set_mat4(&self, name: &str, value: &[f32; 16]) {
        self.set(name, UniformValue::Mat4(*value));
    }

    /// The location is looked up on every call; unknown names are ignored.
    fn set(&self, name: &str, value: UniformValue) {
        let location = self.uniform_location(name);
        self.ctx.set_uniform(location.as_ref(), value);
    }

    /// Delete the program, if any, leaving `self` invalid.
    pub fn release(&mut self) {
        if let Some(program) = self.program.take() {
            self.ctx.delete_program(program);
        }
    }
}

impl<C: RenderContext> Drop for ShaderProgram<C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Compile one stage, deleting the shader object again if it fails.
fn compile_stage<C: RenderContext>(
    ctx: &C,
    stage: ShaderStage,
    source: &str,
) -> Result<GlHandle, ShaderError> {
    let shader = ctx.create_shader(stage).map_err(ShaderError::Object)?;
    ctx.shader_source(shader, source);
    ctx.compile_shader(shader);

    if !ctx.shader_compile_status(shader) {
        let log = ctx.shader_info_log(shader);
        ctx.delete_shader(shader);
        error!("{stage} shader compilation failed:\n{log}");
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| {
        error!("Failed to open shader file: {}", path.display());
        ShaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
