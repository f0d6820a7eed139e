//! The scene: owns the GL objects for one piece of fixed geometry and draws it
//! once per frame.

use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, info};
use winit::event::WindowEvent;

use crate::context::{GlHandle, RenderContext};
use crate::error::SceneError;
use crate::program::ShaderProgram;
use crate::shaders;
use crate::texture::{self, DecodedImage};
use crate::types::{
    VertexLayout, COLORED_TRIANGLE, QUAD, QUAD_INDICES, TEXTURED_QUAD, TRIANGLE,
};
use crate::window::{WindowConfig, WindowState};

/// Background color every variant clears to.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Fill color the [`Variant::Uniform`] scene writes to `u_color` each frame.
pub const UNIFORM_COLOR: [f32; 4] = [0.0, 0.8, 0.2, 1.0];

/// Default shader directory for [`Variant::Textured`].
pub const DEFAULT_SHADER_DIR: &str = "assets/shaders";
/// Default texture for [`Variant::Textured`].
pub const DEFAULT_TEXTURE: &str = "assets/textures/checker.png";

/// Which geometry and shaders a scene uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// An orange triangle, drawn without indices.
    Triangle,
    /// An orange quad, drawn from an index buffer.
    #[default]
    Quad,
    /// A triangle with per-vertex colors.
    Colored,
    /// A triangle filled from a uniform color.
    Uniform,
    /// A quad sampling a texture, with shaders loaded from disk.
    Textured,
}

/// The single draw call a variant issues per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    /// `glDrawArrays(GL_TRIANGLES, 0, count)`.
    Arrays {
        /// Vertices to draw.
        count: i32,
    },
    /// `glDrawElements(GL_TRIANGLES, count, GL_UNSIGNED_INT, 0)`.
    Elements {
        /// Indices to draw.
        count: i32,
    },
}

// The geometry arrays hold a handful of elements.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const TRIANGLE_VERTEX_COUNT: i32 = TRIANGLE.len() as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const QUAD_INDEX_COUNT: i32 = QUAD_INDICES.len() as i32;

impl Variant {
    /// The draw call [`Scene::render`] issues for this variant.
    #[must_use]
    pub const fn draw_command(self) -> DrawCommand {
        match self {
            Self::Triangle | Self::Colored | Self::Uniform => DrawCommand::Arrays {
                count: TRIANGLE_VERTEX_COUNT,
            },
            Self::Quad | Self::Textured => DrawCommand::Elements {
                count: QUAD_INDEX_COUNT,
            },
        }
    }
}

/// Where [`Variant::Textured`] finds its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneAssets {
    /// Directory holding `textured.vert` and `textured.frag`.
    pub shader_dir: PathBuf,
    /// Image file sampled by the fragment shader.
    pub texture: PathBuf,
}

impl Default for SceneAssets {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from(DEFAULT_SHADER_DIR),
            texture: PathBuf::from(DEFAULT_TEXTURE),
        }
    }
}

/// Lifecycle of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// No GL objects are held.
    Uninitialized,
    /// Shader, buffers and (for textured scenes) texture are uploaded.
    Ready,
}

/// A window's worth of rendering state.
///
/// The scene shares the render context with its shader program and owns the
/// vertex array, vertex buffer, optional element buffer and optional texture.
/// Every GL object is created in [`initialize`](Self::initialize) and deleted
/// in [`cleanup`](Self::cleanup) (also run on drop); nothing is allocated
/// while rendering.
///
/// # Example
///
/// ```no_run
/// # use std::rc::Rc;
/// # use learnopengl::{context::RenderContext, scene::{Scene, SceneAssets, Variant}, window::WindowConfig};
/// # fn example<C: RenderContext>(ctx: Rc<C>) -> Result<(), learnopengl::error::SceneError> {
/// let mut scene = Scene::new(ctx, &WindowConfig::default(), Variant::Quad, SceneAssets::default());
/// scene.initialize()?;
/// // Each frame:
/// scene.render();
/// # Ok(())
/// # }
/// ```
pub struct Scene<C: RenderContext> {
    ctx: Rc<C>,
    window: WindowState,
    variant: Variant,
    assets: SceneAssets,
    state: SceneState,

    shader: ShaderProgram<C>,
    /// Vertex attribute configuration.
    vao: Option<GlHandle>,
    /// Vertex data.
    vbo: Option<GlHandle>,
    /// Index data, for indexed variants.
    ebo: Option<GlHandle>,
    texture: Option<GlHandle>,
}

impl<C: RenderContext> Scene<C> {
    /// An uninitialized scene; nothing touches GL until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(ctx: Rc<C>, config: &WindowConfig, variant: Variant, assets: SceneAssets) -> Self {
        Self {
            shader: ShaderProgram::new(Rc::clone(&ctx)),
            ctx,
            window: WindowState::new(config),
            variant,
            assets,
            state: SceneState::Uninitialized,
            vao: None,
            vbo: None,
            ebo: None,
            texture: None,
        }
    }

    /// Build the shader and upload the geometry (and texture).
    ///
    /// A ready scene is cleaned up first. On failure everything created
    /// during the attempt is released again and the scene stays
    /// [`SceneState::Uninitialized`].
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if the shader does not build (or its files
    /// cannot be read), [`SceneError::Decode`] if the texture image cannot be
    /// loaded, [`SceneError::Object`] if the driver runs out of object names.
    pub fn initialize(&mut self) -> Result<(), SceneError> {
        self.cleanup();

        if let Err(e) = self.try_initialize() {
            self.cleanup();
            return Err(e);
        }

        self.state = SceneState::Ready;
        info!("Initialized {:?} scene", self.variant);
        Ok(())
    }

    fn try_initialize(&mut self) -> Result<(), SceneError> {
        match self.variant {
            Variant::Triangle => {
                self.shader
                    .compile(shaders::POSITION_VERTEX_SRC, shaders::ORANGE_FRAGMENT_SRC)?;
                self.upload_mesh(&TRIANGLE, None)
            }
            Variant::Quad => {
                self.shader
                    .compile(shaders::POSITION_VERTEX_SRC, shaders::ORANGE_FRAGMENT_SRC)?;
                self.upload_mesh(&QUAD, Some(QUAD_INDICES.as_slice()))
            }
            Variant::Colored => {
                self.shader
                    .compile(shaders::COLOR_VERTEX_SRC, shaders::COLOR_FRAGMENT_SRC)?;
                self.upload_mesh(&COLORED_TRIANGLE, None)
            }
            Variant::Uniform => {
                self.shader.compile(
                    shaders::POSITION_VERTEX_SRC,
                    shaders::UNIFORM_COLOR_FRAGMENT_SRC,
                )?;
                self.upload_mesh(&TRIANGLE, None)
            }
            Variant::Textured => {
                let dir = &self.assets.shader_dir;
                self.shader.load_from_file(
                    dir.join(shaders::TEXTURED_VERTEX_FILE),
                    dir.join(shaders::TEXTURED_FRAGMENT_FILE),
                )?;
                self.upload_mesh(&TEXTURED_QUAD, Some(QUAD_INDICES.as_slice()))?;
                self.upload_texture()
            }
        }
    }

    /// Create the vertex array and buffers, upload `vertices` (and
    /// `indices`), and describe the vertex layout.
    ///
    /// Handles are stored as soon as they exist so a later failure can
    /// release them.
    fn upload_mesh<V: VertexLayout>(
        &mut self,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) -> Result<(), SceneError> {
        let ctx = &*self.ctx;

        let vao = ctx.create_vertex_array().map_err(SceneError::Object)?;
        self.vao = Some(vao);
        let vbo = ctx.create_buffer().map_err(SceneError::Object)?;
        self.vbo = Some(vbo);

        // The element buffer binding is recorded in the vertex array, so it
        // has to be bound first.
        ctx.bind_vertex_array(Some(vao));

        ctx.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        ctx.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        if let Some(indices) = indices {
            let ebo = match ctx.create_buffer() {
                Ok(ebo) => ebo,
                Err(e) => {
                    ctx.bind_vertex_array(None);
                    return Err(SceneError::Object(e));
                }
            };
            self.ebo = Some(ebo);
            ctx.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            ctx.buffer_data(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
        }

        // Vertex layouts are a few dozen bytes wide.
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let stride = V::stride() as i32;
        for attribute in V::ATTRIBUTES {
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let offset = attribute.offset as i32;
            ctx.vertex_attrib_pointer_f32(attribute.location, attribute.components, stride, offset);
            ctx.enable_vertex_attrib_array(attribute.location);
        }

        ctx.bind_buffer(glow::ARRAY_BUFFER, None);
        ctx.bind_vertex_array(None);

        debug!(
            "Uploaded {} vertices and {} indices",
            vertices.len(),
            indices.map_or(0, <[u32]>::len)
        );
        Ok(())
    }

    fn upload_texture(&mut self) -> Result<(), SceneError> {
        let path = &self.assets.texture;
        let image = DecodedImage::load(path).map_err(|source| SceneError::Decode {
            path: path.clone(),
            source,
        })?;
        let texture = texture::upload(&*self.ctx, &image).map_err(SceneError::Object)?;
        self.texture = Some(texture);

        self.shader.use_program();
        self.shader.set_int("u_texture", 0);
        Ok(())
    }

    /// Forward a window event.
    ///
    /// A resize also resizes the surface and sets the viewport to the new size.
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::Resized(size) = event {
            let width = i32::try_from(size.width).unwrap_or(i32::MAX);
            let height = i32::try_from(size.height).unwrap_or(i32::MAX);
            self.ctx.resize_surface(size.width, size.height);
            self.ctx.viewport(0, 0, width, height);
        }

        self.window.process_event(event);
    }

    /// Draw one frame and present it. Does nothing until the scene is ready.
    pub fn render(&self) {
        if self.state != SceneState::Ready {
            return;
        }
        let ctx = &*self.ctx;

        let [r, g, b, a] = CLEAR_COLOR;
        ctx.clear_color(r, g, b, a);
        ctx.clear(glow::COLOR_BUFFER_BIT);

        self.shader.use_program();
        if self.variant == Variant::Uniform {
            let [r, g, b, a] = UNIFORM_COLOR;
            self.shader.set_vec4("u_color", r, g, b, a);
        }

        if let Some(texture) = self.texture {
            ctx.active_texture(glow::TEXTURE0);
            ctx.bind_texture(Some(texture));
        }
        ctx.bind_vertex_array(self.vao);

        match self.variant.draw_command() {
            DrawCommand::Arrays { count } => ctx.draw_arrays(glow::TRIANGLES, 0, count),
            DrawCommand::Elements { count } => {
                ctx.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0);
            }
        }

        ctx.present();
    }

    /// Release every GL object the scene holds. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        let ctx = &*self.ctx;
        if let Some(vao) = self.vao.take() {
            ctx.delete_vertex_array(vao);
        }
        if let Some(vbo) = self.vbo.take() {
            ctx.delete_buffer(vbo);
        }
        if let Some(ebo) = self.ebo.take() {
            ctx.delete_buffer(ebo);
        }
        if let Some(texture) = self.texture.take() {
            ctx.delete_texture(texture);
        }
        self.shader.release();
        self.state = SceneState::Uninitialized;
    }

    /// The render context shared with the shader program.
    #[must_use]
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Whether the scene currently holds its GL objects.
    #[must_use]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// What this scene draws.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Title and size as of the last event.
    #[must_use]
    pub fn window(&self) -> &WindowState {
        &self.window
    }

    /// The scene's shader program.
    #[must_use]
    pub fn shader(&self) -> &ShaderProgram<C> {
        &self.shader
    }
}

impl<C: RenderContext> Drop for Scene<C> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
