//! A minimal OpenGL renderer in the style of the classic "hello triangle"
//! tutorials, built on [glow], [glutin] and [winit].
//!
//! The crate opens one window with an OpenGL 3.3 core context, compiles a
//! shader program, uploads a fixed piece of geometry once, and draws it with a
//! single draw call per frame.
//!
//! # Layers
//!
//! - **Window/context** ([`native`], [`window`]): [`GlowContext`] owns the
//!   winit window, the glutin surface and context, and the loaded
//!   [`glow::Context`]. [`WindowState`] tracks the window size from events.
//! - **Shader programs** ([`program`]): [`ShaderProgram`] compiles and links a
//!   vertex/fragment pair with stage-specific diagnostics and sets uniforms.
//! - **Scene** ([`scene`]): [`Scene`] owns the vertex array, buffers and
//!   texture of one [`Variant`] and issues the per-frame draw.
//!
//! Shader programs and scenes are written against the [`RenderContext`]
//! trait rather than a concrete GL context, so their resource handling can be
//! checked without a GPU.
//!
//! # Variants
//!
//! | Variant    | Geometry                     | Draw call               |
//! |------------|------------------------------|-------------------------|
//! | `triangle` | orange triangle              | `glDrawArrays`, 3       |
//! | `quad`     | orange quad                  | `glDrawElements`, 6     |
//! | `colored`  | per-vertex colored triangle  | `glDrawArrays`, 3       |
//! | `uniform`  | triangle with uniform color  | `glDrawArrays`, 3       |
//! | `textured` | textured quad, shader files  | `glDrawElements`, 6     |
//!
//! # Resource lifetime
//!
//! Every GL object is created during [`Scene::initialize`] and deleted by
//! [`Scene::cleanup`] or on drop. A failed initialization releases whatever it
//! had created, so the scene is either fully ready or holds nothing.
//!
//! [glow]: https://docs.rs/glow
//! [glutin]: https://docs.rs/glutin
//! [winit]: https://docs.rs/winit
//! [`GlowContext`]: native::GlowContext
//! [`WindowState`]: window::WindowState
//! [`ShaderProgram`]: program::ShaderProgram
//! [`Scene`]: scene::Scene
//! [`Scene::initialize`]: scene::Scene::initialize
//! [`Scene::cleanup`]: scene::Scene::cleanup
//! [`Variant`]: scene::Variant
//! [`RenderContext`]: context::RenderContext

pub mod app;
pub mod context;
pub mod error;
pub mod logging;
pub mod native;
pub mod program;
pub mod scene;
pub mod shaders;
pub mod texture;
pub mod types;
pub mod window;

#[cfg(test)]
mod recording;

pub use app::{App, AppConfig};
pub use error::{AppError, CreationError, SceneError, ShaderError};
