//! Error types for each layer: context creation, shader programs, scenes, and
//! the application as a whole.

use std::path::PathBuf;

use thiserror::Error;

use crate::context::ShaderStage;

/// The native window or its OpenGL context could not be created.
#[derive(Error, Debug)]
pub enum CreationError {
    /// The windowing system refused to create the window or pick a GL config.
    #[error("failed to create window: {0}")]
    Window(String),
    /// A raw window handle could not be obtained from the window.
    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),
    /// glutin failed to create the display, surface, or context.
    #[error("failed to create OpenGL context: {0}")]
    Context(#[from] glutin::error::Error),
}

/// A shader program failed to build.
#[derive(Error, Debug)]
pub enum ShaderError {
    /// A single stage did not compile.
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// The driver's info log.
        log: String,
    },
    /// Both stages compiled but the program did not link.
    #[error("shader program linking failed:\n{log}")]
    Link {
        /// The driver's program info log.
        log: String,
    },
    /// A shader source file could not be read.
    #[error("failed to read shader file {}: {source}", .path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The driver could not allocate a shader or program object.
    #[error("failed to create shader object: {0}")]
    Object(String),
}

/// A scene failed to initialize.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene's shader program did not build.
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// The texture image could not be opened or decoded.
    #[error("failed to load texture {}: {source}", .path.display())]
    Decode {
        /// The image file.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The driver could not allocate a vertex array, buffer, or texture.
    #[error("failed to create GL object: {0}")]
    Object(String),
}

/// Any failure that ends the application before its main loop runs.
#[derive(Error, Debug)]
pub enum AppError {
    /// winit could not create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The window or its GL context could not be created.
    #[error(transparent)]
    Creation(#[from] CreationError),
    /// The scene failed to initialize.
    #[error("failed to initialize scene: {0}")]
    Scene(#[from] SceneError),
}
