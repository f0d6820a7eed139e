//! Window configuration and the window state a scene keeps in sync with
//! events.

use log::info;
use winit::event::WindowEvent;

/// Default client-area width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default client-area height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default window title.
pub const DEFAULT_TITLE: &str = "LearnOpenGL";

/// How to open the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Client-area width in physical pixels.
    pub width: u32,
    /// Client-area height in physical pixels.
    pub height: u32,
    /// Title bar text.
    pub title: String,
    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            vsync: true,
        }
    }
}

/// Cached title and client-area size of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    title: String,
    width: u32,
    height: u32,
}

impl WindowState {
    /// Starts from the configured title and size.
    #[must_use]
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
        }
    }

    /// Tracks resizes and logs close requests.
    ///
    /// Closing is left to the event loop that owns the window.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => info!("Window close requested."),
            WindowEvent::Resized(size) => {
                self.width = size.width;
                self.height = size.height;
                info!("Window resized to {}x{}", self.width, self.height);
            }
            _ => {}
        }
    }

    /// Window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Last reported width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Last reported height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}
