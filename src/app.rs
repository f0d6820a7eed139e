//! The winit application: opens the window, drives the scene, and tears
//! everything down in reverse order.

use std::rc::Rc;

use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::error::AppError;
use crate::native::GlowContext;
use crate::scene::{Scene, SceneAssets, Variant};
use crate::window::WindowConfig;

/// Everything needed to start the application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Window size, title and vsync.
    pub window: WindowConfig,
    /// Scene to draw.
    pub variant: Variant,
    /// Files the textured scene reads.
    pub assets: SceneAssets,
}

/// Runs one scene in one window until it is closed or Escape is pressed.
pub struct App {
    config: AppConfig,
    scene: Option<Scene<GlowContext>>,
    failure: Option<AppError>,
}

impl App {
    /// An application that has not opened its window yet.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            scene: None,
            failure: None,
        }
    }

    /// Run the event loop on the calling thread until the window closes.
    ///
    /// # Errors
    ///
    /// Returns the first startup failure: the event loop, the window or its
    /// GL context, or the scene.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = Self::new(config);

        info!("Entering main loop...");
        event_loop.run_app(&mut app)?;

        match app.failure.take() {
            Some(e) => Err(e),
            None => {
                info!("Application terminated successfully");
                Ok(())
            }
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Scene<GlowContext>, AppError> {
        let ctx = Rc::new(GlowContext::new(event_loop, &self.config.window)?);
        let mut scene = Scene::new(
            ctx,
            &self.config.window,
            self.config.variant,
            self.config.assets.clone(),
        );
        scene.initialize()?;
        Ok(scene)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: AppError) {
        error!("{e}");
        self.failure = Some(e);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(scene) = &self.scene {
            scene.context().window().request_redraw();
        }
    }
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() || self.failure.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(scene) => {
                self.scene = Some(scene);
                self.request_redraw();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::RedrawRequested => scene.render(),
            WindowEvent::KeyboardInput { event: key, .. } if is_escape(key) => {
                info!("Escape pressed, exiting");
                event_loop.exit();
            }
            WindowEvent::CloseRequested => {
                scene.process_event(&event);
                event_loop.exit();
            }
            _ => scene.process_event(&event),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        // Redraw continuously; vsync paces the loop.
        self.request_redraw();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GL objects go first, then the context, then the window.
        self.scene = None;
    }
}
