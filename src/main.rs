//! Opens a window and renders one of the tutorial scenes until it is closed
//! or Escape is pressed. Exits with -1 if startup fails.

use std::path::PathBuf;

use clap::Parser;
use learnopengl::logging::{init_logging, LoggingConfig};
use learnopengl::scene::{SceneAssets, Variant, DEFAULT_SHADER_DIR, DEFAULT_TEXTURE};
use learnopengl::window::{WindowConfig, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
use learnopengl::{App, AppConfig};

/// Render a triangle or quad with OpenGL.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Which scene to draw.
    #[arg(long, value_enum, default_value_t = Variant::Quad)]
    variant: Variant,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Window title.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Swap buffers as fast as possible instead of waiting for vblank.
    #[arg(long)]
    no_vsync: bool,

    /// Directory containing textured.vert and textured.frag.
    #[arg(long, default_value = DEFAULT_SHADER_DIR)]
    shader_dir: PathBuf,

    /// Image used by the textured scene.
    #[arg(long, default_value = DEFAULT_TEXTURE)]
    texture: PathBuf,

    /// env_logger filter, overriding RUST_LOG (e.g. "debug").
    #[arg(long)]
    log_filter: Option<String>,
}

impl Cli {
    fn into_config(self) -> (LoggingConfig, AppConfig) {
        let logging = LoggingConfig {
            env_filter: self.log_filter,
            ..LoggingConfig::default()
        };
        let app = AppConfig {
            window: WindowConfig {
                width: self.width,
                height: self.height,
                title: self.title,
                vsync: !self.no_vsync,
            },
            variant: self.variant,
            assets: SceneAssets {
                shader_dir: self.shader_dir,
                texture: self.texture,
            },
        };
        (logging, app)
    }
}

fn main() {
    let (logging, config) = Cli::parse().into_config();
    init_logging(logging);

    if let Err(e) = App::run(config) {
        log::error!("Startup failed: {e}");
        std::process::exit(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_an_800_by_600_quad() {
        let (logging, config) = Cli::parse_from(["learnopengl"]).into_config();

        assert_eq!(logging.env_filter, None);
        assert_eq!(config.variant, Variant::Quad);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.assets, SceneAssets::default());
    }

    #[test]
    fn flags_override_defaults() {
        let (logging, config) = Cli::parse_from([
            "learnopengl",
            "--variant",
            "textured",
            "--width",
            "1024",
            "--no-vsync",
            "--texture",
            "wall.jpg",
            "--log-filter",
            "debug",
        ])
        .into_config();

        assert_eq!(logging.env_filter.as_deref(), Some("debug"));
        assert_eq!(config.variant, Variant::Textured);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, DEFAULT_HEIGHT);
        assert!(!config.window.vsync);
        assert_eq!(config.assets.texture, PathBuf::from("wall.jpg"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
