//! Logger initialization for the binary.

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "learnopengl=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives; `None` falls back to `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Whether to color the output.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Install the global logger. Later calls are ignored.
///
/// The filter comes from `config.env_filter`, then `RUST_LOG`, then defaults
/// to `info`.
pub fn init_logging(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = config.env_filter {
        builder.parse_filters(&filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.write_style(config.write_style);
    // The first logger installed wins.
    if builder.try_init().is_ok() {
        log::debug!("logging initialized");
    }
}
