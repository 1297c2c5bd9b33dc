use std::sync::Once;

/// Settings for [`init_logging`].
///
/// `env_filter` uses `env_logger` syntax (e.g. "info", or
/// "ziggurat_engine=debug,wgpu=warn"). Resolution order: this field, then
/// the `RUST_LOG` variable, then plain info level.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
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

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend. Safe to call more than once;
/// only the first call takes effect. Belongs at the top of `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.write_style(config.write_style);

        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());
        match filter {
            Some(f) => {
                builder.parse_filters(&f);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.init();
        log::debug!("logger installed");
    });
}
