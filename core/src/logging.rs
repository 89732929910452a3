use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::paths;

pub const LOG_FILE_NAME: &str = "buzz.log";

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging to a daily-rolling file in the logs dir plus stdout.
///
/// Falls back to stdout-only logging if the file layer cannot be set up.
pub fn init_logging(config: &LoggingConfig) {
    if !config.file_enabled {
        init_stdout_only(&config.level);
        return;
    }

    let file_logging_result = (|| -> anyhow::Result<()> {
        let log_dir = paths::get_logs_dir()?;
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(env_filter(&config.level))
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stdout))
            .try_init()?;

        // Dropping the guard would close the log file
        std::mem::forget(guard);
        Ok(())
    })();

    if let Err(e) = file_logging_result {
        eprintln!("Warning: Failed to initialize file logging: {}", e);
        eprintln!("Falling back to stdout-only logging");
        init_stdout_only(&config.level);
    }
}

fn init_stdout_only(level: &str) {
    // A subscriber may already be installed (tests, repeated init).
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(std::io::stdout))
        .try_init();
}

/// Log platform information on startup
pub fn log_platform_info() {
    tracing::info!(
        platform = std::env::consts::OS,
        architecture = std::env::consts::ARCH,
        family = std::env::consts::FAMILY,
        version = env!("CARGO_PKG_VERSION"),
        "Buzz overlay starting"
    );
}
