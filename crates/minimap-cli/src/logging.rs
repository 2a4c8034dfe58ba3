//! Logging setup.
//!
//! The viewer owns the terminal in raw mode, so it logs to
//! `<data_dir>/logs/minimap.log`. Every other command logs to stderr.
//! `RUST_LOG` takes priority over `general.log_level`.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minimap_core::AppConfig;

const LOG_FILE_NAME: &str = "minimap.log";

fn filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()))
}

pub fn init_stderr(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Must be held for the lifetime of the program so buffered lines are flushed
pub fn init_file(config: &AppConfig) -> Result<WorkerGuard> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    tracing::info!(log_file = %log_dir.join(LOG_FILE_NAME).display(), "logging initialised");
    Ok(guard)
}
