//! File-based logging so diagnostics never write to the terminal the TUI
//! owns.

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// Logs are written to `~/.local/share/sentui/logs/`. Log level is
/// controlled by the `SENTUI_LOG` environment variable, e.g.
/// `SENTUI_LOG=debug sentui`.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "sentui.log");

    let env_filter = EnvFilter::try_from_env("SENTUI_LOG")
        .unwrap_or_else(|_| EnvFilter::new("sentui=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("sentui starting, logging to {}", log_dir.display());

    Ok(())
}

fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("sentui").join("logs")
}
