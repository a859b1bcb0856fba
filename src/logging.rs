//! File logging setup. The TUI owns the terminal, so logs go to disk only.
//! Level is controlled by the `PAGECRAFT_LOG` environment variable.

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pagecraft.log");

    let env_filter = EnvFilter::try_from_env("PAGECRAFT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pagecraft=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!("pagecraft starting, logging to {}", log_dir.display());

    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagecraft")
        .join("logs")
}
