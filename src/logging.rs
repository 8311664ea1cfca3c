use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

const LOG_FILE_PREFIX: &str = "gbv.log";

/// Installs a file-only subscriber. The terminal belongs to the viewer, so
/// nothing is ever written to stderr while it runs.
///
/// Keep the returned guard alive until shutdown or buffered lines are lost.
pub fn init_logging(config: &LogConfig) -> AppResult<WorkerGuard> {
    let log_dir = config.directory.clone().unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir).map_err(|source| {
        AppError::io_with_context(
            source,
            format!("failed to create log directory: {}", log_dir.display()),
        )
    })?;

    // Files look like gbv.log.2026-10-19
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| AppError::unsupported(format!("logging already initialized: {err}")))?;

    Ok(guard)
}

pub fn default_log_dir() -> PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME")
        && !state.is_empty()
    {
        return PathBuf::from(state).join("gbv");
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Path::new(&home).join(".local").join("state").join("gbv");
    }
    PathBuf::from(".")
}
