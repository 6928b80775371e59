use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use vodshelf::constants::constants;

use crate::config::project_dirs;

/// Log directory: the platform data dir, or the temp dir when none is known.
pub fn log_dir() -> PathBuf {
  project_dirs().map(|d| d.data_local_dir().join("logs")).unwrap_or_else(|| std::env::temp_dir().join("vodshelf-logs"))
}

/// Install a daily-rolling file subscriber. The terminal belongs to the UI, so nothing goes to stderr.
///
/// The returned guard flushes buffered lines on drop; hold it for the life of the program.
pub fn init_logging() -> Result<WorkerGuard> {
  let dir = log_dir();
  std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create log directory {}", dir.display()))?;

  let file_appender = tracing_appender::rolling::daily(&dir, &constants().log_file_prefix);
  let (writer, guard) = tracing_appender::non_blocking(file_appender);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vodshelf=debug"));

  tracing_subscriber::fmt()
    .with_writer(writer)
    .with_target(true)
    .with_ansi(false)
    .with_env_filter(filter)
    .try_init()
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

  Ok(guard)
}
