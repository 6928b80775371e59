//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available.
//! Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // YouTube endpoints
  pub watch_url_base: String,
  pub embed_url_base: String,

  // Description panel
  pub initial_timestamp_count: usize,
  pub synthetic_timestamp: String,

  // External player
  pub player_command: String,
  pub player_args: Vec<String>,

  // Status bar
  pub error_dismiss_secs: u64,

  // Logging
  pub log_file_prefix: String,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed the first test run catches it.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
