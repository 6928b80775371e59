use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the static catalog. Nothing after load returns an error.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Failed to read catalog {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Malformed catalog: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("Catalog contains no videos")]
  Empty,
}
