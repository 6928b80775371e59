use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// User preferences from `prefs.toml`. Read once at startup, never written back.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  pub catalog_path: Option<PathBuf>,
  pub theme_name: Option<String>,
  pub sort_order: Option<String>,
  pub tag_filter: Option<String>,
  pub player_command: Option<String>,
}

pub fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", "vodshelf")
}

impl Config {
  pub fn load() -> Self {
    let Some(proj_dirs) = project_dirs() else { return Self::default() };
    let config_file = proj_dirs.config_dir().join("prefs.toml");
    match std::fs::read_to_string(&config_file) {
      Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
        warn!(path = %config_file.display(), err = %e, "config: ignoring malformed prefs.toml");
        Self::default()
      }),
      Err(_) => Self::default(),
    }
  }

  pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}
