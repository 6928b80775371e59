use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use vodshelf::{SortOrder, TagFilter};

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Args {
  /// Catalog JSON file (defaults to `catalog_path` in prefs.toml)
  pub catalog: Option<PathBuf>,

  /// Initial tag filter
  #[arg(short, long)]
  pub filter: Option<CliTagFilter>,

  /// Initial sort order
  #[arg(short, long)]
  pub sort: Option<CliSortOrder>,

  /// Browse only; never launch the external player
  #[arg(long)]
  pub no_player: bool,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  pub completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliTagFilter {
  All,
  Original,
  Cover,
  Collab,
  Karaoke,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSortOrder {
  Newest,
  Oldest,
}

impl From<CliTagFilter> for TagFilter {
  fn from(cli: CliTagFilter) -> Self {
    match cli {
      CliTagFilter::All => TagFilter::All,
      CliTagFilter::Original => TagFilter::Original,
      CliTagFilter::Cover => TagFilter::Cover,
      CliTagFilter::Collab => TagFilter::Collab,
      CliTagFilter::Karaoke => TagFilter::Karaoke,
    }
  }
}

impl From<CliSortOrder> for SortOrder {
  fn from(cli: CliSortOrder) -> Self {
    match cli {
      CliSortOrder::Newest => SortOrder::Newest,
      CliSortOrder::Oldest => SortOrder::Oldest,
    }
  }
}

/// CLI flag wins, then the config value, then the default.
pub fn resolve_tag_filter(cli: Option<CliTagFilter>, config: Option<&str>) -> TagFilter {
  match cli {
    Some(f) => f.into(),
    None => config.map(TagFilter::from_config).unwrap_or_default(),
  }
}

pub fn resolve_sort_order(cli: Option<CliSortOrder>, config: Option<&str>) -> SortOrder {
  match cli {
    Some(s) => s.into(),
    None => config.map(SortOrder::from_config).unwrap_or_default(),
  }
}
