//! The single owner of catalog, query configuration and playback selection.
//!
//! Presentation code reads [`Archive::displayed`] and [`Archive::projection`] and
//! reports user events through the `select_*`, `pick_random` and `set_*` methods.

use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

use crate::catalog::{FlatCatalog, FlatEntry, Video, load_videos};
use crate::error::CatalogError;
use crate::projection::{Projection, project};
use crate::query::{QueryConfig, SortOrder, TagFilter, query};
use crate::selection::Selection;

pub struct Archive {
  catalog: FlatCatalog,
  config: QueryConfig,
  /// Positions into `catalog.entries()` for the current configuration.
  displayed: Vec<usize>,
  selection: Selection,
}

impl Archive {
  pub fn new(catalog: FlatCatalog, config: QueryConfig) -> Result<Self, CatalogError> {
    if catalog.videos().is_empty() {
      return Err(CatalogError::Empty);
    }
    let displayed = query(&catalog, &config);
    let selection = Selection::new(&catalog);
    info!(
      videos = catalog.videos().len(),
      songs = catalog.entries().len(),
      displayed = displayed.len(),
      "archive: ready"
    );
    Ok(Self { catalog, config, displayed, selection })
  }

  pub fn from_videos(videos: Vec<Video>, config: QueryConfig) -> Result<Self, CatalogError> {
    Self::new(FlatCatalog::build(videos), config)
  }

  pub fn load(path: &Path, config: QueryConfig) -> Result<Self, CatalogError> {
    Self::from_videos(load_videos(path)?, config)
  }

  // --- Reads ---

  pub fn catalog(&self) -> &FlatCatalog {
    &self.catalog
  }

  pub fn config(&self) -> &QueryConfig {
    &self.config
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn displayed(&self) -> &[usize] {
    &self.displayed
  }

  /// Displayed entries in display order, paired with their catalog position.
  pub fn displayed_entries(&self) -> impl Iterator<Item = (usize, &FlatEntry)> + '_ {
    self.displayed.iter().filter_map(|&i| self.catalog.entry(i).map(|e| (i, e)))
  }

  pub fn current_video(&self) -> &Video {
    // Safety: the catalog is non-empty and Selection only ever holds in-range indices.
    &self.catalog.videos()[self.selection.current_video()]
  }

  pub fn projection(&self) -> Projection {
    project(self.current_video(), self.selection.current_offset())
  }

  pub fn is_active(&self, entry_index: usize) -> bool {
    self.catalog.entry(entry_index).is_some_and(|e| self.selection.is_active(&self.catalog, e))
  }

  // --- Selection events ---

  pub fn select_video(&mut self, index: usize) {
    self.selection.select_video(&self.catalog, index);
  }

  /// Select the entry at `entry_index` in the flat catalog.
  pub fn select_song_entry(&mut self, entry_index: usize) {
    let Some(entry) = self.catalog.entry(entry_index) else {
      debug!(entry_index, "archive: no such entry");
      return;
    };
    self.selection.select_song_entry(&self.catalog, entry);
  }

  pub fn select_timestamp(&mut self, offset: &str) {
    self.selection.select_timestamp(&self.catalog, offset);
  }

  /// Jump to a random displayed song. Returns its catalog position.
  pub fn pick_random(&mut self) -> Option<usize> {
    self.pick_random_with(&mut rand::rng())
  }

  pub fn pick_random_with<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
    self.selection.pick_random(&self.catalog, &self.displayed, rng)
  }

  // --- Query configuration ---

  pub fn set_tag_filter(&mut self, tag_filter: TagFilter) {
    if self.config.tag_filter != tag_filter {
      self.config.tag_filter = tag_filter;
      self.recompute();
    }
  }

  pub fn set_search_text(&mut self, search_text: &str) {
    if self.config.search_text != search_text {
      self.config.search_text = search_text.to_string();
      self.recompute();
    }
  }

  pub fn set_sort_order(&mut self, sort_order: SortOrder) {
    if self.config.sort_order != sort_order {
      self.config.sort_order = sort_order;
      self.recompute();
    }
  }

  fn recompute(&mut self) {
    self.displayed = query(&self.catalog, &self.config);
    debug!(
      filter = self.config.tag_filter.label(),
      search = %self.config.search_text,
      sort = self.config.sort_order.label(),
      displayed = self.displayed.len(),
      "archive: displayed list recomputed"
    );
  }
}
