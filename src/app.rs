use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use vodshelf::constants::constants;
use vodshelf::{Archive, PlayerCue, TimestampRow};

use crate::player::ExternalPlayer;
use crate::theme::{THEMES, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  /// Moving through the song list.
  Browse,
  /// Typing into the search box; the list narrows live.
  Search,
  /// Moving through the current video's timestamp list.
  Timestamps,
}

pub struct App {
  pub archive: Archive,
  pub mode: AppMode,
  pub theme_index: usize,
  /// Highlighted row in the displayed song list.
  pub list_state: ListState,
  /// Highlighted row in the description's timestamp list.
  pub timestamp_state: ListState,
  pub timestamps_expanded: bool,
  pub search_input: String,
  /// Cursor position within the search input (char index).
  pub search_cursor: usize,
  /// Horizontal scroll offset for the search input.
  pub search_scroll: usize,
  pub player: ExternalPlayer,
  pub last_error: Option<String>,
  pub should_quit: bool,
  /// Video id the description view state belongs to.
  described_video: Option<String>,
  /// When the last error was set, for auto-dismiss.
  error_time: Option<Instant>,
}

impl App {
  pub fn new(archive: Archive, player: ExternalPlayer, theme_index: usize) -> Self {
    let mut list_state = ListState::default();
    if !archive.displayed().is_empty() {
      list_state.select(Some(0));
    }
    let search_input = archive.config().search_text.clone();
    let search_cursor = search_input.chars().count();

    Self {
      archive,
      mode: AppMode::Browse,
      theme_index: theme_index.min(THEMES.len() - 1),
      list_state,
      timestamp_state: ListState::default(),
      timestamps_expanded: false,
      search_input,
      search_cursor,
      search_scroll: 0,
      player,
      last_error: None,
      should_quit: false,
      described_video: None,
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    // Safety: theme_index is clamped in new() and advanced modulo THEMES.len().
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after the configured delay.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_dismiss_secs)
    {
      self.clear_error();
    }
  }

  // --- Song list ---

  /// Catalog position of the highlighted list row.
  pub fn highlighted_entry(&self) -> Option<usize> {
    self.list_state.selected().and_then(|row| self.archive.displayed().get(row).copied())
  }

  pub fn move_highlight(&mut self, delta: isize) {
    let count = self.archive.displayed().len();
    if count == 0 {
      self.list_state.select(None);
      return;
    }
    let current = self.list_state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(count as isize) as usize;
    self.list_state.select(Some(next));
  }

  pub fn highlight_first(&mut self) {
    if !self.archive.displayed().is_empty() {
      self.list_state.select(Some(0));
    }
  }

  pub fn highlight_last(&mut self) {
    let count = self.archive.displayed().len();
    if count > 0 {
      self.list_state.select(Some(count - 1));
    }
  }

  /// Keep the list highlight inside the displayed range after it changes.
  fn clamp_highlight(&mut self) {
    let count = self.archive.displayed().len();
    if count == 0 {
      self.list_state.select(None);
    } else {
      let sel = self.list_state.selected().unwrap_or(0);
      if sel >= count {
        self.list_state.select(Some(count - 1));
      } else {
        self.list_state.select(Some(sel));
      }
    }
  }

  pub fn play_highlighted(&mut self) {
    let Some(entry) = self.highlighted_entry() else { return };
    self.archive.select_song_entry(entry);
  }

  pub fn play_random(&mut self) {
    match self.archive.pick_random() {
      Some(entry) => {
        let row = self.archive.displayed().iter().position(|&i| i == entry);
        self.list_state.select(row);
        debug!(entry, "random pick");
      }
      None => self.set_error("No songs to pick from.".to_string()),
    }
  }

  // --- Query configuration ---

  pub fn cycle_tag_filter(&mut self) {
    let next = self.archive.config().tag_filter.next();
    self.archive.set_tag_filter(next);
    self.clamp_highlight();
  }

  pub fn toggle_sort_order(&mut self) {
    let next = self.archive.config().sort_order.next();
    self.archive.set_sort_order(next);
    self.clamp_highlight();
  }

  /// Push the search box contents into the archive.
  pub fn apply_search(&mut self) {
    self.archive.set_search_text(&self.search_input);
    self.clamp_highlight();
  }

  pub fn clear_search(&mut self) {
    self.search_input.clear();
    self.search_cursor = 0;
    self.search_scroll = 0;
    self.apply_search();
  }

  // --- Timestamps ---

  pub fn visible_timestamps(&self) -> Vec<TimestampRow> {
    self.archive.projection().description.visible_timestamps(self.timestamps_expanded).to_vec()
  }

  pub fn move_timestamp(&mut self, delta: isize) {
    let count = self.visible_timestamps().len();
    if count == 0 {
      self.timestamp_state.select(None);
      return;
    }
    let current = self.timestamp_state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(count as isize) as usize;
    self.timestamp_state.select(Some(next));
  }

  pub fn play_highlighted_timestamp(&mut self) {
    let Some(row) = self.timestamp_state.selected() else { return };
    let Some(offset) = self.visible_timestamps().get(row).map(|t| t.offset.clone()) else { return };
    self.archive.select_timestamp(&offset);
  }

  pub fn toggle_timestamps_expanded(&mut self) {
    self.timestamps_expanded = !self.timestamps_expanded;
    let count = self.visible_timestamps().len();
    if let Some(sel) = self.timestamp_state.selected()
      && sel >= count
    {
      self.timestamp_state.select(count.checked_sub(1));
    }
  }

  /// Reset the description view when the current video changes.
  fn refresh_description_state(&mut self, cue: &PlayerCue) {
    if self.described_video.as_deref() == Some(cue.video_id.as_str()) {
      return;
    }
    self.described_video = Some(cue.video_id.clone());
    self.timestamps_expanded = false;
    let count = self.visible_timestamps().len();
    self.timestamp_state.select(if count > 0 { Some(0) } else { None });
  }

  // --- Player ---

  /// Per-frame housekeeping: expire errors, drain player status, follow the cue.
  pub async fn tick(&mut self) {
    self.expire_error();
    self.player.check_status();

    let cue = self.archive.projection().cue;
    self.refresh_description_state(&cue);
    if let Err(e) = self.player.sync(&cue).await {
      self.set_error(format!("Playback error: {:#}", e));
    }
  }

  pub async fn stop_player(&mut self) {
    if let Err(e) = self.player.stop().await {
      self.set_error(format!("Stop failed: {:#}", e));
    }
    info!("player: stopped by user");
  }

  /// URL of the current video at the current position, for opening elsewhere.
  pub fn current_watch_url(&self) -> String {
    self.archive.projection().cue.watch_url()
  }

  /// Autoplaying embed player for the current cue.
  pub fn current_embed_url(&self) -> String {
    self.archive.projection().cue.embed_url()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use vodshelf::{QueryConfig, TagFilter};

  const CATALOG: &str = r#"[
    {"isLivestream": true, "videoUrl": "https://youtu.be/s1", "artist": "Rin", "videoId": "s1",
     "date": "2024-05-01", "title": "Stream",
     "songs": [
       {"title": "One", "artist": "Rin", "start": "00:30", "tags": ["cover"]},
       {"title": "Two", "artist": "Rin", "start": "04:00", "tags": ["original"]},
       {"title": "Three", "artist": "Rin", "start": "09:15", "tags": ["cover"]}
     ]},
    {"isLivestream": false, "videoUrl": "https://youtu.be/m1", "artist": "Rin", "videoId": "m1",
     "date": "2023-01-01", "title": "MV",
     "songs": [{"title": "Solo", "artist": "Rin", "start": "00:00", "tags": ["original"]}]}
  ]"#;

  fn app() -> App {
    let videos = vodshelf::catalog::parse_videos(CATALOG).unwrap();
    let archive = Archive::from_videos(videos, QueryConfig::default()).unwrap();
    App::new(archive, ExternalPlayer::new("mpv".to_string(), false), 0)
  }

  #[test]
  fn highlight_wraps() {
    let mut app = app();
    assert_eq!(app.list_state.selected(), Some(0));
    app.move_highlight(-1);
    assert_eq!(app.list_state.selected(), Some(3));
    app.move_highlight(1);
    assert_eq!(app.list_state.selected(), Some(0));
  }

  #[test]
  fn filter_change_clamps_highlight() {
    let mut app = app();
    app.highlight_last();
    app.archive.set_tag_filter(TagFilter::Cover);
    app.clamp_highlight();
    assert_eq!(app.list_state.selected(), Some(1));
  }

  #[test]
  fn search_with_no_results_clears_highlight() {
    let mut app = app();
    app.search_input = "nothing".to_string();
    app.apply_search();
    assert_eq!(app.list_state.selected(), None);
    assert_eq!(app.highlighted_entry(), None);
    app.clear_search();
    assert_eq!(app.list_state.selected(), Some(0));
  }

  #[test]
  fn play_highlighted_moves_selection() {
    let mut app = app();
    // newest first: One, Two, Three, Solo
    app.move_highlight(2);
    app.play_highlighted();
    assert_eq!(app.archive.selection().current_offset(), Some("09:15"));
  }

  #[test]
  fn random_pick_highlights_row() {
    let mut app = app();
    app.play_random();
    let entry = app.highlighted_entry().unwrap();
    assert!(app.archive.is_active(entry));
  }

  #[test]
  fn random_pick_with_empty_list_sets_error() {
    let mut app = app();
    app.search_input = "nothing".to_string();
    app.apply_search();
    app.play_random();
    assert!(app.last_error.is_some());
  }

  #[tokio::test]
  async fn timestamps_collapse_and_expand() {
    let mut app = app();
    app.tick().await;
    assert_eq!(app.visible_timestamps().len(), 2);
    app.toggle_timestamps_expanded();
    assert_eq!(app.visible_timestamps().len(), 3);
    app.move_timestamp(2);
    app.play_highlighted_timestamp();
    assert_eq!(app.archive.projection().cue.offset_seconds, 555);
    app.toggle_timestamps_expanded();
    assert_eq!(app.timestamp_state.selected(), Some(1));
  }

  #[tokio::test]
  async fn video_change_resets_description_view() {
    let mut app = app();
    app.tick().await;
    app.toggle_timestamps_expanded();
    app.archive.select_video(1);
    app.tick().await;
    assert!(!app.timestamps_expanded);
    assert_eq!(app.timestamp_state.selected(), Some(0));
  }

  #[test]
  fn watch_url_carries_position() {
    let mut app = app();
    app.archive.select_timestamp("04:00");
    assert_eq!(app.current_watch_url(), "https://www.youtube.com/watch?v=s1&t=240s");
  }

  #[test]
  fn embed_url_follows_selection() {
    let mut app = app();
    app.archive.select_timestamp("09:15");
    assert!(app.current_embed_url().starts_with("https://www.youtube.com/embed/s1?autoplay=1"));
    assert!(app.current_embed_url().ends_with("&start=555"));
    app.archive.select_video(1);
    assert!(!app.current_embed_url().contains("start="));
  }
}
