//! What is currently playing, and how selection events move it.

use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::{FlatCatalog, FlatEntry, Song, VideoMode};

/// Playback position: the current video, and for longform recordings the
/// offset of the current song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  current_video: usize,
  current_offset: Option<String>,
  /// Offset staged by a cross-video song jump, consumed by the next video change.
  pending_offset: Option<String>,
}

impl Selection {
  /// Start on the first video with its default offset.
  pub fn new(catalog: &FlatCatalog) -> Self {
    let mut selection = Self { current_video: 0, current_offset: None, pending_offset: None };
    selection.resolve_video_change(catalog);
    selection
  }

  pub fn current_video(&self) -> usize {
    self.current_video
  }

  pub fn current_offset(&self) -> Option<&str> {
    self.current_offset.as_deref()
  }

  pub fn has_pending_offset(&self) -> bool {
    self.pending_offset.is_some()
  }

  /// Direct navigation to a video. Out-of-range or unchanged indices are no-ops.
  pub fn select_video(&mut self, catalog: &FlatCatalog, index: usize) {
    if catalog.video(index).is_none() {
      warn!(index, videos = catalog.videos().len(), "selection: video index out of range");
      self.pending_offset = None;
      return;
    }
    if index == self.current_video {
      debug!(index, "selection: video already current");
      return;
    }
    self.current_video = index;
    self.resolve_video_change(catalog);
  }

  /// Runs once per video index change.
  fn resolve_video_change(&mut self, catalog: &FlatCatalog) {
    let pending = self.pending_offset.take();
    let Some(video) = catalog.video(self.current_video) else {
      self.current_offset = None;
      return;
    };
    self.current_offset = match video.mode {
      VideoMode::LongformRecording => pending.or_else(|| video.first_song().map(|s| s.offset.clone())),
      VideoMode::ShortformPiece => None,
    };
    debug!(
      video_id = %video.video_id,
      offset = self.current_offset.as_deref().unwrap_or("-"),
      "selection: video changed"
    );
  }

  /// A song picked from the displayed list.
  pub fn select_song_entry(&mut self, catalog: &FlatCatalog, entry: &FlatEntry) {
    let Some(index) = catalog.video_position(&entry.video_id) else {
      warn!(video_id = %entry.video_id, "selection: entry references unknown video");
      return;
    };

    match entry.mode {
      VideoMode::LongformRecording if index == self.current_video => {
        self.current_offset = Some(entry.song.offset.clone());
        debug!(offset = %entry.song.offset, "selection: jump within current video");
      }
      VideoMode::LongformRecording => {
        self.pending_offset = Some(entry.song.offset.clone());
        self.select_video(catalog, index);
      }
      VideoMode::ShortformPiece => {
        self.current_offset = None;
        self.select_video(catalog, index);
      }
    }
  }

  /// A timestamp clicked in the description. Only meaningful for longform recordings.
  pub fn select_timestamp(&mut self, catalog: &FlatCatalog, offset: &str) {
    match catalog.video(self.current_video).map(|v| v.mode) {
      Some(VideoMode::LongformRecording) => {
        self.current_offset = Some(offset.to_string());
        debug!(offset, "selection: timestamp selected");
      }
      _ => debug!(offset, "selection: timestamp ignored for non-longform video"),
    }
  }

  /// Pick uniformly among `displayed` (positions into the flat entry list) and select it.
  /// Returns the chosen position, or `None` when nothing is displayed.
  pub fn pick_random<R: Rng>(&mut self, catalog: &FlatCatalog, displayed: &[usize], rng: &mut R) -> Option<usize> {
    if displayed.is_empty() {
      debug!("selection: random pick with nothing displayed");
      return None;
    }
    let chosen = displayed[rng.random_range(0..displayed.len())];
    let entry = catalog.entry(chosen)?;
    self.select_song_entry(catalog, entry);
    Some(chosen)
  }

  /// The song the current offset points at (longform only, first match).
  pub fn current_song<'a>(&self, catalog: &'a FlatCatalog) -> Option<&'a Song> {
    let video = catalog.video(self.current_video)?;
    if video.mode != VideoMode::LongformRecording {
      return None;
    }
    let offset = self.current_offset.as_deref()?;
    video.songs.iter().find(|s| s.offset == offset)
  }

  /// Whether a list entry corresponds to what is playing.
  pub fn is_active(&self, catalog: &FlatCatalog, entry: &FlatEntry) -> bool {
    let in_current = catalog.video_position(&entry.video_id) == Some(self.current_video);
    match entry.mode {
      VideoMode::LongformRecording => in_current && self.current_offset.as_deref() == Some(entry.song.offset.as_str()),
      VideoMode::ShortformPiece => in_current,
    }
  }
}
