//! Static catalog: video records as authored in the archive's JSON file, and the
//! flattened per-song view the query engine works over.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::CatalogError;

// --- Records ---

/// Whether a video holds many songs at internal offsets or is a single piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoMode {
  /// Full livestream recording; song offsets are seek targets.
  LongformRecording,
  /// Standalone music video; always plays from the start.
  ShortformPiece,
}

impl VideoMode {
  pub fn from_livestream(is_livestream: bool) -> Self {
    if is_livestream { VideoMode::LongformRecording } else { VideoMode::ShortformPiece }
  }

  pub fn label(self) -> &'static str {
    match self {
      VideoMode::LongformRecording => "Karaoke stream",
      VideoMode::ShortformPiece => "Music video",
    }
  }
}

/// Artist credit. The JSON allows a bare string or a list; both land here as an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "NameField")]
pub struct NameList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum NameField {
  One(String),
  Many(Vec<String>),
}

impl From<NameField> for NameList {
  fn from(field: NameField) -> Self {
    match field {
      NameField::One(name) => NameList(vec![name]),
      NameField::Many(names) => NameList(names),
    }
  }
}

impl NameList {
  pub fn new(names: Vec<String>) -> Self {
    NameList(names)
  }

  pub fn names(&self) -> &[String] {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.iter().all(|n| n.trim().is_empty())
  }

  /// Space-joined text used for substring search.
  pub fn search_text(&self) -> String {
    self.0.join(" ")
  }

  /// Collaboration credit as shown to the user, e.g. `A × B`.
  pub fn display(&self) -> String {
    self.0.join(" × ")
  }
}

/// One song appearance inside a video.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Song {
  pub title: String,
  #[serde(rename = "artist", default)]
  pub performing_artist: NameList,
  #[serde(rename = "originalartist", default)]
  pub original_artist: Option<NameList>,
  /// `MM:SS`. Seek target for longform recordings, informational otherwise.
  #[serde(rename = "start")]
  pub offset: String,
  #[serde(rename = "originalUrl", default)]
  pub original_url: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRecord {
  is_livestream: bool,
  video_url: String,
  #[serde(default)]
  artist: NameList,
  video_id: String,
  #[serde(deserialize_with = "deserialize_published")]
  date: NaiveDateTime,
  title: String,
  #[serde(default)]
  songs: Option<Vec<Song>>,
}

/// One published video.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "VideoRecord")]
pub struct Video {
  pub video_id: String,
  pub mode: VideoMode,
  pub published_at: NaiveDateTime,
  pub title: String,
  pub external_url: String,
  pub credited_artist: NameList,
  pub songs: Vec<Song>,
}

impl From<VideoRecord> for Video {
  fn from(r: VideoRecord) -> Self {
    Video {
      video_id: r.video_id,
      mode: VideoMode::from_livestream(r.is_livestream),
      published_at: r.date,
      title: r.title,
      external_url: r.video_url,
      credited_artist: r.artist,
      songs: r.songs.unwrap_or_default(),
    }
  }
}

impl Video {
  pub fn first_song(&self) -> Option<&Song> {
    self.songs.first()
  }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp, normalized to UTC.
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.naive_utc());
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn deserialize_published<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse_published(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid publish date '{}'", raw)))
}

// --- Loading ---

/// Parse the catalog JSON (an array of video records).
pub fn parse_videos(json: &str) -> Result<Vec<Video>, CatalogError> {
  let videos: Vec<Video> = serde_json::from_str(json)?;
  if videos.is_empty() {
    return Err(CatalogError::Empty);
  }
  Ok(videos)
}

/// Read and parse the catalog file at `path`.
pub fn load_videos(path: &Path) -> Result<Vec<Video>, CatalogError> {
  let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
  let videos = parse_videos(&json)?;
  info!(path = %path.display(), videos = videos.len(), "catalog: loaded");
  Ok(videos)
}

// --- Flattened view ---

/// A song joined with its parent video's identity and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
  pub video_id: String,
  pub mode: VideoMode,
  pub song: Song,
}

/// The video collection plus its flattened song list. Immutable once built.
#[derive(Debug, Clone)]
pub struct FlatCatalog {
  videos: Vec<Video>,
  entries: Vec<FlatEntry>,
  positions: HashMap<String, usize>,
}

impl FlatCatalog {
  /// Flatten `videos`: videos in source order, songs within a video in source order.
  pub fn build(videos: Vec<Video>) -> Self {
    let mut positions = HashMap::with_capacity(videos.len());
    for (i, video) in videos.iter().enumerate() {
      if positions.contains_key(&video.video_id) {
        warn!(video_id = %video.video_id, index = i, "catalog: duplicate video id, keeping first");
        continue;
      }
      positions.insert(video.video_id.clone(), i);
    }

    let entries = videos
      .iter()
      .flat_map(|video| {
        video.songs.iter().map(move |song| FlatEntry { video_id: video.video_id.clone(), mode: video.mode, song: song.clone() })
      })
      .collect();

    Self { videos, entries, positions }
  }

  pub fn videos(&self) -> &[Video] {
    &self.videos
  }

  pub fn video(&self, index: usize) -> Option<&Video> {
    self.videos.get(index)
  }

  pub fn entries(&self) -> &[FlatEntry] {
    &self.entries
  }

  pub fn entry(&self, index: usize) -> Option<&FlatEntry> {
    self.entries.get(index)
  }

  /// Index of the video with this id.
  pub fn video_position(&self, video_id: &str) -> Option<usize> {
    self.positions.get(video_id).copied()
  }

  /// Publish time of the entry's parent video.
  pub fn published_at(&self, entry: &FlatEntry) -> Option<NaiveDateTime> {
    self.video_position(&entry.video_id).and_then(|i| self.videos.get(i)).map(|v| v.published_at)
  }
}
