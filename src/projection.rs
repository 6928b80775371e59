//! What the player and the description panel are handed for the current selection.

use chrono::NaiveDateTime;

use crate::catalog::{NameList, Video, VideoMode};
use crate::constants::constants;
use crate::timecode::offset_seconds;

/// Everything needed to (re)mount a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCue {
  pub video_id: String,
  pub offset_seconds: u32,
}

impl PlayerCue {
  /// Embeddable player URL, autoplaying from the offset.
  pub fn embed_url(&self) -> String {
    let mut url = format!(
      "{}/{}?autoplay=1&rel=0&modestbranding=1&playsinline=1",
      constants().embed_url_base,
      self.video_id
    );
    if self.offset_seconds > 0 {
      url.push_str(&format!("&start={}", self.offset_seconds));
    }
    url
  }

  /// Regular watch URL, used to hand the video to an external player or browser.
  pub fn watch_url(&self) -> String {
    let mut url = format!("{}?v={}", constants().watch_url_base, self.video_id);
    if self.offset_seconds > 0 {
      url.push_str(&format!("&t={}s", self.offset_seconds));
    }
    url
  }
}

/// One row of the description's timestamp list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampRow {
  pub offset: String,
  pub title: String,
  pub original_url: Option<String>,
  pub original_artist: Option<NameList>,
}

/// Data for the description panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
  pub title: String,
  pub published_at: NaiveDateTime,
  pub credited_artist: NameList,
  pub external_url: String,
  pub mode: VideoMode,
  pub tags: Vec<String>,
  pub timestamps: Vec<TimestampRow>,
}

impl Description {
  /// Timestamp rows shown when the list is collapsed or expanded.
  pub fn visible_timestamps(&self, expanded: bool) -> &[TimestampRow] {
    if expanded {
      &self.timestamps
    } else {
      let n = constants().initial_timestamp_count.min(self.timestamps.len());
      &self.timestamps[..n]
    }
  }

  /// How many rows the collapsed view leaves out.
  pub fn hidden_timestamps(&self, expanded: bool) -> usize {
    self.timestamps.len() - self.visible_timestamps(expanded).len()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
  pub cue: PlayerCue,
  pub description: Description,
}

/// Derive the player cue and description for `video` at `current_offset`.
pub fn project(video: &Video, current_offset: Option<&str>) -> Projection {
  let (offset, tags, timestamps) = match video.mode {
    VideoMode::LongformRecording => {
      let offset = current_offset.map(offset_seconds).unwrap_or(0);
      let tags = current_offset
        .and_then(|o| video.songs.iter().find(|s| s.offset == o))
        .map(|s| s.tags.clone())
        .unwrap_or_default();
      let timestamps = video
        .songs
        .iter()
        .map(|s| TimestampRow {
          offset: s.offset.clone(),
          title: s.title.clone(),
          original_url: s.original_url.clone(),
          original_artist: s.original_artist.clone(),
        })
        .collect();
      (offset, tags, timestamps)
    }
    VideoMode::ShortformPiece => {
      let first = video.first_song();
      let synthetic = TimestampRow {
        offset: constants().synthetic_timestamp.clone(),
        title: video.title.clone(),
        original_url: None,
        original_artist: first.and_then(|s| s.original_artist.clone()),
      };
      (0, first.map(|s| s.tags.clone()).unwrap_or_default(), vec![synthetic])
    }
  };

  Projection {
    cue: PlayerCue { video_id: video.video_id.clone(), offset_seconds: offset },
    description: Description {
      title: video.title.clone(),
      published_at: video.published_at,
      credited_artist: video.credited_artist.clone(),
      external_url: video.external_url.clone(),
      mode: video.mode,
      tags,
      timestamps,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::sample_catalog;

  fn cue(video_id: &str, offset_seconds: u32) -> PlayerCue {
    PlayerCue { video_id: video_id.to_string(), offset_seconds }
  }

  #[test]
  fn longform_offset_in_seconds() {
    let catalog = sample_catalog();
    let stream = catalog.video(0).unwrap();
    assert_eq!(project(stream, Some("00:10")).cue.offset_seconds, 10);
    assert_eq!(project(stream, Some("05:00")).cue.offset_seconds, 300);
    assert_eq!(project(stream, None).cue.offset_seconds, 0);
  }

  #[test]
  fn longform_malformed_offset_is_zero() {
    let catalog = sample_catalog();
    let stream = catalog.video(0).unwrap();
    let p = project(stream, Some("5 min"));
    assert_eq!(p.cue.offset_seconds, 0);
    assert!(p.description.tags.is_empty());
  }

  #[test]
  fn shortform_always_from_start() {
    let catalog = sample_catalog();
    let mv = catalog.video(1).unwrap();
    assert_eq!(project(mv, None).cue.offset_seconds, 0);
    assert_eq!(project(mv, Some("03:00")).cue.offset_seconds, 0);
  }

  #[test]
  fn longform_description_lists_every_song() {
    let catalog = sample_catalog();
    let stream = catalog.video(0).unwrap();
    let d = project(stream, Some("05:00")).description;
    let offsets: Vec<&str> = d.timestamps.iter().map(|t| t.offset.as_str()).collect();
    assert_eq!(offsets, ["00:10", "05:00", "12:45"]);
    assert_eq!(d.tags, ["collab", "Karaoke"]);
    assert_eq!(d.timestamps[0].original_url.as_deref(), Some("https://www.youtube.com/watch?v=orig-starlight"));
    assert_eq!(d.timestamps[1].original_artist.as_ref().map(|a| a.display()), Some("Aoi Sora × Mika".to_string()));
  }

  #[test]
  fn shortform_description_is_single_synthetic_row() {
    let catalog = sample_catalog();
    let mv = catalog.video(2).unwrap();
    let d = project(mv, None).description;
    assert_eq!(d.timestamps.len(), 1);
    assert_eq!(d.timestamps[0].offset, "00:00");
    assert_eq!(d.timestamps[0].title, "Neon Rain (cover)");
    assert_eq!(d.timestamps[0].original_artist.as_ref().map(|a| a.display()), Some("Kite Works".to_string()));
    assert_eq!(d.tags, ["cover", "collab"]);
  }

  #[test]
  fn shortform_without_original_artist_still_has_row() {
    let catalog = sample_catalog();
    let mv = catalog.video(1).unwrap();
    let d = project(mv, None).description;
    assert_eq!(d.timestamps.len(), 1);
    assert!(d.timestamps[0].original_artist.is_none());
  }

  #[test]
  fn longform_without_songs_is_empty() {
    let catalog = sample_catalog();
    let empty = catalog.video(4).unwrap();
    let p = project(empty, None);
    assert_eq!(p.cue, cue("vid-empty", 0));
    assert!(p.description.timestamps.is_empty());
    assert!(p.description.tags.is_empty());
  }

  #[test]
  fn projection_is_deterministic() {
    let catalog = sample_catalog();
    for video in catalog.videos() {
      for offset in [None, Some("00:10"), Some("20:00"), Some("bad")] {
        assert_eq!(project(video, offset), project(video, offset));
      }
    }
  }

  #[test]
  fn collapsed_timestamps_show_first_two() {
    let catalog = sample_catalog();
    let d = project(catalog.video(0).unwrap(), None).description;
    assert_eq!(d.visible_timestamps(false).len(), 2);
    assert_eq!(d.hidden_timestamps(false), 1);
    assert_eq!(d.visible_timestamps(true).len(), 3);
    assert_eq!(d.hidden_timestamps(true), 0);
  }

  #[test]
  fn collapsed_timestamps_short_list() {
    let catalog = sample_catalog();
    let d = project(catalog.video(1).unwrap(), None).description;
    assert_eq!(d.visible_timestamps(false).len(), 1);
    assert_eq!(d.hidden_timestamps(false), 0);
  }

  #[test]
  fn embed_url_start_only_when_positive() {
    assert_eq!(
      cue("abc", 0).embed_url(),
      "https://www.youtube.com/embed/abc?autoplay=1&rel=0&modestbranding=1&playsinline=1"
    );
    assert!(cue("abc", 90).embed_url().ends_with("&start=90"));
  }

  #[test]
  fn watch_url_with_time() {
    assert_eq!(cue("abc", 0).watch_url(), "https://www.youtube.com/watch?v=abc");
    assert_eq!(cue("abc", 300).watch_url(), "https://www.youtube.com/watch?v=abc&t=300s");
  }
}
