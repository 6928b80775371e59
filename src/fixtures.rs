//! Shared catalog fixture for unit tests.

use serde_json::json;

use crate::catalog::{FlatCatalog, parse_videos};

/// Five videos with distinct publish dates (newest first in source order).
///
/// 0 `vid-stream-1` longform, three songs
/// 1 `vid-mv-1`     shortform, one song, no original artist
/// 2 `vid-mv-2`     shortform, one collab cover
/// 3 `vid-stream-2` longform, two songs, none tagged "karaoke"
/// 4 `vid-empty`    longform, no songs
pub fn sample_json() -> String {
  json!([
    {
      "isLivestream": true,
      "videoUrl": "https://www.youtube.com/watch?v=vid-stream-1",
      "artist": "Kanade Rin",
      "videoId": "vid-stream-1",
      "date": "2024-06-01",
      "title": "Midnight Karaoke #12",
      "songs": [
        {
          "title": "Starlight Parade",
          "artist": "Kanade Rin",
          "originalartist": "Lumina",
          "start": "00:10",
          "originalUrl": "https://www.youtube.com/watch?v=orig-starlight",
          "tags": ["cover", "karaoke"]
        },
        {
          "title": "Twin Lights",
          "artist": ["Kanade Rin", "Hoshino Aya"],
          "originalartist": ["Aoi Sora", "Mika"],
          "start": "05:00",
          "tags": ["collab", "Karaoke"]
        },
        {
          "title": "Paper Moon",
          "artist": "Kanade Rin",
          "start": "12:45",
          "tags": ["original", "karaoke"]
        }
      ]
    },
    {
      "isLivestream": false,
      "videoUrl": "https://www.youtube.com/watch?v=vid-mv-1",
      "artist": "Kanade Rin",
      "videoId": "vid-mv-1",
      "date": "2024-03-15",
      "title": "Glass Garden (Official MV)",
      "songs": [
        {
          "title": "Glass Garden",
          "artist": "Kanade Rin",
          "start": "00:00",
          "tags": ["Original", "3D"]
        }
      ]
    },
    {
      "isLivestream": false,
      "videoUrl": "https://www.youtube.com/watch?v=vid-mv-2",
      "artist": ["Kanade Rin", "Hoshino Aya"],
      "videoId": "vid-mv-2",
      "date": "2023-11-20",
      "title": "Neon Rain (cover)",
      "songs": [
        {
          "title": "Neon Rain",
          "artist": ["Kanade Rin", "Hoshino Aya"],
          "originalartist": "Kite Works",
          "start": "00:00",
          "originalUrl": "https://www.youtube.com/watch?v=orig-neon",
          "tags": ["cover", "collab"]
        }
      ]
    },
    {
      "isLivestream": true,
      "videoUrl": "https://www.youtube.com/watch?v=vid-stream-2",
      "artist": "Kanade Rin",
      "videoId": "vid-stream-2",
      "date": "2023-08-05",
      "title": "Summer Acoustic Stream",
      "songs": [
        {
          "title": "Summer Letter",
          "artist": "Kanade Rin",
          "originalartist": "Lumina",
          "start": "01:30",
          "tags": ["cover"]
        },
        {
          "title": "Paper Moon",
          "artist": "Kanade Rin",
          "start": "20:00"
        }
      ]
    },
    {
      "isLivestream": true,
      "videoUrl": "https://www.youtube.com/watch?v=vid-empty",
      "artist": "Kanade Rin",
      "videoId": "vid-empty",
      "date": "2022-12-31",
      "title": "Chatting Stream"
    }
  ])
  .to_string()
}

pub fn sample_catalog() -> FlatCatalog {
  FlatCatalog::build(parse_videos(&sample_json()).expect("fixture parses"))
}
