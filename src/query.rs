//! Filter, search and sort over the flattened catalog.
//!
//! The result is a list of positions into [`FlatCatalog::entries`], the same
//! shape as an index-based filtered view over a result list.

use crate::catalog::{FlatCatalog, FlatEntry};

/// Tag-based narrowing of the song list. Matches literal tag text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
  #[default]
  All,
  Original,
  Cover,
  Collab,
  /// Songs tagged "karaoke". Independent of the parent video's mode.
  Karaoke,
}

impl TagFilter {
  pub const ALL: [TagFilter; 5] =
    [TagFilter::All, TagFilter::Original, TagFilter::Cover, TagFilter::Collab, TagFilter::Karaoke];

  /// Tag text this filter keeps; `None` keeps everything.
  pub fn tag(self) -> Option<&'static str> {
    match self {
      TagFilter::All => None,
      TagFilter::Original => Some("original"),
      TagFilter::Cover => Some("cover"),
      TagFilter::Collab => Some("collab"),
      TagFilter::Karaoke => Some("karaoke"),
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      TagFilter::All => "All songs",
      TagFilter::Original => "Original song",
      TagFilter::Cover => "Cover song",
      TagFilter::Collab => "Collab song",
      TagFilter::Karaoke => "Karaoke stream",
    }
  }

  pub fn next(self) -> Self {
    let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(idx + 1) % Self::ALL.len()]
  }

  pub fn from_config(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "original" => TagFilter::Original,
      "cover" => TagFilter::Cover,
      "collab" => TagFilter::Collab,
      "karaoke" => TagFilter::Karaoke,
      _ => TagFilter::All,
    }
  }
}

/// Ordering by the parent video's publish date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Newest,
  Oldest,
}

impl SortOrder {
  pub const ALL: [SortOrder; 2] = [SortOrder::Newest, SortOrder::Oldest];

  pub fn label(self) -> &'static str {
    match self {
      SortOrder::Newest => "Newest",
      SortOrder::Oldest => "Oldest",
    }
  }

  pub fn next(self) -> Self {
    match self {
      SortOrder::Newest => SortOrder::Oldest,
      SortOrder::Oldest => SortOrder::Newest,
    }
  }

  pub fn from_config(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "oldest" => SortOrder::Oldest,
      _ => SortOrder::Newest,
    }
  }
}

/// Everything that shapes the displayed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
  pub tag_filter: TagFilter,
  pub search_text: String,
  pub sort_order: SortOrder,
}

/// Whether the entry carries the filter's tag (case-insensitive, exact).
pub fn matches_tag(entry: &FlatEntry, filter: TagFilter) -> bool {
  let Some(wanted) = filter.tag() else { return true };
  entry.song.tags.iter().any(|t| t.to_lowercase() == wanted)
}

/// Check if an entry matches free-text search.
/// Matches case-insensitively against title, artists, original artists and tags.
/// Blank input matches everything; otherwise the text is matched as typed, surrounding spaces included.
pub fn matches_search(entry: &FlatEntry, search: &str) -> bool {
  if search.trim().is_empty() {
    return true;
  }
  let needle = search.to_lowercase();
  let song = &entry.song;
  if song.title.to_lowercase().contains(&needle) {
    return true;
  }
  if song.performing_artist.search_text().to_lowercase().contains(&needle) {
    return true;
  }
  if let Some(ref original) = song.original_artist
    && original.search_text().to_lowercase().contains(&needle)
  {
    return true;
  }
  song.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Run the tag filter, then the search, then the date sort.
pub fn query(catalog: &FlatCatalog, config: &QueryConfig) -> Vec<usize> {
  let mut result: Vec<usize> = catalog
    .entries()
    .iter()
    .enumerate()
    .filter(|(_, e)| matches_tag(e, config.tag_filter))
    .filter(|(_, e)| matches_search(e, &config.search_text))
    .map(|(i, _)| i)
    .collect();
  sort_by_published(catalog, &mut result, config.sort_order);
  result
}

/// Stable date sort. Entries whose video can't be resolved stay in their slot.
fn sort_by_published(catalog: &FlatCatalog, indices: &mut [usize], order: SortOrder) {
  let mut slots = Vec::with_capacity(indices.len());
  let mut keyed = Vec::with_capacity(indices.len());
  for (slot, &idx) in indices.iter().enumerate() {
    if let Some(date) = catalog.entry(idx).and_then(|e| catalog.published_at(e)) {
      slots.push(slot);
      keyed.push((date, idx));
    }
  }

  match order {
    SortOrder::Newest => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    SortOrder::Oldest => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
  }

  for (slot, (_, idx)) in slots.into_iter().zip(keyed) {
    indices[slot] = idx;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::sample_catalog;

  fn config(tag_filter: TagFilter, search: &str, sort_order: SortOrder) -> QueryConfig {
    QueryConfig { tag_filter, search_text: search.to_string(), sort_order }
  }

  fn titles(catalog: &FlatCatalog, indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| catalog.entries()[i].song.title.clone()).collect()
  }

  // --- TagFilter / SortOrder ---

  #[test]
  fn tag_filter_from_config() {
    assert_eq!(TagFilter::from_config("cover"), TagFilter::Cover);
    assert_eq!(TagFilter::from_config("KARAOKE"), TagFilter::Karaoke);
    assert_eq!(TagFilter::from_config(" Collab "), TagFilter::Collab);
    assert_eq!(TagFilter::from_config("nope"), TagFilter::All);
    assert_eq!(TagFilter::from_config(""), TagFilter::All);
  }

  #[test]
  fn tag_filter_cycles_back_to_all() {
    let mut f = TagFilter::All;
    for _ in 0..TagFilter::ALL.len() {
      f = f.next();
    }
    assert_eq!(f, TagFilter::All);
    assert_eq!(TagFilter::All.next(), TagFilter::Original);
  }

  #[test]
  fn sort_order_from_config() {
    assert_eq!(SortOrder::from_config("oldest"), SortOrder::Oldest);
    assert_eq!(SortOrder::from_config("Oldest"), SortOrder::Oldest);
    assert_eq!(SortOrder::from_config("whatever"), SortOrder::Newest);
    assert_eq!(SortOrder::Newest.next(), SortOrder::Oldest);
  }

  // --- Tag filter ---

  #[test]
  fn all_filter_is_identity() {
    let catalog = sample_catalog();
    let mut result = query(&catalog, &config(TagFilter::All, "", SortOrder::Newest));
    result.sort_unstable();
    assert_eq!(result, (0..catalog.entries().len()).collect::<Vec<_>>());
  }

  #[test]
  fn tag_filter_is_case_insensitive() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::Original, "", SortOrder::Newest));
    // "Original" on Glass Garden and "original" on Paper Moon (stream 1)
    assert_eq!(titles(&catalog, &result), ["Paper Moon", "Glass Garden"]);
  }

  #[test]
  fn tag_filter_requires_exact_tag() {
    let catalog = sample_catalog();
    let entry = &catalog.entries()[0];
    assert!(matches_tag(entry, TagFilter::Cover));
    assert!(!matches_tag(entry, TagFilter::Collab));
  }

  #[test]
  fn karaoke_filter_ignores_video_mode() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::Karaoke, "", SortOrder::Newest));
    assert_eq!(result.len(), 3);
    // vid-stream-2 is a longform recording but none of its songs carry the tag
    assert!(result.iter().all(|&i| catalog.entries()[i].video_id == "vid-stream-1"));
  }

  #[test]
  fn tag_filter_idempotent() {
    let catalog = sample_catalog();
    for filter in TagFilter::ALL {
      let once: Vec<usize> =
        (0..catalog.entries().len()).filter(|&i| matches_tag(&catalog.entries()[i], filter)).collect();
      let twice: Vec<usize> = once.iter().copied().filter(|&i| matches_tag(&catalog.entries()[i], filter)).collect();
      assert_eq!(once, twice, "filter {:?}", filter);
    }
  }

  // --- Search ---

  #[test]
  fn search_empty_or_blank_keeps_all() {
    let catalog = sample_catalog();
    let all = query(&catalog, &config(TagFilter::All, "", SortOrder::Newest));
    let blank = query(&catalog, &config(TagFilter::All, "   ", SortOrder::Newest));
    assert_eq!(all, blank);
  }

  #[test]
  fn search_matches_title() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "paper", SortOrder::Newest));
    assert_eq!(titles(&catalog, &result), ["Paper Moon", "Paper Moon"]);
  }

  #[test]
  fn search_matches_joined_artist_list() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "rin hoshino", SortOrder::Oldest));
    assert_eq!(titles(&catalog, &result), ["Neon Rain", "Twin Lights"]);
  }

  #[test]
  fn search_matches_original_artist() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "LUMINA", SortOrder::Newest));
    assert_eq!(titles(&catalog, &result), ["Starlight Parade", "Summer Letter"]);
  }

  #[test]
  fn search_matches_tag_substring() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "3d", SortOrder::Newest));
    assert_eq!(titles(&catalog, &result), ["Glass Garden"]);
    let result = query(&catalog, &config(TagFilter::All, "colla", SortOrder::Newest));
    assert_eq!(titles(&catalog, &result), ["Twin Lights", "Neon Rain"]);
  }

  #[test]
  fn search_keeps_surrounding_spaces() {
    let catalog = sample_catalog();
    assert!(query(&catalog, &config(TagFilter::All, "rain ", SortOrder::Newest)).is_empty());
    let result = query(&catalog, &config(TagFilter::All, "neon ", SortOrder::Newest));
    assert_eq!(titles(&catalog, &result), ["Neon Rain"]);
  }

  #[test]
  fn blank_search_matches_everything() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "   ", SortOrder::Newest));
    assert_eq!(result.len(), catalog.entries().len());
  }

  #[test]
  fn search_no_match() {
    let catalog = sample_catalog();
    assert!(query(&catalog, &config(TagFilter::All, "zzz", SortOrder::Newest)).is_empty());
  }

  #[test]
  fn search_is_subset_of_tag_filter() {
    let catalog = sample_catalog();
    for filter in TagFilter::ALL {
      let base = query(&catalog, &config(filter, "", SortOrder::Newest));
      for needle in ["rin", "moon", "cover", "x"] {
        let narrowed = query(&catalog, &config(filter, needle, SortOrder::Newest));
        assert!(narrowed.iter().all(|i| base.contains(i)), "{:?} / {}", filter, needle);
      }
    }
  }

  // --- Sort ---

  #[test]
  fn newest_orders_by_date_descending() {
    let catalog = sample_catalog();
    let result = query(&catalog, &config(TagFilter::All, "", SortOrder::Newest));
    let dates: Vec<_> = result.iter().map(|&i| catalog.published_at(&catalog.entries()[i]).unwrap()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
  }

  #[test]
  fn sort_keeps_song_order_within_video() {
    let catalog = sample_catalog();
    let newest = query(&catalog, &config(TagFilter::All, "", SortOrder::Newest));
    let oldest = query(&catalog, &config(TagFilter::All, "", SortOrder::Oldest));
    assert_eq!(titles(&catalog, &newest[..3]), ["Starlight Parade", "Twin Lights", "Paper Moon"]);
    assert_eq!(titles(&catalog, &oldest[..2]), ["Summer Letter", "Paper Moon"]);
  }

  #[test]
  fn newest_and_oldest_reverse_per_video() {
    let catalog = sample_catalog();
    let newest = query(&catalog, &config(TagFilter::Cover, "", SortOrder::Newest));
    let mut oldest = query(&catalog, &config(TagFilter::Cover, "", SortOrder::Oldest));
    oldest.reverse();
    // one song per video under this filter, so the two orders are exact reverses
    assert_eq!(newest, oldest);
  }

  #[test]
  fn video_order_reverses_between_sorts() {
    let catalog = sample_catalog();
    let video_seq = |indices: &[usize]| {
      let mut seq: Vec<String> = Vec::new();
      for &i in indices {
        let id = &catalog.entries()[i].video_id;
        if seq.last() != Some(id) {
          seq.push(id.clone());
        }
      }
      seq
    };
    let newest = video_seq(&query(&catalog, &config(TagFilter::All, "", SortOrder::Newest)));
    let mut oldest = video_seq(&query(&catalog, &config(TagFilter::All, "", SortOrder::Oldest)));
    oldest.reverse();
    assert_eq!(newest, oldest);
  }

  #[test]
  fn unresolvable_entries_keep_their_slot() {
    let catalog = sample_catalog();
    // position 4 in the input is an index past the end of the catalog: it can't be dated
    let mut indices = vec![5, 0, 3, 4, 99];
    sort_by_published(&catalog, &mut indices, SortOrder::Oldest);
    assert_eq!(indices[4], 99);
    assert_eq!(&indices[..4], [5, 4, 3, 0]);
  }

  #[test]
  fn same_day_videos_sort_by_time() {
    let json = r#"[
      {"isLivestream":false,"videoUrl":"u1","artist":"a","videoId":"morning","date":"2024-03-09T09:00:00Z","title":"Morning","songs":[{"title":"Early","artist":"a","start":"00:00"}]},
      {"isLivestream":false,"videoUrl":"u2","artist":"a","videoId":"evening","date":"2024-03-09T21:00:00Z","title":"Evening","songs":[{"title":"Late","artist":"a","start":"00:00"}]}
    ]"#;
    let catalog = FlatCatalog::build(crate::catalog::parse_videos(json).unwrap());
    let newest = query(&catalog, &config(TagFilter::All, "", SortOrder::Newest));
    assert_eq!(titles(&catalog, &newest), ["Late", "Early"]);
    let oldest = query(&catalog, &config(TagFilter::All, "", SortOrder::Oldest));
    assert_eq!(titles(&catalog, &oldest), ["Early", "Late"]);
  }
}
