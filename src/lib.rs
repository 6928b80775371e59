//! Catalog, query and selection engine for a fan-curated video archive.
//!
//! Build an [`Archive`] from the static catalog, read its displayed song list and
//! current [`Projection`], and feed user events back through its methods.

pub mod archive;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod projection;
pub mod query;
pub mod selection;
pub mod timecode;

#[cfg(test)]
mod fixtures;

pub use archive::Archive;
pub use catalog::{FlatCatalog, FlatEntry, NameList, Song, Video, VideoMode};
pub use error::CatalogError;
pub use projection::{Description, PlayerCue, Projection, TimestampRow};
pub use query::{QueryConfig, SortOrder, TagFilter};
pub use selection::Selection;
