//! Catalog record types
//!
//! Read-only views over the synced media catalog. The engine never creates,
//! mutates, or deletes these; lifecycle ownership belongs to the backing
//! store and the sync process that populates it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a catalog item is a movie or a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// A movie or series as the catalog exposes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItemRecord {
    pub id: Uuid,
    pub title: String,
    pub kind: MediaKind,
    /// Release date for movies, first-air date for series
    pub release_date: Option<NaiveDate>,
    /// Bare-year fallback when no full date is known
    pub year: Option<i32>,
    /// Play count; meaningful for movies only
    pub view_count: i64,
    /// Total episodes; meaningful for series only
    pub leaf_count: i64,
    /// Watched episodes; meaningful for series only
    pub viewed_leaf_count: i64,
    /// Collection names this item belongs to (free-text, unordered)
    pub collections: Vec<String>,
}

impl CatalogItemRecord {
    /// Whether this item has been fully watched.
    ///
    /// A movie is watched once its play count is positive; a series is
    /// watched when every episode is (`viewed_leaf_count == leaf_count`,
    /// which also classifies an episode-less series as watched).
    pub fn is_watched(&self) -> bool {
        match self.kind {
            MediaKind::Movie => self.view_count > 0,
            MediaKind::Series => self.viewed_leaf_count >= self.leaf_count,
        }
    }

    pub fn is_unwatched(&self) -> bool {
        !self.is_watched()
    }
}

/// A single episode of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: Uuid,
    pub series_id: Uuid,
    /// 1-based season index; season 0 holds specials
    pub season: i32,
    /// 1-based episode index within the season
    pub episode: i32,
    pub title: Option<String>,
    /// The episode's own air date, independent of the series date
    pub air_date: Option<NaiveDate>,
    pub watched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: MediaKind, view_count: i64, leaf: i64, viewed: i64) -> CatalogItemRecord {
        CatalogItemRecord {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            kind,
            release_date: None,
            year: None,
            view_count,
            leaf_count: leaf,
            viewed_leaf_count: viewed,
            collections: vec![],
        }
    }

    #[test]
    fn test_movie_watch_state() {
        assert!(item(MediaKind::Movie, 0, 0, 0).is_unwatched());
        assert!(item(MediaKind::Movie, 1, 0, 0).is_watched());
        assert!(item(MediaKind::Movie, 3, 0, 0).is_watched());
    }

    #[test]
    fn test_series_watch_state() {
        assert!(item(MediaKind::Series, 0, 10, 3).is_unwatched());
        assert!(item(MediaKind::Series, 0, 10, 10).is_watched());
        // An episode-less series has nothing left to play
        assert!(item(MediaKind::Series, 0, 0, 0).is_watched());
    }
}
