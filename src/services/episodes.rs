//! Next-episode resolution
//!
//! Walks a series in (season, episode) order and returns the earliest
//! unwatched episode. Season 0 holds specials and is skipped unless it is
//! the series' only season. Results are memoized for the lifetime of the
//! resolver (one engine invocation) because the tie-breaker's sort-key
//! lookup and the final materialization need the same answer.

use std::collections::HashMap;

use anyhow::Result;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{Catalog, EpisodeRecord};

/// Resolves a series to its next unwatched episode
pub struct EpisodeResolver<'a, C: Catalog> {
    catalog: &'a C,
    cache: Mutex<HashMap<Uuid, Option<EpisodeRecord>>>,
}

impl<'a, C: Catalog> EpisodeResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Earliest unwatched episode of `series_id`, or `None` when every
    /// episode is watched
    pub async fn next_unwatched(&self, series_id: Uuid) -> Result<Option<EpisodeRecord>> {
        if let Some(hit) = self.cache.lock().get(&series_id) {
            return Ok(hit.clone());
        }

        let mut episodes = self.catalog.list_episodes(series_id).await?;
        // Accessor ordering is not relied upon
        episodes.sort_by_key(|e| (e.season, e.episode));
        let resolved = first_unwatched(&episodes);

        if let Some(ref episode) = resolved {
            debug!(
                series_id = %series_id,
                season = episode.season,
                episode = episode.episode,
                "resolved next unwatched episode"
            );
        }

        self.cache.lock().insert(series_id, resolved.clone());
        Ok(resolved)
    }
}

/// First unwatched episode in (season, episode) order, skipping season 0
/// unless it is the only season present
fn first_unwatched(episodes: &[EpisodeRecord]) -> Option<EpisodeRecord> {
    let only_specials = episodes.iter().all(|e| e.season == 0);
    episodes
        .iter()
        .find(|e| !e.watched && (e.season != 0 || only_specials))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(season: i32, number: i32, watched: bool) -> EpisodeRecord {
        EpisodeRecord {
            id: Uuid::new_v4(),
            series_id: Uuid::nil(),
            season,
            episode: number,
            title: None,
            air_date: None,
            watched,
        }
    }

    #[test]
    fn test_returns_first_unwatched_in_order() {
        let episodes = vec![
            episode(1, 1, true),
            episode(1, 2, true),
            episode(1, 3, false),
            episode(2, 1, false),
        ];
        let next = first_unwatched(&episodes).unwrap();
        assert_eq!((next.season, next.episode), (1, 3));
    }

    #[test]
    fn test_specials_skipped_when_regular_seasons_exist() {
        let episodes = vec![
            episode(0, 1, false),
            episode(1, 1, true),
            episode(1, 2, false),
        ];
        let next = first_unwatched(&episodes).unwrap();
        assert_eq!((next.season, next.episode), (1, 2));
    }

    #[test]
    fn test_specials_only_series_is_not_skipped() {
        let episodes = vec![episode(0, 1, true), episode(0, 2, false)];
        let next = first_unwatched(&episodes).unwrap();
        assert_eq!((next.season, next.episode), (0, 2));
    }

    #[test]
    fn test_fully_watched_series_resolves_to_none() {
        let episodes = vec![episode(1, 1, true), episode(1, 2, true)];
        assert!(first_unwatched(&episodes).is_none());
    }

    #[test]
    fn test_no_earlier_unwatched_episode_is_passed_over() {
        // Property: the returned key is the minimum over all unwatched
        // episodes outside the skipped specials season.
        let episodes = vec![
            episode(0, 5, false),
            episode(1, 1, true),
            episode(2, 4, false),
            episode(2, 1, false),
            episode(3, 1, false),
        ];
        let sorted = {
            let mut s = episodes.clone();
            s.sort_by_key(|e| (e.season, e.episode));
            s
        };
        let next = first_unwatched(&sorted).unwrap();
        let min_key = sorted
            .iter()
            .filter(|e| !e.watched && e.season != 0)
            .map(|e| (e.season, e.episode))
            .min()
            .unwrap();
        assert_eq!((next.season, next.episode), min_key);
    }
}
