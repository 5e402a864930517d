//! Chronological tie-breaking
//!
//! Merges a seed item with its collection peers into one candidate pool and
//! picks the single chronologically earliest unwatched candidate. Sort keys
//! mix heterogeneous date semantics: movie release dates, next-episode air
//! dates, series first-air dates, and bare-year fallbacks.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::{Catalog, CatalogItemRecord, EpisodeRecord, MediaKind};
use crate::services::collections::CollectionPeer;
use crate::services::episodes::EpisodeResolver;

/// Outcome of one tie-breaking pass
#[derive(Debug, Clone)]
pub enum TieBreakOutcome {
    /// The earliest unwatched candidate is a movie
    Movie(CatalogItemRecord),
    /// The earliest unwatched candidate is a series, materialized to its
    /// next unwatched episode
    Episode {
        series: CatalogItemRecord,
        episode: EpisodeRecord,
    },
    /// The pool emptied out; the original seed is handed back unchanged
    Seed(CatalogItemRecord),
}

impl TieBreakOutcome {
    /// Id of the item the outcome settles on
    pub fn item_id(&self) -> uuid::Uuid {
        match self {
            TieBreakOutcome::Movie(item) => item.id,
            TieBreakOutcome::Episode { series, .. } => series.id,
            TieBreakOutcome::Seed(item) => item.id,
        }
    }
}

/// Picks the chronologically earliest unwatched candidate
pub struct ChronologicalTieBreaker<'a, C: Catalog> {
    resolver: &'a EpisodeResolver<'a, C>,
}

impl<'a, C: Catalog> ChronologicalTieBreaker<'a, C> {
    pub fn new(resolver: &'a EpisodeResolver<'a, C>) -> Self {
        Self { resolver }
    }

    /// Select the earliest unwatched candidate out of the seed and its
    /// peers.
    ///
    /// Candidates are filtered to unwatched ones, ranked ascending by sort
    /// date, and the winner materialized. A winning series whose episode
    /// resolution comes back empty (racing the watch-state filter) is
    /// dropped and the next candidate tried; when the pool empties the seed
    /// itself is the fallback.
    pub async fn select_earliest_unplayed(
        &self,
        seed: &CatalogItemRecord,
        peers: &[CollectionPeer],
    ) -> Result<TieBreakOutcome> {
        let mut candidates: Vec<&CatalogItemRecord> = Vec::with_capacity(peers.len() + 1);
        candidates.push(seed);
        candidates.extend(peers.iter().map(|p| &p.item));
        candidates.retain(|c| c.is_unwatched());

        if candidates.is_empty() {
            debug!(seed = %seed.title, "no unwatched candidates, falling back to seed");
            return self.seed_fallback(seed).await;
        }

        let mut dated: Vec<(NaiveDate, &CatalogItemRecord)> =
            Vec::with_capacity(candidates.len());
        for candidate in candidates {
            dated.push((self.sort_date(candidate).await?, candidate));
        }
        dated.sort_by_key(|(date, _)| *date);

        for (date, candidate) in &dated {
            match candidate.kind {
                MediaKind::Movie => {
                    debug!(title = %candidate.title, sort_date = %date, "earliest candidate is a movie");
                    return Ok(TieBreakOutcome::Movie((*candidate).clone()));
                }
                MediaKind::Series => {
                    if let Some(episode) = self.resolver.next_unwatched(candidate.id).await? {
                        debug!(
                            series = %candidate.title,
                            sort_date = %date,
                            season = episode.season,
                            episode = episode.episode,
                            "earliest candidate is a series"
                        );
                        return Ok(TieBreakOutcome::Episode {
                            series: (*candidate).clone(),
                            episode,
                        });
                    }
                    debug!(
                        series = %candidate.title,
                        "winning series has no unwatched episode, dropping from pool"
                    );
                }
            }
        }

        self.seed_fallback(seed).await
    }

    async fn seed_fallback(&self, seed: &CatalogItemRecord) -> Result<TieBreakOutcome> {
        if seed.kind == MediaKind::Series {
            if let Some(episode) = self.resolver.next_unwatched(seed.id).await? {
                return Ok(TieBreakOutcome::Episode {
                    series: seed.clone(),
                    episode,
                });
            }
        }
        Ok(TieBreakOutcome::Seed(seed.clone()))
    }

    /// Sort date for one candidate.
    ///
    /// Movies use their release date, then the bare year. Series prefer the
    /// next unwatched episode's own air date over series-level metadata, so
    /// a show with stale or missing series dates is still ranked by what
    /// would actually play next. Undated candidates sort last.
    async fn sort_date(&self, item: &CatalogItemRecord) -> Result<NaiveDate> {
        let date = match item.kind {
            MediaKind::Movie => item
                .release_date
                .or_else(|| item.year.and_then(year_start)),
            MediaKind::Series => {
                let next_air = self
                    .resolver
                    .next_unwatched(item.id)
                    .await?
                    .and_then(|e| e.air_date);
                next_air
                    .or(item.release_date)
                    .or_else(|| item.year.and_then(year_start))
            }
        };
        Ok(date.unwrap_or_else(undated_sentinel))
    }
}

fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Items with no usable date sort after everything that has one
fn undated_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_fallback_is_january_first() {
        assert_eq!(
            year_start(2005),
            NaiveDate::from_ymd_opt(2005, 1, 1)
        );
    }

    #[test]
    fn test_sentinel_sorts_after_dated_items() {
        let dated = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        assert!(undated_sentinel() > dated);
    }
}
