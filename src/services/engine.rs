//! Selection engine orchestration
//!
//! Wires the order-type draw, pool selection, collection expansion,
//! chronological tie-breaking, and episode resolution into one "what should
//! I watch next" invocation. The engine holds only the catalog handle;
//! settings and RNG come in per call.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogItemRecord, EpisodeRecord, MediaKind};
use crate::config::SelectionSettings;
use crate::services::collections::CollectionExpander;
use crate::services::episodes::EpisodeResolver;
use crate::services::order_type::{OrderType, select_order_type};
use crate::services::pool::select_from_pool;
use crate::services::tie_break::{ChronologicalTieBreaker, TieBreakOutcome};

/// The engine's only output: one concrete thing to watch next
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionResult {
    Movie {
        item: CatalogItemRecord,
    },
    Episode {
        series: CatalogItemRecord,
        episode: EpisodeRecord,
    },
    Empty {
        reason: String,
    },
}

/// Collaborator that resolves a `CustomOrder` draw against the user's
/// custom playlists. Custom orders live outside the engine; embedders
/// install their implementation at construction time.
#[async_trait]
pub trait CustomOrderSelector: Send + Sync {
    async fn select_next(&self) -> Result<SelectionResult>;
}

/// Next-up selection engine over a catalog accessor
pub struct SelectionEngine<C: Catalog> {
    catalog: C,
    custom_orders: Option<Arc<dyn CustomOrderSelector>>,
}

impl<C: Catalog> SelectionEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            custom_orders: None,
        }
    }

    /// Install the custom-order collaborator
    pub fn with_custom_orders(mut self, selector: Arc<dyn CustomOrderSelector>) -> Self {
        self.custom_orders = Some(selector);
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Run one full selection: draw an order type, pick a seed from the
    /// matching pool, and refine it through collection expansion,
    /// tie-breaking, and episode resolution.
    ///
    /// Empty pools surface as [`SelectionResult::Empty`]; only top-level
    /// catalog failures propagate as errors.
    pub async fn next_up<R: Rng + ?Sized>(
        &self,
        settings: &SelectionSettings,
        rng: &mut R,
    ) -> Result<SelectionResult> {
        let order_type = select_order_type(&settings.order_weights, rng);
        debug!(order_type = %order_type, "order type drawn");

        match order_type {
            OrderType::TvGeneral => {
                let pool = self.catalog.list_all_series().await?;
                self.select_and_refine(&pool, settings, rng).await
            }
            OrderType::MoviesGeneral => {
                let pool = self.catalog.list_all_movies().await?;
                self.select_and_refine(&pool, settings, rng).await
            }
            OrderType::CustomOrder => match &self.custom_orders {
                Some(selector) => selector.select_next().await,
                None => {
                    debug!("custom order drawn but no selector installed");
                    Ok(SelectionResult::Empty {
                        reason: "no custom orders configured".to_string(),
                    })
                }
            },
        }
    }

    /// Seed a selection from one concrete pool, skipping the order-type
    /// draw. Useful for "next episode of something" style requests.
    pub async fn next_from_pool<R: Rng + ?Sized>(
        &self,
        pool: &[CatalogItemRecord],
        settings: &SelectionSettings,
        rng: &mut R,
    ) -> Result<SelectionResult> {
        self.select_and_refine(pool, settings, rng).await
    }

    async fn select_and_refine<R: Rng + ?Sized>(
        &self,
        pool: &[CatalogItemRecord],
        settings: &SelectionSettings,
        rng: &mut R,
    ) -> Result<SelectionResult> {
        let Some(seed) = select_from_pool(pool, rng) else {
            info!("no items found in pool");
            return Ok(SelectionResult::Empty {
                reason: "no items found".to_string(),
            });
        };
        debug!(seed = %seed.title, kind = %seed.kind, "seed selected");
        self.refine(seed, settings).await
    }

    /// Expand the seed's collections and tie-break, re-seeding from a peer
    /// winner up to the configured hop bound so a franchise discovered
    /// through one collection can pull in items from its own.
    async fn refine(
        &self,
        seed: CatalogItemRecord,
        settings: &SelectionSettings,
    ) -> Result<SelectionResult> {
        let resolver = EpisodeResolver::new(&self.catalog);
        let tie_breaker = ChronologicalTieBreaker::new(&resolver);
        let expander = CollectionExpander::new(&self.catalog, settings);

        let mut current = seed;
        let mut hops = 0;
        loop {
            let peers = expander.expand(&current).await;
            let outcome = tie_breaker.select_earliest_unplayed(&current, &peers).await?;

            if outcome.item_id() != current.id && hops < settings.max_collection_hops {
                hops += 1;
                debug!(hop = hops, "winner came from a peer collection, re-expanding");
                current = match &outcome {
                    TieBreakOutcome::Movie(item) => item.clone(),
                    TieBreakOutcome::Episode { series, .. } => series.clone(),
                    TieBreakOutcome::Seed(item) => item.clone(),
                };
                continue;
            }

            return Ok(materialize(outcome));
        }
    }
}

fn materialize(outcome: TieBreakOutcome) -> SelectionResult {
    match outcome {
        TieBreakOutcome::Movie(item) => {
            info!(title = %item.title, "selected movie");
            SelectionResult::Movie { item }
        }
        TieBreakOutcome::Episode { series, episode } => {
            info!(
                series = %series.title,
                season = episode.season,
                episode = episode.episode,
                "selected episode"
            );
            SelectionResult::Episode { series, episode }
        }
        TieBreakOutcome::Seed(item) => match item.kind {
            MediaKind::Movie => {
                info!(title = %item.title, "selected seed movie");
                SelectionResult::Movie { item }
            }
            MediaKind::Series => {
                warn!(series = %item.title, "seed series has no unwatched episodes");
                SelectionResult::Empty {
                    reason: "no unwatched episodes".to_string(),
                }
            }
        },
    }
}
