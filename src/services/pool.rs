//! Pool selection
//!
//! Draws the seed item for a selection from a coarse content pool (all
//! series, or all movies). Watched draws are rejected inside a bounded
//! loop, with an explicit filtered draw once the bound is spent.

use rand::Rng;
use tracing::debug;

use crate::catalog::CatalogItemRecord;

/// Draw one unwatched item uniformly from `pool`.
///
/// Watched draws are rejected and redrawn up to `pool.len()` times, after
/// which the unwatched subset is drawn from directly. If every item is
/// watched the draw falls back to the full pool so the caller still gets a
/// seed. An empty pool yields `None`.
pub fn select_from_pool<R: Rng + ?Sized>(
    pool: &[CatalogItemRecord],
    rng: &mut R,
) -> Option<CatalogItemRecord> {
    if pool.is_empty() {
        return None;
    }

    for _ in 0..pool.len() {
        let pick = &pool[rng.gen_range(0..pool.len())];
        if pick.is_unwatched() {
            return Some(pick.clone());
        }
    }

    let unwatched: Vec<&CatalogItemRecord> =
        pool.iter().filter(|i| i.is_unwatched()).collect();
    if unwatched.is_empty() {
        debug!(
            pool_size = pool.len(),
            "pool is fully watched, drawing from the full pool"
        );
        Some(pool[rng.gen_range(0..pool.len())].clone())
    } else {
        Some(unwatched[rng.gen_range(0..unwatched.len())].clone())
    }
}
