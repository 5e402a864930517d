//! Order-type selection
//!
//! Weighted random choice over the three coarse content pools. Driven by
//! the externally configured percentage split, re-read by the caller per
//! invocation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OrderTypeWeights;

/// The coarse pool a selection is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    TvGeneral,
    MoviesGeneral,
    CustomOrder,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::TvGeneral => write!(f, "tv_general"),
            OrderType::MoviesGeneral => write!(f, "movies_general"),
            OrderType::CustomOrder => write!(f, "custom_order"),
        }
    }
}

/// Draw one order type according to the configured weights.
///
/// A single integer is drawn uniformly from `[1, 100]`: `[1, tv]` maps to
/// TV, `(tv, tv + movies]` to movies, everything above to custom orders.
/// Weights that do not sum to 100 are accepted as-is, and the custom band
/// absorbs or loses the difference rather than being renormalized.
pub fn select_order_type<R: Rng + ?Sized>(weights: &OrderTypeWeights, rng: &mut R) -> OrderType {
    if weights.total() != 100 {
        debug!(
            tv = weights.tv,
            movies = weights.movies,
            custom = weights.custom,
            total = weights.total(),
            "order-type weights do not sum to 100, custom band drifts"
        );
    }

    let roll: u32 = rng.gen_range(1..=100);
    if roll <= weights.tv {
        OrderType::TvGeneral
    } else if roll <= weights.tv.saturating_add(weights.movies) {
        OrderType::MoviesGeneral
    } else {
        OrderType::CustomOrder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_all_custom_weights_always_draw_custom() {
        let weights = OrderTypeWeights {
            tv: 0,
            movies: 0,
            custom: 100,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(select_order_type(&weights, &mut rng), OrderType::CustomOrder);
        }
    }

    #[test]
    fn test_all_tv_weights_always_draw_tv() {
        let weights = OrderTypeWeights {
            tv: 100,
            movies: 0,
            custom: 0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(select_order_type(&weights, &mut rng), OrderType::TvGeneral);
        }
    }

    #[test]
    fn test_draws_converge_to_configured_proportions() {
        let weights = OrderTypeWeights {
            tv: 60,
            movies: 30,
            custom: 10,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let mut counts = [0u32; 3];
        for _ in 0..n {
            match select_order_type(&weights, &mut rng) {
                OrderType::TvGeneral => counts[0] += 1,
                OrderType::MoviesGeneral => counts[1] += 1,
                OrderType::CustomOrder => counts[2] += 1,
            }
        }
        let tolerance = (n as f64 * 0.02) as u32;
        assert!(counts[0].abs_diff(n * 60 / 100) < tolerance);
        assert!(counts[1].abs_diff(n * 30 / 100) < tolerance);
        assert!(counts[2].abs_diff(n * 10 / 100) < tolerance);
    }

    #[test]
    fn test_short_weights_drift_into_custom_band() {
        // 40 + 30 = 70: rolls in (70, 100] land on custom even though its
        // configured share is only 10.
        let weights = OrderTypeWeights {
            tv: 40,
            movies: 30,
            custom: 10,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let custom = (0..10_000)
            .filter(|_| select_order_type(&weights, &mut rng) == OrderType::CustomOrder)
            .count();
        assert!(custom > 2_500, "custom absorbed {} of 10000", custom);
    }
}
