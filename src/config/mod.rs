//! Engine configuration management
//!
//! The engine takes an explicit [`SelectionSettings`] snapshot on every
//! invocation instead of reading ambient global state, so a selection is a
//! pure function of (catalog snapshot, settings snapshot, RNG). Callers
//! backed by a settings store rebuild the snapshot per request; `from_env`
//! covers standalone and test use.

use std::env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Percentage split across the three coarse content pools.
///
/// The values are expected to sum to 100 but are not required to; see
/// [`crate::services::select_order_type`] for how a mismatch is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTypeWeights {
    /// Band for the general TV pool
    pub tv: u32,
    /// Band for the general movie pool
    pub movies: u32,
    /// Band for user-defined custom orders
    pub custom: u32,
}

impl OrderTypeWeights {
    /// Sum of the three bands
    pub fn total(&self) -> u32 {
        self.tv + self.movies + self.custom
    }
}

impl Default for OrderTypeWeights {
    fn default() -> Self {
        Self {
            tv: 50,
            movies: 30,
            custom: 20,
        }
    }
}

/// Per-invocation settings snapshot for the selection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSettings {
    /// Collection name every synced item is placed in by default. Excluded
    /// from collection expansion (matched case-insensitively).
    pub default_collection: Option<String>,

    /// Weighted split used by the order-type draw
    pub order_weights: OrderTypeWeights,

    /// Suffixes tried as naming variants when resolving collection
    /// membership (upstream catalogs are inconsistent about them).
    pub collection_suffixes: Vec<String>,

    /// How many times a tie-break winner drawn from a peer collection is
    /// itself re-expanded, bounding the chase through the collection graph
    pub max_collection_hops: u32,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            default_collection: None,
            order_weights: OrderTypeWeights::default(),
            collection_suffixes: vec![" Collection".to_string()],
            max_collection_hops: 1,
        }
    }
}

impl SelectionSettings {
    /// Load a settings snapshot from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let order_weights = OrderTypeWeights {
            tv: parse_weight("NEXTUP_WEIGHT_TV", defaults.order_weights.tv)?,
            movies: parse_weight("NEXTUP_WEIGHT_MOVIES", defaults.order_weights.movies)?,
            custom: parse_weight("NEXTUP_WEIGHT_CUSTOM", defaults.order_weights.custom)?,
        };

        // Stored as a JSON array so suffixes may contain commas or leading
        // whitespace, matching how the settings store keeps values.
        let collection_suffixes = match env::var("NEXTUP_COLLECTION_SUFFIXES") {
            Ok(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .context("Invalid NEXTUP_COLLECTION_SUFFIXES")?,
            Err(_) => defaults.collection_suffixes,
        };

        Ok(Self {
            default_collection: env::var("NEXTUP_DEFAULT_COLLECTION").ok(),

            order_weights,

            collection_suffixes,

            max_collection_hops: env::var("NEXTUP_MAX_COLLECTION_HOPS")
                .unwrap_or_else(|_| defaults.max_collection_hops.to_string())
                .parse()
                .context("Invalid NEXTUP_MAX_COLLECTION_HOPS")?,
        })
    }
}

fn parse_weight(key: &str, default: u32) -> Result<u32> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("Invalid {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(OrderTypeWeights::default().total(), 100);
    }

    #[test]
    fn test_default_settings() {
        let settings = SelectionSettings::default();
        assert_eq!(settings.default_collection, None);
        assert_eq!(settings.collection_suffixes, vec![" Collection"]);
        assert_eq!(settings.max_collection_hops, 1);
    }

    #[test]
    fn test_from_env_overrides() {
        // set_var is unsafe since edition 2024; this test owns the
        // NEXTUP_* namespace within the suite.
        unsafe {
            env::set_var("NEXTUP_DEFAULT_COLLECTION", "All Media");
            env::set_var("NEXTUP_WEIGHT_TV", "70");
            env::set_var("NEXTUP_COLLECTION_SUFFIXES", r#"[" Collection", " Saga"]"#);
        }
        let settings = SelectionSettings::from_env().unwrap();
        unsafe {
            env::remove_var("NEXTUP_DEFAULT_COLLECTION");
            env::remove_var("NEXTUP_WEIGHT_TV");
            env::remove_var("NEXTUP_COLLECTION_SUFFIXES");
        }

        assert_eq!(settings.default_collection.as_deref(), Some("All Media"));
        assert_eq!(settings.order_weights.tv, 70);
        assert_eq!(settings.collection_suffixes, vec![" Collection", " Saga"]);
    }
}
