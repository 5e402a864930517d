//! Collection expansion
//!
//! Given a seed item, discovers every other catalog item sharing one of the
//! seed's collections (excluding the configured default collection) so the
//! tie-breaker can rank a whole franchise instead of the seed alone.
//! Upstream catalogs are inconsistently named ("Indiana Jones" vs "Indiana
//! Jones Collection"), so membership lookups are issued for every known
//! naming variant.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError, CatalogItemRecord, MediaKind};
use crate::config::SelectionSettings;

/// Collection naming conventions used for membership comparisons.
///
/// Built from the settings' suffix table; names are canonicalized (known
/// suffixes stripped) before any comparison, and lookups enumerate the
/// canonical name plus each suffixed variant.
#[derive(Debug, Clone)]
pub struct CollectionNaming {
    suffixes: Vec<String>,
}

impl CollectionNaming {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self { suffixes }
    }

    pub fn from_settings(settings: &SelectionSettings) -> Self {
        Self::new(settings.collection_suffixes.clone())
    }

    /// Strip the first matching known suffix from `name`
    pub fn canonical<'a>(&self, name: &'a str) -> &'a str {
        for suffix in &self.suffixes {
            if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
                if !stripped.is_empty() {
                    return stripped;
                }
            }
        }
        name
    }

    /// All naming variants to try when querying membership by name
    pub fn variants(&self, name: &str) -> Vec<String> {
        let base = self.canonical(name);
        let mut variants = vec![base.to_string()];
        for suffix in &self.suffixes {
            let suffixed = format!("{}{}", base, suffix);
            if !variants.contains(&suffixed) {
                variants.push(suffixed);
            }
        }
        variants
    }

    /// Case-insensitive comparison against the configured default collection
    pub fn is_default(&self, name: &str, default: Option<&str>) -> bool {
        match default {
            Some(default) => self
                .canonical(name)
                .eq_ignore_ascii_case(self.canonical(default)),
            None => false,
        }
    }
}

/// A catalog item reached through a shared collection
#[derive(Debug, Clone, Serialize)]
pub struct CollectionPeer {
    pub item: CatalogItemRecord,
    /// Canonical name of the collection the peer was reached through
    pub via_collection: String,
}

impl CollectionPeer {
    /// Whether the peer came from the movie or the TV library
    pub fn library_type(&self) -> MediaKind {
        self.item.kind
    }
}

/// Discovers collection peers of a seed item
pub struct CollectionExpander<'a, C: Catalog> {
    catalog: &'a C,
    naming: CollectionNaming,
    default_collection: Option<String>,
}

impl<'a, C: Catalog> CollectionExpander<'a, C> {
    pub fn new(catalog: &'a C, settings: &SelectionSettings) -> Self {
        Self {
            catalog,
            naming: CollectionNaming::from_settings(settings),
            default_collection: settings.default_collection.clone(),
        }
    }

    /// Find every other catalog item sharing a collection with `seed`.
    ///
    /// The seed is re-fetched by id first: the light-weight listing the seed
    /// was drawn from may carry a truncated membership list. A failed lookup
    /// for one collection is logged and skipped; a total catalog failure
    /// yields an empty peer list so the seed alone remains a valid fallback.
    pub async fn expand(&self, seed: &CatalogItemRecord) -> Vec<CollectionPeer> {
        let seed_full = match self.refetch(seed).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!(seed = %seed.title, "seed not found on re-fetch, using listed record");
                seed.clone()
            }
            Err(e) => {
                warn!(seed = %seed.title, error = %e, "seed re-fetch failed, no peers found");
                return Vec::new();
            }
        };

        let names = self.other_collections(&seed_full);
        if names.is_empty() {
            debug!(seed = %seed_full.title, "seed belongs to no other collections");
            return Vec::new();
        }

        let mut peers: Vec<CollectionPeer> = Vec::new();
        let mut seen: HashSet<Uuid> = HashSet::new();
        seen.insert(seed_full.id);

        for name in &names {
            match self.lookup_members(name).await {
                Ok(items) => {
                    for item in items {
                        if seen.insert(item.id) {
                            peers.push(CollectionPeer {
                                item,
                                via_collection: name.clone(),
                            });
                        }
                    }
                }
                Err(e) => {
                    warn!(collection = %name, error = %e, "collection lookup failed, skipping");
                }
            }
        }

        debug!(
            seed = %seed_full.title,
            collections = names.len(),
            peers = peers.len(),
            "collection expansion complete"
        );
        peers
    }

    /// Canonical names of the seed's collections minus the default one
    fn other_collections(&self, seed: &CatalogItemRecord) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in &seed.collections {
            if self
                .naming
                .is_default(name, self.default_collection.as_deref())
            {
                continue;
            }
            let canonical = self.naming.canonical(name).to_string();
            if !names.contains(&canonical) {
                names.push(canonical);
            }
        }
        names
    }

    async fn refetch(
        &self,
        seed: &CatalogItemRecord,
    ) -> Result<Option<CatalogItemRecord>, CatalogError> {
        match seed.kind {
            MediaKind::Movie => self.catalog.get_movie(seed.id).await,
            MediaKind::Series => self.catalog.get_series(seed.id).await,
        }
    }

    async fn lookup_members(&self, name: &str) -> Result<Vec<CatalogItemRecord>, CatalogError> {
        let mut items = Vec::new();
        for variant in self.naming.variants(name) {
            items.extend(self.catalog.list_movies_by_collection(&variant).await?);
            items.extend(self.catalog.list_series_by_collection(&variant).await?);
        }
        Ok(items)
    }
}
