//! Catalog accessor boundary
//!
//! The engine's only external dependency: read-only queries over the synced
//! media catalog. Embedding applications implement [`Catalog`] against their
//! store; [`MemoryCatalog`] covers tests and store-less embedders.

pub mod memory;
pub mod records;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryCatalog;
pub use records::{CatalogItemRecord, EpisodeRecord, MediaKind};

/// Errors surfaced by catalog accessors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store could not be reached or answered abnormally
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// A point query named an id the catalog has never seen
    #[error("unknown series {0}")]
    UnknownSeries(Uuid),
}

/// Read-only queries over the media catalog.
///
/// Collection lookups match membership by exact string equality; naming
/// variants are the caller's concern (see
/// [`crate::services::CollectionNaming`]). Implementations must be safe for
/// concurrent reads.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every series in the catalog, with watch counts and collections
    async fn list_all_series(&self) -> Result<Vec<CatalogItemRecord>, CatalogError>;

    /// Every movie in the catalog, with watch counts and collections
    async fn list_all_movies(&self) -> Result<Vec<CatalogItemRecord>, CatalogError>;

    /// Series whose membership list contains `name` exactly
    async fn list_series_by_collection(
        &self,
        name: &str,
    ) -> Result<Vec<CatalogItemRecord>, CatalogError>;

    /// Movies whose membership list contains `name` exactly
    async fn list_movies_by_collection(
        &self,
        name: &str,
    ) -> Result<Vec<CatalogItemRecord>, CatalogError>;

    /// A single series with its full collection membership
    async fn get_series(&self, id: Uuid) -> Result<Option<CatalogItemRecord>, CatalogError>;

    /// A single movie with its full collection membership
    async fn get_movie(&self, id: Uuid) -> Result<Option<CatalogItemRecord>, CatalogError>;

    /// All episodes of a series, ordered by (season, episode)
    async fn list_episodes(&self, series_id: Uuid) -> Result<Vec<EpisodeRecord>, CatalogError>;
}
