//! In-memory catalog
//!
//! A [`Catalog`] over plain vectors, used by the test suite and by
//! embedders that sync the catalog into process memory instead of a store.

use async_trait::async_trait;
use uuid::Uuid;

use super::records::{CatalogItemRecord, EpisodeRecord, MediaKind};
use super::{Catalog, CatalogError};

/// Catalog implementation backed by in-memory vectors
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: Vec<CatalogItemRecord>,
    episodes: Vec<EpisodeRecord>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a movie or series record
    pub fn insert_item(&mut self, item: CatalogItemRecord) {
        self.items.push(item);
    }

    /// Add an episode record; insertion order does not matter
    pub fn insert_episode(&mut self, episode: EpisodeRecord) {
        self.episodes.push(episode);
    }

    fn list_by_kind(&self, kind: MediaKind) -> Vec<CatalogItemRecord> {
        self.items
            .iter()
            .filter(|i| i.kind == kind)
            .cloned()
            .collect()
    }

    fn list_by_collection(&self, kind: MediaKind, name: &str) -> Vec<CatalogItemRecord> {
        self.items
            .iter()
            .filter(|i| i.kind == kind && i.collections.iter().any(|c| c == name))
            .cloned()
            .collect()
    }

    fn get_by_kind(&self, kind: MediaKind, id: Uuid) -> Option<CatalogItemRecord> {
        self.items
            .iter()
            .find(|i| i.kind == kind && i.id == id)
            .cloned()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_all_series(&self) -> Result<Vec<CatalogItemRecord>, CatalogError> {
        Ok(self.list_by_kind(MediaKind::Series))
    }

    async fn list_all_movies(&self) -> Result<Vec<CatalogItemRecord>, CatalogError> {
        Ok(self.list_by_kind(MediaKind::Movie))
    }

    async fn list_series_by_collection(
        &self,
        name: &str,
    ) -> Result<Vec<CatalogItemRecord>, CatalogError> {
        Ok(self.list_by_collection(MediaKind::Series, name))
    }

    async fn list_movies_by_collection(
        &self,
        name: &str,
    ) -> Result<Vec<CatalogItemRecord>, CatalogError> {
        Ok(self.list_by_collection(MediaKind::Movie, name))
    }

    async fn get_series(&self, id: Uuid) -> Result<Option<CatalogItemRecord>, CatalogError> {
        Ok(self.get_by_kind(MediaKind::Series, id))
    }

    async fn get_movie(&self, id: Uuid) -> Result<Option<CatalogItemRecord>, CatalogError> {
        Ok(self.get_by_kind(MediaKind::Movie, id))
    }

    async fn list_episodes(&self, series_id: Uuid) -> Result<Vec<EpisodeRecord>, CatalogError> {
        let mut episodes: Vec<EpisodeRecord> = self
            .episodes
            .iter()
            .filter(|e| e.series_id == series_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| (e.season, e.episode));
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, collections: &[&str]) -> CatalogItemRecord {
        CatalogItemRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            kind: MediaKind::Movie,
            release_date: None,
            year: None,
            view_count: 0,
            leaf_count: 0,
            viewed_leaf_count: 0,
            collections: collections.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_collection_lookup_is_exact() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert_item(movie("Raiders", &["Indiana Jones"]));
        catalog.insert_item(movie("Temple", &["Indiana Jones Collection"]));

        let bare = catalog
            .list_movies_by_collection("Indiana Jones")
            .await
            .unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].title, "Raiders");

        let suffixed = catalog
            .list_movies_by_collection("Indiana Jones Collection")
            .await
            .unwrap();
        assert_eq!(suffixed.len(), 1);
        assert_eq!(suffixed[0].title, "Temple");
    }

    #[tokio::test]
    async fn test_episodes_ordered_by_season_and_episode() {
        let mut catalog = MemoryCatalog::new();
        let series_id = Uuid::new_v4();
        for (season, episode) in [(2, 1), (1, 2), (1, 1), (2, 2)] {
            catalog.insert_episode(EpisodeRecord {
                id: Uuid::new_v4(),
                series_id,
                season,
                episode,
                title: None,
                air_date: None,
                watched: false,
            });
        }

        let episodes = catalog.list_episodes(series_id).await.unwrap();
        let keys: Vec<(i32, i32)> = episodes.iter().map(|e| (e.season, e.episode)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }
}
