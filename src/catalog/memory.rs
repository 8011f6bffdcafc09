//! In-memory storage, optionally seeded from a JSON file.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

use crate::catalog::{search, Storage, StorageError};
use crate::models::{NewPublication, Publication, PublicationPatch, SearchQuery, SearchResult};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<i64, Publication>,
    /// Next id to hand out; only ever grows
    next_id: i64,
}

/// A [`Storage`] holding every record in memory.
///
/// Ids start at 1 (or after the largest seeded id) and are never reused,
/// even after a delete. Once the next id would pass `i64::MAX`, seeding and
/// creation fail instead of wrapping.
#[derive(Debug)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with existing records.
    ///
    /// Fails if two records share an id.
    pub fn from_publications(publications: Vec<Publication>) -> Result<Self, StorageError> {
        let mut records = BTreeMap::new();
        for publication in publications {
            let id = publication.id;
            if records.insert(id, publication).is_some() {
                return Err(StorageError::Other(format!("duplicate publication id {}", id)));
            }
        }
        let next_id = match records.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or_else(id_space_exhausted)?,
            None => 1,
        };

        Ok(Self {
            inner: RwLock::new(Inner { records, next_id }),
        })
    }

    /// Seed a store from a JSON array of publications
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let publications: Vec<Publication> = serde_json::from_str(&content)?;
        tracing::info!(
            count = publications.len(),
            path = %path.display(),
            "loaded publication catalog"
        );
        Self::from_publications(publications)
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}

fn id_space_exhausted() -> StorageError {
    StorageError::Other("id space exhausted".to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_publications(&self, query: &SearchQuery) -> Result<SearchResult, StorageError> {
        let inner = self.inner.read().await;
        Ok(search(inner.records.values(), query))
    }

    async fn get_publication(&self, id: i64) -> Result<Option<Publication>, StorageError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn get_publications_by_ids(&self, ids: &[i64]) -> Result<Vec<Publication>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create_publication(&self, data: NewPublication) -> Result<Publication, StorageError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or_else(id_space_exhausted)?;

        let publication = data.into_publication(id);
        inner.records.insert(id, publication.clone());
        tracing::info!(id, "created publication");
        Ok(publication)
    }

    async fn update_publication(
        &self,
        id: i64,
        patch: PublicationPatch,
    ) -> Result<Option<Publication>, StorageError> {
        let mut inner = self.inner.write().await;
        let Some(publication) = inner.records.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(publication);
        tracing::info!(id, "updated publication");
        Ok(Some(publication.clone()))
    }

    async fn delete_publication(&self, id: i64) -> Result<bool, StorageError> {
        let removed = self.inner.write().await.records.remove(&id).is_some();
        if removed {
            tracing::info!(id, "deleted publication");
        }
        Ok(removed)
    }
}
