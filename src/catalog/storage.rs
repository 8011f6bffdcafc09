//! The storage collaborator consumed by the HTTP layer.

use async_trait::async_trait;

use crate::models::{NewPublication, Publication, PublicationPatch, SearchQuery, SearchResult};

/// The Storage trait defines the record store behind the catalog.
///
/// `get_publications` must follow the semantics of [`crate::catalog::search`].
/// Absence of a record is an ordinary `None`/`false` result, not an error.
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// One page of records matching `query`, with the total match count
    async fn get_publications(&self, query: &SearchQuery) -> Result<SearchResult, StorageError>;

    async fn get_publication(&self, id: i64) -> Result<Option<Publication>, StorageError>;

    /// Records for the known ids; unknown ids are skipped and the order of
    /// the result need not follow `ids`
    async fn get_publications_by_ids(&self, ids: &[i64]) -> Result<Vec<Publication>, StorageError>;

    /// Store a new record under a freshly assigned id
    async fn create_publication(&self, data: NewPublication) -> Result<Publication, StorageError>;

    /// Apply a partial update, returning the updated record if it exists
    async fn update_publication(
        &self,
        id: i64,
        patch: PublicationPatch,
    ) -> Result<Option<Publication>, StorageError>;

    /// Returns whether a record was removed
    async fn delete_publication(&self, id: i64) -> Result<bool, StorageError>;
}

/// Errors that can occur when interacting with storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Parse(format!("JSON: {}", err))
    }
}
