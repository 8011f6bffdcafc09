//! # Publication Catalog
//!
//! A catalog of academic publications: search with filters and pagination,
//! category badges, and citations in GOST, APA and BibTeX.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Publication, SearchQuery, etc.)
//! - [`catalog`]: Search orchestration and the [`Storage`] collaborator
//! - [`api`]: REST adapter (actix-web handlers and status mapping)
//! - [`utils`]: Citation formatting, category classification, validation
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal rendering for the CLI

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{MemoryStorage, Storage, StorageError};
pub use models::{Publication, SearchQuery, SearchResult};
pub use utils::{format_citation, CitationStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
