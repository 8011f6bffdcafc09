//! Core data models for publication records, searches and exports.

mod export;
mod publication;
mod search;

pub use export::{ExportRequest, ExportSummary};
pub(crate) use publication::non_empty;
pub use publication::{
    NewPublication, Publication, PublicationBuilder, PublicationPatch, PublicationType,
};
pub use search::{
    DatabaseParam, RawNumber, RawSearchParams, SearchQuery, SearchResult, SortBy, SortDirection,
    ALL_CATEGORIES, DEFAULT_LIMIT,
};
