//! Utility modules supporting catalog operations.
//!
//! - [`classify`]: map a category to its badge colors
//! - [`format_citation`]: render a publication as GOST, APA or BibTeX
//! - [`normalize`]: coerce raw search parameters into a [`SearchQuery`](crate::models::SearchQuery)
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for terminal tables
//!
//! # Citations
//!
//! ```rust
//! use publication_catalog::models::Publication;
//! use publication_catalog::utils::{format_citation, CitationStyle};
//!
//! let publication = Publication::new(1, "Title", "Author A.", 2020);
//! assert_eq!(
//!     format_citation(&publication, CitationStyle::Gost),
//!     "Author A. Title // 2020. – "
//! );
//! ```
//!
//! # Normalizing search parameters
//!
//! ```rust
//! use publication_catalog::models::RawSearchParams;
//! use publication_catalog::utils::normalize;
//!
//! let raw = RawSearchParams::from_query_string("yearFrom=2019&database=Scopus&category=all");
//! let query = normalize(raw).unwrap();
//! assert_eq!(query.year_from, Some(2019));
//! assert_eq!(query.database, Some(vec!["Scopus".to_string()]));
//! assert_eq!(query.category, None);
//! ```

mod category;
mod cite;
mod display;
mod validate;

pub use category::{classify, CategoryColors, Palette};
pub use cite::{
    bibtex_key, format_bundle, format_citation, get_structured_citation, CitationStyle,
    StructuredCitation,
};
pub use display::{display_width, publication_table_columns, terminal_width, truncate_with_ellipsis};
pub use validate::{
    normalize, normalize_with_limit, validate_new_publication, validate_patch, validate_url,
    ValidationError, YEAR_RANGE,
};
