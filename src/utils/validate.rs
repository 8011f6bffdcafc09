//! Input validation: search parameter normalization and record checks.
//!
//! Raw parameters arrive as strings (query strings) or loosely typed JSON.
//! [`normalize`] turns them into a canonical [`SearchQuery`] or explains,
//! in a [`ValidationError`], which parameter could not be coerced.

use thiserror::Error;

use crate::models::{
    NewPublication, PublicationPatch, RawNumber, RawSearchParams, SearchQuery, SortBy,
    SortDirection, ALL_CATEGORIES, DEFAULT_LIMIT,
};

/// Smallest and largest accepted publication year
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Validation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Expected a number for '{field}', got \"{value}\"")]
    NotANumber { field: &'static str, value: String },

    #[error("'{field}' must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: i64,
        min: i64,
    },

    #[error("'{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("'yearFrom' ({from}) is after 'yearTo' ({to})")]
    InvalidYearRange { from: i32, to: i32 },

    #[error("Invalid sortBy: \"{0}\" (expected year, title or journal)")]
    InvalidSortField(String),

    #[error("Invalid sortDirection: \"{0}\" (expected asc or desc)")]
    InvalidSortDirection(String),

    #[error("'{0}' must not be empty")]
    MissingField(&'static str),

    #[error("'{field}' must be a string or a list of strings")]
    MalformedList { field: &'static str },

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Normalize raw search parameters with the default page size
pub fn normalize(raw: RawSearchParams) -> Result<SearchQuery, ValidationError> {
    normalize_with_limit(raw, DEFAULT_LIMIT)
}

/// Normalize raw search parameters, using `default_limit` when no page size is given.
///
/// Blank text filters count as absent. A category of `"all"` disables the
/// category filter. Database filters given as one value or as a list end up
/// in the same list form.
pub fn normalize_with_limit(
    raw: RawSearchParams,
    default_limit: u32,
) -> Result<SearchQuery, ValidationError> {
    let year_from = coerce_year("yearFrom", raw.year_from)?;
    let year_to = coerce_year("yearTo", raw.year_to)?;
    if let (Some(from), Some(to)) = (year_from, year_to) {
        if from > to {
            return Err(ValidationError::InvalidYearRange { from, to });
        }
    }

    let page = coerce_positive("page", raw.page)?.unwrap_or(1);
    let limit = coerce_positive("limit", raw.limit)?.unwrap_or(default_limit.max(1));

    let sort_by = match text(raw.sort_by) {
        Some(s) => s
            .parse::<SortBy>()
            .map_err(ValidationError::InvalidSortField)?,
        None => SortBy::default(),
    };
    let sort_direction = match text(raw.sort_direction) {
        Some(s) => s
            .parse::<SortDirection>()
            .map_err(ValidationError::InvalidSortDirection)?,
        None => SortDirection::default(),
    };

    let category = text(raw.category).filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES));

    let database = match raw.database {
        Some(param) => param
            .into_vec()
            .ok_or(ValidationError::MalformedList { field: "database" })?
            .into_iter()
            .filter_map(|db| text(Some(db)))
            .collect::<Vec<_>>(),
        None => Vec::new(),
    };
    let database = (!database.is_empty()).then_some(database);

    let query = SearchQuery {
        query: text(raw.query),
        author: text(raw.author),
        university: text(raw.university),
        journal: text(raw.journal),
        category,
        year_from,
        year_to,
        database,
        page,
        limit,
        sort_by,
        sort_direction,
    };

    tracing::debug!(?query, "normalized search parameters");
    Ok(query)
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Coerce a raw number; blank text counts as absent
fn coerce_integer(
    field: &'static str,
    value: Option<RawNumber>,
) -> Result<Option<i64>, ValidationError> {
    let not_a_number = |value: String| ValidationError::NotANumber { field, value };

    match value {
        None => Ok(None),
        Some(RawNumber::Integer(n)) => Ok(Some(n)),
        Some(RawNumber::Float(f)) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Ok(Some(f as i64))
            } else {
                Err(not_a_number(f.to_string()))
            }
        }
        Some(RawNumber::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Some(n));
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(not_a_number(s)),
            }
        }
    }
}

fn coerce_year(
    field: &'static str,
    value: Option<RawNumber>,
) -> Result<Option<i32>, ValidationError> {
    coerce_integer(field, value)?
        .map(|n| i32::try_from(n).map_err(|_| ValidationError::OutOfRange { field, value: n }))
        .transpose()
}

fn coerce_positive(
    field: &'static str,
    value: Option<RawNumber>,
) -> Result<Option<u32>, ValidationError> {
    coerce_integer(field, value)?
        .map(|n| {
            if n < 1 {
                return Err(ValidationError::TooSmall { field, value: n, min: 1 });
            }
            u32::try_from(n).map_err(|_| ValidationError::OutOfRange { field, value: n })
        })
        .transpose()
}

/// Check the fields required to create a publication
pub fn validate_new_publication(publication: &NewPublication) -> Result<(), ValidationError> {
    require_text("title", &publication.title)?;
    require_text("authors", &publication.authors)?;
    validate_year(publication.year)?;
    if let Some(url) = publication.url.as_deref().filter(|u| !u.is_empty()) {
        validate_url(url)?;
    }
    Ok(())
}

/// Check the fields carried by a partial update
pub fn validate_patch(patch: &PublicationPatch) -> Result<(), ValidationError> {
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(authors) = &patch.authors {
        require_text("authors", authors)?;
    }
    if let Some(year) = patch.year {
        validate_year(year)?;
    }
    if let Some(url) = patch.url.as_deref().filter(|u| !u.is_empty()) {
        validate_url(url)?;
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn validate_year(year: i32) -> Result<(), ValidationError> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidYear(year))
    }
}

/// Validate a record URL
///
/// Returns `Ok(String)` if valid, or `Err(ValidationError)` if invalid.
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    if url.contains('\0') {
        return Err(ValidationError::InvalidUrl("contains null byte".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    // Only allow HTTP and HTTPS schemes
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "invalid scheme: {}",
                other
            )))
        }
    }

    Ok(url.to_string())
}
