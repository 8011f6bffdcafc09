//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Publication;

/// Default page size when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 10;

/// Category value that disables the category filter
pub const ALL_CATEGORIES: &str = "all";

/// Sort direction for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort field for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Year,
    Title,
    Journal,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(SortBy::Year),
            "title" => Ok(SortBy::Title),
            "journal" => Ok(SortBy::Journal),
            other => Err(other.to_string()),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Year => f.write_str("year"),
            SortBy::Title => f.write_str("title"),
            SortBy::Journal => f.write_str("journal"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Canonical search query, built fresh for every request
///
/// Every filter that is `Some` must match; `None` disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free-text term matched against title, authors and abstract
    pub query: Option<String>,

    pub author: Option<String>,

    /// Matched against the author text, no dedicated affiliation field exists
    pub university: Option<String>,

    pub journal: Option<String>,

    /// Exact category; the "all" sentinel is normalized away to `None`
    pub category: Option<String>,

    /// Inclusive lower year bound
    pub year_from: Option<i32>,

    /// Inclusive upper year bound
    pub year_to: Option<i32>,

    /// Required database memberships (match-any)
    pub database: Option<Vec<String>>,

    /// 1-based page number
    pub page: u32,

    /// Page size, at least 1
    pub limit: u32,

    pub sort_by: SortBy,

    pub sort_direction: SortDirection,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: None,
            author: None,
            university: None,
            journal: None,
            category: None,
            year_from: None,
            year_to: None,
            database: None,
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::Year,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl SearchQuery {
    /// Create a new search query for a free-text term
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn university(mut self, university: impl Into<String>) -> Self {
        self.university = Some(university.into());
        self
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set inclusive year bounds
    pub fn years(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    /// Add a database to the match-any set
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database.get_or_insert_with(Vec::new).push(database.into());
        self
    }

    /// Set page number and page size
    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort_by: SortBy, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    /// Index of the first record on the requested page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// One page of matches plus the unpaginated match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub data: Vec<Publication>,

    /// Matches before pagination
    pub total: usize,
}

impl SearchResult {
    pub fn new(data: Vec<Publication>, total: usize) -> Self {
        Self { data, total }
    }
}

/// A numeric parameter as it arrives from a query string or JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

impl From<i64> for RawNumber {
    fn from(n: i64) -> Self {
        RawNumber::Integer(n)
    }
}

/// Database filter given either as one value or as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatabaseParam {
    One(String),
    Many(Vec<String>),
    /// Anything else a JSON body carried; rejected by the normalizer
    Malformed(serde_json::Value),
}

impl DatabaseParam {
    /// Flatten to a list in the order given; `None` for a malformed value
    pub fn into_vec(self) -> Option<Vec<String>> {
        match self {
            DatabaseParam::One(value) => Some(vec![value]),
            DatabaseParam::Many(values) => Some(values),
            DatabaseParam::Malformed(_) => None,
        }
    }

    fn push(self, value: String) -> Self {
        match self.into_vec() {
            Some(mut values) => {
                values.push(value);
                DatabaseParam::Many(values)
            }
            None => DatabaseParam::One(value),
        }
    }
}

/// Unvalidated search parameters, as received by the HTTP or CLI layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSearchParams {
    pub query: Option<String>,
    pub author: Option<String>,
    pub university: Option<String>,
    pub journal: Option<String>,
    pub category: Option<String>,
    pub year_from: Option<RawNumber>,
    pub year_to: Option<RawNumber>,
    pub database: Option<DatabaseParam>,
    pub page: Option<RawNumber>,
    pub limit: Option<RawNumber>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl RawSearchParams {
    /// Collect parameters from an `application/x-www-form-urlencoded` query string.
    ///
    /// `database` (or `database[]`) may repeat; any other repeated key keeps its
    /// last value. Unknown keys are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "query" => params.query = Some(value),
                "author" => params.author = Some(value),
                "university" => params.university = Some(value),
                "journal" => params.journal = Some(value),
                "category" => params.category = Some(value),
                "yearFrom" => params.year_from = Some(RawNumber::Text(value)),
                "yearTo" => params.year_to = Some(RawNumber::Text(value)),
                "page" => params.page = Some(RawNumber::Text(value)),
                "limit" => params.limit = Some(RawNumber::Text(value)),
                "sortBy" => params.sort_by = Some(value),
                "sortDirection" => params.sort_direction = Some(value),
                "database" | "database[]" => {
                    params.database = Some(match params.database.take() {
                        Some(existing) => existing.push(value),
                        None => DatabaseParam::One(value),
                    });
                }
                _ => {}
            }
        }
        params
    }
}
