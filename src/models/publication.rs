//! Publication model representing one bibliographic entry in the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bibliographic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    #[default]
    Article,
    Book,
    Patent,
    Dissertation,
    #[serde(other)]
    Other,
}

impl PublicationType {
    /// Returns the wire identifier of the type
    pub fn id(&self) -> &'static str {
        match self {
            PublicationType::Article => "article",
            PublicationType::Book => "book",
            PublicationType::Patent => "patent",
            PublicationType::Dissertation => "dissertation",
            PublicationType::Other => "other",
        }
    }

    /// BibTeX entry type used when exporting this kind of record
    pub fn bibtex_entry(&self) -> &'static str {
        match self {
            PublicationType::Article => "article",
            PublicationType::Book => "book",
            PublicationType::Patent => "patent",
            PublicationType::Dissertation => "phdthesis",
            PublicationType::Other => "misc",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A publication record as held by the storage layer
///
/// Records are flat: selections and search results refer to them by `id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Storage-assigned identifier, never reused
    pub id: i64,

    pub title: String,

    /// Authors as free text, comma-separated
    pub authors: String,

    #[serde(rename = "type", default)]
    pub kind: PublicationType,

    #[serde(default)]
    pub journal: Option<String>,

    pub year: i32,

    #[serde(default)]
    pub volume: Option<String>,

    #[serde(default)]
    pub issue: Option<String>,

    #[serde(default)]
    pub pages: Option<String>,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Classification such as "Q1-Q2", "ВАК" or "Патенты"
    #[serde(default)]
    pub category: Option<String>,

    /// Source databases, comma-separated (e.g. "Scopus, ВАК")
    #[serde(default)]
    pub database: Option<String>,

    /// Only meaningful when `kind` is [`PublicationType::Patent`]
    #[serde(default)]
    pub patent_number: Option<String>,
}

impl Publication {
    /// Create a record with the required fields and no optional metadata
    pub fn new(id: i64, title: impl Into<String>, authors: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            authors: authors.into(),
            kind: PublicationType::Article,
            journal: None,
            year,
            volume: None,
            issue: None,
            pages: None,
            doi: None,
            url: None,
            r#abstract: None,
            category: None,
            database: None,
            patent_number: None,
        }
    }

    /// Returns the source databases in declaration order.
    ///
    /// Duplicates are kept; blank segments are dropped.
    pub fn database_list(&self) -> Vec<&str> {
        self.database
            .as_deref()
            .map(|d| d.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Patent number, honoured only for patents
    pub fn patent_number(&self) -> Option<&str> {
        match self.kind {
            PublicationType::Patent => non_empty(&self.patent_number),
            _ => None,
        }
    }
}

/// Treat `Some("")` like `None`
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Payload for creating a publication; the id is assigned by storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPublication {
    pub title: String,
    pub authors: String,
    #[serde(rename = "type", default)]
    pub kind: PublicationType,
    #[serde(default)]
    pub journal: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub r#abstract: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub patent_number: Option<String>,
}

impl NewPublication {
    /// Attach a storage id, producing the stored record
    pub fn into_publication(self, id: i64) -> Publication {
        Publication {
            id,
            title: self.title,
            authors: self.authors,
            kind: self.kind,
            journal: self.journal,
            year: self.year,
            volume: self.volume,
            issue: self.issue,
            pages: self.pages,
            doi: self.doi,
            url: self.url,
            r#abstract: self.r#abstract,
            category: self.category,
            database: self.database,
            patent_number: self.patent_number,
        }
    }
}

/// Partial update: only the fields that are present are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<PublicationType>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub r#abstract: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub patent_number: Option<String>,
}

impl PublicationPatch {
    /// Apply the present fields to `publication`
    pub fn apply(self, publication: &mut Publication) {
        if let Some(title) = self.title {
            publication.title = title;
        }
        if let Some(authors) = self.authors {
            publication.authors = authors;
        }
        if let Some(kind) = self.kind {
            publication.kind = kind;
        }
        if let Some(year) = self.year {
            publication.year = year;
        }
        set_if_present(&mut publication.journal, self.journal);
        set_if_present(&mut publication.volume, self.volume);
        set_if_present(&mut publication.issue, self.issue);
        set_if_present(&mut publication.pages, self.pages);
        set_if_present(&mut publication.doi, self.doi);
        set_if_present(&mut publication.url, self.url);
        set_if_present(&mut publication.r#abstract, self.r#abstract);
        set_if_present(&mut publication.category, self.category);
        set_if_present(&mut publication.database, self.database);
        set_if_present(&mut publication.patent_number, self.patent_number);
    }
}

fn set_if_present(field: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *field = value;
    }
}

/// Builder for constructing Publication objects
#[derive(Debug, Clone)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Create a new builder with required fields
    pub fn new(id: i64, title: impl Into<String>, authors: impl Into<String>, year: i32) -> Self {
        Self {
            publication: Publication::new(id, title, authors, year),
        }
    }

    pub fn kind(mut self, kind: PublicationType) -> Self {
        self.publication.kind = kind;
        self
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.publication.journal = Some(journal.into());
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.publication.volume = Some(volume.into());
        self
    }

    pub fn issue(mut self, issue: impl Into<String>) -> Self {
        self.publication.issue = Some(issue.into());
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.publication.pages = Some(pages.into());
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.publication.doi = Some(doi.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.publication.url = Some(url.into());
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.publication.r#abstract = Some(abstract_text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.publication.category = Some(category.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.publication.database = Some(database.into());
        self
    }

    pub fn patent_number(mut self, number: impl Into<String>) -> Self {
        self.publication.patent_number = Some(number.into());
        self
    }

    /// Build the Publication
    pub fn build(self) -> Publication {
        self.publication
    }
}
