//! Export request and summary models.

use serde::{Deserialize, Serialize};

use crate::utils::CitationStyle;

fn default_true() -> bool {
    true
}

/// Request to export a selection of publications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Ids of the selected publications
    pub ids: Vec<i64>,

    /// Parsed with `CitationStyle::parse`, so styles without a formatter
    /// (MLA and the like) come back as GOST in the summary.
    #[serde(default)]
    pub format: CitationStyle,

    #[serde(default = "default_true")]
    pub include_abstract: bool,

    #[serde(default = "default_true")]
    pub include_doi: bool,

    #[serde(default = "default_true")]
    pub include_categories: bool,
}

impl ExportRequest {
    pub fn new(ids: Vec<i64>, format: CitationStyle) -> Self {
        Self {
            ids,
            format,
            include_abstract: true,
            include_doi: true,
            include_categories: true,
        }
    }
}

/// Acknowledgement of an export; no file is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub message: String,
    pub format: CitationStyle,
    /// Number of publications found for the requested ids
    pub count: usize,
    pub include_abstract: bool,
    pub include_doi: bool,
    pub include_categories: bool,
}

impl ExportSummary {
    /// Summarize `request` for `count` resolved publications
    pub fn new(request: &ExportRequest, count: usize) -> Self {
        Self {
            message: "Export completed".to_string(),
            format: request.format,
            count,
            include_abstract: request.include_abstract,
            include_doi: request.include_doi,
            include_categories: request.include_categories,
        }
    }
}
