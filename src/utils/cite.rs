//! Citation formatting in various styles.
//!
//! Supports GOST R 7.0.100-2018, APA and BibTeX. Formatting never fails: an
//! absent optional field is left out of the output.

use crate::models::{non_empty, Publication};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Citation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CitationStyle {
    /// GOST R 7.0.100-2018
    #[default]
    Gost,
    /// APA
    Apa,
    /// BibTeX entry
    Bibtex,
}

impl CitationStyle {
    /// Resolve a style name, case-insensitively.
    ///
    /// Styles without a formatter of their own (MLA, Chicago, Harvard, or any
    /// unknown name) resolve to GOST.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "APA" => CitationStyle::Apa,
            "BIBTEX" => CitationStyle::Bibtex,
            _ => CitationStyle::Gost,
        }
    }

    /// Wire name of the style
    pub fn id(&self) -> &'static str {
        match self {
            CitationStyle::Gost => "GOST",
            CitationStyle::Apa => "APA",
            CitationStyle::Bibtex => "BIBTEX",
        }
    }
}

impl<'de> Deserialize<'de> for CitationStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(CitationStyle::parse(&name))
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationStyle::Gost => write!(f, "ГОСТ Р 7.0.100-2018"),
            CitationStyle::Apa => write!(f, "APA"),
            CitationStyle::Bibtex => write!(f, "BibTeX"),
        }
    }
}

/// Format a publication citation in the specified style.
///
/// Passing `None` yields an empty string for every style.
pub fn format_citation<'a>(
    publication: impl Into<Option<&'a Publication>>,
    style: CitationStyle,
) -> String {
    let Some(publication) = publication.into() else {
        return String::new();
    };
    match style {
        CitationStyle::Gost => format_gost(publication),
        CitationStyle::Apa => format_apa(publication),
        CitationStyle::Bibtex => format_bibtex(publication),
    }
}

/// Format a selection, one citation per paragraph
pub fn format_bundle(publications: &[Publication], style: CitationStyle) -> String {
    publications
        .iter()
        .map(|p| format_citation(p, style))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn year_of(publication: &Publication) -> Option<i32> {
    Some(publication.year).filter(|y| *y != 0)
}

/// Format: Authors Title // Journal. – Year. – Т. V, № I. – С. P. – DOI: D. – (Category, ВАК)
fn format_gost(publication: &Publication) -> String {
    let mut out = String::new();

    out.push_str(&publication.authors);

    if !publication.title.is_empty() {
        out.push_str(&format!(" {} // ", publication.title));
    }

    if let Some(journal) = non_empty(&publication.journal) {
        out.push_str(&format!("{}. – ", journal));
    }

    if let Some(year) = year_of(publication) {
        out.push_str(&format!("{}. – ", year));
    }

    let volume = non_empty(&publication.volume);
    let issue = non_empty(&publication.issue);
    if volume.is_some() || issue.is_some() {
        out.push_str("Т. ");
        if let Some(volume) = volume {
            out.push_str(volume);
        }
        if let Some(issue) = issue {
            out.push_str(&format!(", № {}", issue));
        }
        out.push_str(". – ");
    }

    if let Some(pages) = non_empty(&publication.pages) {
        out.push_str(&format!("С. {}", pages));
    }

    if let Some(doi) = non_empty(&publication.doi) {
        out.push_str(&format!(". – DOI: {}", doi));
    }

    if let Some(category) = non_empty(&publication.category) {
        out.push_str(&format!(". – ({}", category));
        let database = publication.database.as_deref().unwrap_or("");
        if database.contains("ВАК") {
            out.push_str(", ВАК");
        } else if database.contains("РИНЦ") {
            out.push_str(", РИНЦ");
        }
        out.push(')');
    }

    out
}

/// Format: Authors (Year). Title. Journal, Volume(Issue), Pages. https://doi.org/DOI
fn format_apa(publication: &Publication) -> String {
    let mut out = String::new();

    if !publication.authors.is_empty() {
        let authors: Vec<&str> = publication.authors.split(',').map(str::trim).collect();
        out.push_str(&authors.join(", "));
    }

    if let Some(year) = year_of(publication) {
        out.push_str(&format!(" ({}). ", year));
    }

    if !publication.title.is_empty() {
        out.push_str(&format!("{}. ", publication.title));
    }

    if let Some(journal) = non_empty(&publication.journal) {
        out.push_str(journal);
        if let Some(volume) = non_empty(&publication.volume) {
            out.push_str(&format!(", {}", volume));
            if let Some(issue) = non_empty(&publication.issue) {
                out.push_str(&format!("({})", issue));
            }
        }
        if let Some(pages) = non_empty(&publication.pages) {
            out.push_str(&format!(", {}", pages));
        }
        out.push('.');
    }

    if let Some(doi) = non_empty(&publication.doi) {
        out.push_str(&format!(" https://doi.org/{}", doi));
    }

    out
}

/// Citation key: first token of the first author, the year, and the first
/// title word in lowercase.
///
/// Two records sharing all three parts get the same key; no suffix is added.
pub fn bibtex_key(publication: &Publication) -> String {
    let first_author = publication
        .authors
        .split(',')
        .next()
        .unwrap_or("")
        .split_whitespace()
        .next()
        .unwrap_or("");
    let first_word = publication
        .title
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    format!("{}{}{}", first_author, publication.year, first_word)
}

/// Generate a BibTeX entry
fn format_bibtex(publication: &Publication) -> String {
    let mut out = format!(
        "@{}{{{},\n",
        publication.kind.bibtex_entry(),
        bibtex_key(publication)
    );

    let year = year_of(publication).map(|y| y.to_string());
    let note = non_empty(&publication.category).map(|category| {
        match non_empty(&publication.database) {
            Some(database) => format!("{}, {}", category, database),
            None => category.to_string(),
        }
    });

    let fields: [(&str, Option<&str>); 10] = [
        ("author", Some(publication.authors.as_str()).filter(|s| !s.is_empty())),
        ("title", Some(publication.title.as_str()).filter(|s| !s.is_empty())),
        ("journal", non_empty(&publication.journal)),
        ("year", year.as_deref()),
        ("volume", non_empty(&publication.volume)),
        ("number", non_empty(&publication.issue)),
        ("pages", non_empty(&publication.pages)),
        ("doi", non_empty(&publication.doi)),
        ("url", non_empty(&publication.url)),
        ("note", note.as_deref()),
    ];

    for (key, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("  {} = {{{}}},\n", key, value));
        }
    }

    out.push('}');
    out
}

/// Structured citation data for JSON output
#[derive(Debug, Serialize)]
pub struct StructuredCitation {
    pub id: i64,
    pub style: CitationStyle,
    pub formatted: String,
}

/// Get structured citation data
pub fn get_structured_citation(publication: &Publication, style: CitationStyle) -> StructuredCitation {
    StructuredCitation {
        id: publication.id,
        style,
        formatted: format_citation(publication, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PublicationBuilder, PublicationType};

    fn full_record() -> Publication {
        PublicationBuilder::new(1, "Метод X", "Иванов И.И.", 2023)
            .journal("Журнал Y")
            .volume("5")
            .issue("2")
            .pages("10-20")
            .doi("10.1/x")
            .category("ВАК")
            .build()
    }

    #[test]
    fn test_gost_full_record() {
        assert_eq!(
            format_citation(&full_record(), CitationStyle::Gost),
            "Иванов И.И. Метод X // Журнал Y. – 2023. – Т. 5, № 2. – С. 10-20. – DOI: 10.1/x. – (ВАК)"
        );
    }

    #[test]
    fn test_gost_minimal_record() {
        let publication = Publication::new(1, "Title", "Author A.", 2020);
        assert_eq!(
            format_citation(&publication, CitationStyle::Gost),
            "Author A. Title // 2020. – "
        );
    }

    #[test]
    fn test_gost_volume_without_issue() {
        let publication = PublicationBuilder::new(1, "T", "A", 2020).volume("3").build();
        assert_eq!(format_gost(&publication), "A T // 2020. – Т. 3. – ");
    }

    #[test]
    fn test_gost_issue_without_volume() {
        let publication = PublicationBuilder::new(1, "T", "A", 2020).issue("4").build();
        assert_eq!(format_gost(&publication), "A T // 2020. – Т. , № 4. – ");
    }

    #[test]
    fn test_gost_database_suffix_prefers_vak() {
        let both = PublicationBuilder::new(1, "T", "A", 2020)
            .category("Q1-Q2")
            .database("РИНЦ, ВАК")
            .build();
        assert!(format_gost(&both).ends_with("(Q1-Q2, ВАК)"));

        let rinc = PublicationBuilder::new(1, "T", "A", 2020)
            .category("Q3-Q4")
            .database("Scopus, РИНЦ")
            .build();
        assert!(format_gost(&rinc).ends_with("(Q3-Q4, РИНЦ)"));

        let neither = PublicationBuilder::new(1, "T", "A", 2020)
            .category("Q1-Q2")
            .database("Scopus")
            .build();
        assert!(format_gost(&neither).ends_with("(Q1-Q2)"));
    }

    #[test]
    fn test_apa_full_record() {
        let publication = PublicationBuilder::new(1, "Deep nets", "Smith J.,Doe A.", 2021)
            .journal("Nature")
            .volume("12")
            .issue("3")
            .pages("1-9")
            .doi("10.1038/x")
            .build();
        assert_eq!(
            format_citation(&publication, CitationStyle::Apa),
            "Smith J., Doe A. (2021). Deep nets. Nature, 12(3), 1-9. https://doi.org/10.1038/x"
        );
    }

    #[test]
    fn test_apa_issue_requires_volume() {
        let publication = PublicationBuilder::new(1, "T", "A", 2021)
            .journal("J")
            .issue("3")
            .build();
        assert_eq!(format_apa(&publication), "A (2021). T. J.");
    }

    #[test]
    fn test_apa_without_journal() {
        let publication = PublicationBuilder::new(1, "T", "A", 2021).doi("10.1/y").build();
        assert_eq!(format_apa(&publication), "A (2021). T.  https://doi.org/10.1/y");
    }

    #[test]
    fn test_bibtex_article() {
        let publication = PublicationBuilder::new(1, "Метод X", "Иванов И.И., Петров П.П.", 2023)
            .journal("Журнал Y")
            .issue("2")
            .category("ВАК")
            .database("РИНЦ, ВАК")
            .build();
        assert_eq!(
            format_citation(&publication, CitationStyle::Bibtex),
            "@article{Иванов2023метод,\n  author = {Иванов И.И., Петров П.П.},\n  title = {Метод X},\n  journal = {Журнал Y},\n  year = {2023},\n  number = {2},\n  note = {ВАК, РИНЦ, ВАК},\n}"
        );
    }

    #[test]
    fn test_bibtex_entry_types() {
        let cases = [
            (PublicationType::Book, "@book{"),
            (PublicationType::Patent, "@patent{"),
            (PublicationType::Dissertation, "@phdthesis{"),
            (PublicationType::Other, "@misc{"),
        ];
        for (kind, prefix) in cases {
            let publication = PublicationBuilder::new(1, "T", "A", 2020).kind(kind).build();
            assert!(format_bibtex(&publication).starts_with(prefix), "{:?}", kind);
        }
    }

    #[test]
    fn test_bibtex_key_collision_is_not_resolved() {
        let a = Publication::new(1, "Neural methods", "Lee K., Park S.", 2020);
        let b = Publication::new(2, "Neural networks", "Lee M.", 2020);
        assert_eq!(bibtex_key(&a), "Lee2020neural");
        assert_eq!(bibtex_key(&a), bibtex_key(&b));
    }

    #[test]
    fn test_absent_publication_is_empty() {
        for style in [CitationStyle::Gost, CitationStyle::Apa, CitationStyle::Bibtex] {
            assert_eq!(format_citation(None::<&Publication>, style), "");
        }
    }

    #[test]
    fn test_style_parse_falls_back_to_gost() {
        assert_eq!(CitationStyle::parse("apa"), CitationStyle::Apa);
        assert_eq!(CitationStyle::parse("BibTeX"), CitationStyle::Bibtex);
        assert_eq!(CitationStyle::parse("MLA"), CitationStyle::Gost);
        assert_eq!(CitationStyle::parse("harvard"), CitationStyle::Gost);

        let style: CitationStyle = serde_json::from_str("\"CHICAGO\"").unwrap();
        assert_eq!(style, CitationStyle::Gost);
    }

    #[test]
    fn test_bundle_joins_with_blank_line() {
        let a = Publication::new(1, "A", "X", 2020);
        let b = Publication::new(2, "B", "Y", 2021);
        assert_eq!(
            format_bundle(&[a, b], CitationStyle::Gost),
            "X A // 2020. – \n\nY B // 2021. – "
        );
    }
}
