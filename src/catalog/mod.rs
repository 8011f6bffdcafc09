//! Publication catalog: search orchestration and the storage collaborator.
//!
//! [`search`] is the single definition of filter, sort and pagination
//! semantics. Storage implementations hand it a consistent snapshot of their
//! records instead of reimplementing the rules.
//!
//! # Filters
//!
//! Every filter present in the [`SearchQuery`] must match. Text filters are
//! case-insensitive substring checks:
//!
//! - `query` against title, authors or abstract
//! - `author` and `university` against authors
//! - `journal` against journal
//!
//! `category` must equal the record's category exactly, year bounds are
//! inclusive, and `database` matches when the record lists any of the
//! requested databases.
//!
//! # Example
//!
//! ```rust
//! use publication_catalog::catalog::search;
//! use publication_catalog::models::{PublicationBuilder, SearchQuery};
//!
//! let records = vec![
//!     PublicationBuilder::new(1, "Метод X", "Иванов И.И.", 2023).category("ВАК").build(),
//!     PublicationBuilder::new(2, "Метод Y", "Петров П.П.", 2021).category("РИНЦ").build(),
//! ];
//! let result = search(&records, &SearchQuery::new("метод").category("ВАК"));
//! assert_eq!(result.total, 1);
//! assert_eq!(result.data[0].id, 1);
//! ```

mod memory;
mod pagination;
mod storage;

pub use memory::MemoryStorage;
pub use pagination::{page_window, total_pages, PageItem};
pub use storage::{Storage, StorageError};

use std::cmp::Ordering;

use crate::models::{
    Publication, SearchQuery, SearchResult, SortBy, SortDirection, ALL_CATEGORIES,
};

/// Filter, sort and paginate `publications` according to `query`.
///
/// The sort is stable, so records with equal sort keys keep their input
/// order in both directions. `total` counts every match before slicing; a
/// page past the end yields empty `data` with the full `total`. Only the
/// returned page is cloned.
pub fn search<'a, I>(publications: I, query: &SearchQuery) -> SearchResult
where
    I: IntoIterator<Item = &'a Publication>,
{
    let matcher = Matcher::new(query);

    let mut matches: Vec<&Publication> = publications
        .into_iter()
        .filter(|p| matcher.matches(p))
        .collect();

    matches.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_by);
        match query.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let total = matches.len();
    let data = matches
        .into_iter()
        .skip(query.offset())
        .take(query.limit as usize)
        .cloned()
        .collect();

    tracing::debug!(
        total,
        page = query.page,
        limit = query.limit,
        sort_by = %query.sort_by,
        "search completed"
    );

    SearchResult::new(data, total)
}

fn compare(a: &Publication, b: &Publication, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Year => a.year.cmp(&b.year),
        SortBy::Title => a.title.cmp(&b.title),
        SortBy::Journal => a
            .journal
            .as_deref()
            .unwrap_or("")
            .cmp(b.journal.as_deref().unwrap_or("")),
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Query filters with needles lowercased once up front
struct Matcher<'q> {
    query: &'q SearchQuery,
    /// Exact category filter; `None` for blank or the "all" sentinel
    category: Option<&'q str>,
    text: Option<String>,
    author: Option<String>,
    university: Option<String>,
    journal: Option<String>,
    databases: Option<Vec<String>>,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q SearchQuery) -> Self {
        let lower = |s: &Option<String>| s.as_deref().map(str::to_lowercase);
        Self {
            query,
            category: query.category.as_deref().filter(|c| {
                let c = c.trim();
                !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES)
            }),
            text: lower(&query.query),
            author: lower(&query.author),
            university: lower(&query.university),
            journal: lower(&query.journal),
            databases: query
                .database
                .as_ref()
                .map(|dbs| dbs.iter().map(|d| d.to_lowercase()).collect()),
        }
    }

    fn matches(&self, p: &Publication) -> bool {
        if let Some(text) = &self.text {
            let in_abstract = p.r#abstract.as_deref().is_some_and(|a| contains(a, text));
            if !(contains(&p.title, text) || contains(&p.authors, text) || in_abstract) {
                return false;
            }
        }

        if let Some(author) = &self.author {
            if !contains(&p.authors, author) {
                return false;
            }
        }

        // No affiliation field exists; affiliations are expected in the author text.
        if let Some(university) = &self.university {
            if !contains(&p.authors, university) {
                return false;
            }
        }

        if let Some(journal) = &self.journal {
            if !p.journal.as_deref().is_some_and(|j| contains(j, journal)) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if p.category.as_deref() != Some(category) {
                return false;
            }
        }

        if self.query.year_from.is_some_and(|from| p.year < from) {
            return false;
        }
        if self.query.year_to.is_some_and(|to| p.year > to) {
            return false;
        }

        if let Some(databases) = &self.databases {
            let listed = p.database_list();
            let any = listed
                .iter()
                .any(|db| databases.iter().any(|wanted| db.to_lowercase() == *wanted));
            if !any {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationBuilder;

    fn record(id: i64, title: &str, year: i32) -> Publication {
        PublicationBuilder::new(id, title, "Author", year).build()
    }

    fn ids(result: &SearchResult) -> Vec<i64> {
        result.data.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_category_pagination_scenario() {
        let records = vec![
            PublicationBuilder::new(1, "A", "X", 2020).category("Q1-Q2").build(),
            PublicationBuilder::new(2, "B", "X", 2020).category("Q1-Q2").build(),
            PublicationBuilder::new(3, "C", "X", 2020).category("РИНЦ").build(),
        ];
        let query = SearchQuery::default().category("Q1-Q2").page(2, 1);

        let result = search(&records, &query);
        assert_eq!(result.total, 2);
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_page_past_end_is_empty_with_total() {
        let records: Vec<_> = (1..=5).map(|i| record(i, "T", 2000 + i as i32)).collect();
        let result = search(&records, &SearchQuery::default().page(3, 5));
        assert!(result.data.is_empty());
        assert_eq!(result.total, 5);
    }

    #[test]
    fn test_stable_sort_in_both_directions() {
        let records = vec![
            record(1, "A", 2020),
            record(2, "B", 2021),
            record(3, "C", 2020),
            record(4, "D", 2021),
        ];

        let desc = search(&records, &SearchQuery::default());
        assert_eq!(ids(&desc), vec![2, 4, 1, 3]);

        let asc = search(
            &records,
            &SearchQuery::default().sort(SortBy::Year, SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_sort_by_title_and_journal() {
        let records = vec![
            PublicationBuilder::new(1, "Beta", "X", 2020).journal("Zeta").build(),
            PublicationBuilder::new(2, "Alpha", "X", 2020).build(),
            PublicationBuilder::new(3, "Gamma", "X", 2020).journal("Alpha").build(),
        ];

        let by_title = search(
            &records,
            &SearchQuery::default().sort(SortBy::Title, SortDirection::Asc),
        );
        assert_eq!(ids(&by_title), vec![2, 1, 3]);

        // A missing journal sorts as empty text
        let by_journal = search(
            &records,
            &SearchQuery::default().sort(SortBy::Journal, SortDirection::Asc),
        );
        assert_eq!(ids(&by_journal), vec![2, 3, 1]);
    }

    #[test]
    fn test_query_matches_title_authors_or_abstract() {
        let records = vec![
            PublicationBuilder::new(1, "Нейросети", "Иванов", 2020).build(),
            PublicationBuilder::new(2, "Other", "НЕЙРОСЕТИ Lab", 2020).build(),
            PublicationBuilder::new(3, "Other", "X", 2020)
                .abstract_text("про нейросети")
                .build(),
            PublicationBuilder::new(4, "Other", "X", 2020).build(),
        ];
        let result = search(&records, &SearchQuery::new("нейросети"));
        assert_eq!(result.total, 3);
        assert!(!ids(&result).contains(&4));
    }

    #[test]
    fn test_author_university_and_journal_filters() {
        let records = vec![
            PublicationBuilder::new(1, "T", "Иванов И.И. (МГУ)", 2020)
                .journal("Вестник МГУ")
                .build(),
            PublicationBuilder::new(2, "T", "Петров П.П. (СПбГУ)", 2020).build(),
        ];

        let by_university = search(&records, &SearchQuery::default().university("мгу"));
        assert_eq!(ids(&by_university), vec![1]);

        let by_author = search(&records, &SearchQuery::default().author("петров"));
        assert_eq!(ids(&by_author), vec![2]);

        // Records without a journal never match a journal filter
        let by_journal = search(&records, &SearchQuery::default().journal("вестник"));
        assert_eq!(ids(&by_journal), vec![1]);
    }

    #[test]
    fn test_category_is_exact() {
        let records = vec![
            PublicationBuilder::new(1, "T", "X", 2020).category("ВАК").build(),
            PublicationBuilder::new(2, "T", "X", 2020).category("Статьи ВАК").build(),
        ];
        let result = search(&records, &SearchQuery::default().category("ВАК"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_all_category_disables_filter() {
        let records = vec![
            PublicationBuilder::new(1, "T", "X", 2021).category("ВАК").build(),
            PublicationBuilder::new(2, "T", "X", 2020).category("РИНЦ").build(),
        ];

        for sentinel in ["all", "ALL", " All "] {
            let result = search(&records, &SearchQuery::default().category(sentinel));
            assert_eq!(result.total, 2);
            assert_eq!(ids(&result), vec![1, 2]);
        }
    }

    #[test]
    fn test_accepts_borrowed_records() {
        let owned = vec![record(1, "A", 2020), record(2, "B", 2021)];
        let borrowed: Vec<&Publication> = owned.iter().collect();
        let result = search(borrowed, &SearchQuery::default());
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_year_bounds_inclusive() {
        let records: Vec<_> = (2018..=2024).map(|y| record(y as i64, "T", y)).collect();
        let result = search(
            &records,
            &SearchQuery::default()
                .years(Some(2019), Some(2021))
                .sort(SortBy::Year, SortDirection::Asc),
        );
        assert_eq!(ids(&result), vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_database_match_any() {
        let records = vec![
            PublicationBuilder::new(1, "T", "X", 2020).database("Scopus, ВАК").build(),
            PublicationBuilder::new(2, "T", "X", 2020).database("eLIBRARY").build(),
            record(3, "T", 2020),
        ];

        let vak = search(&records, &SearchQuery::default().database("ВАК"));
        assert_eq!(ids(&vak), vec![1]);

        let any = search(
            &records,
            &SearchQuery::default().database("РИНЦ").database("ВАК"),
        );
        assert_eq!(ids(&any), vec![1]);

        let elibrary = search(&records, &SearchQuery::default().database("elibrary"));
        assert_eq!(ids(&elibrary), vec![2]);
    }
}
