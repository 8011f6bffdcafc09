//! Integration tests for the publication catalog
//!
//! These tests drive the public API end to end: raw parameters through the
//! normalizer into storage, citations of stored records, and the REST routes.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use publication_catalog::api::{routes, AppState};
use publication_catalog::catalog::{page_window, total_pages, MemoryStorage, PageItem, Storage};
use publication_catalog::models::{
    DatabaseParam, PublicationBuilder, PublicationType, RawNumber, RawSearchParams, SearchResult,
};
use publication_catalog::utils::{
    classify, format_bundle, format_citation, normalize, CitationStyle, Palette, ValidationError,
};
use publication_catalog::Publication;
use std::io::Write;
use std::sync::Arc;

fn catalog() -> Vec<Publication> {
    vec![
        PublicationBuilder::new(1, "Метод X", "Иванов И.И.", 2023)
            .journal("Журнал Y")
            .volume("5")
            .issue("2")
            .pages("10-20")
            .doi("10.1/x")
            .category("ВАК")
            .database("Scopus, ВАК")
            .build(),
        PublicationBuilder::new(2, "Анализ данных", "Петров П.П., Сидоров С.С.", 2021)
            .journal("Вестник")
            .category("Q1-Q2")
            .database("Scopus, РИНЦ")
            .build(),
        PublicationBuilder::new(3, "Устройство", "Кузнецов К.К.", 2019)
            .kind(PublicationType::Patent)
            .patent_number("RU 2700000")
            .category("Патенты")
            .build(),
        PublicationBuilder::new(4, "Модель", "Смирнов А.А.", 2022)
            .kind(PublicationType::Dissertation)
            .category("Q1-Q2")
            .build(),
    ]
}

fn storage() -> MemoryStorage {
    MemoryStorage::from_publications(catalog()).unwrap()
}

#[tokio::test]
async fn test_query_string_through_storage() {
    let raw = RawSearchParams::from_query_string("category=Q1-Q2&page=2&limit=1&sortBy=year");
    let query = normalize(raw).unwrap();

    let result = storage().get_publications(&query).await.unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].id, 2);
}

#[tokio::test]
async fn test_single_database_equals_list() {
    let storage = storage();

    let single = RawSearchParams {
        database: Some(DatabaseParam::One("РИНЦ".to_string())),
        ..Default::default()
    };
    let list = RawSearchParams {
        database: Some(DatabaseParam::Many(vec!["РИНЦ".to_string()])),
        ..Default::default()
    };

    let a = storage.get_publications(&normalize(single).unwrap()).await.unwrap();
    let b = storage.get_publications(&normalize(list).unwrap()).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a.total, 1);
    assert_eq!(a.data[0].id, 2);
}

#[tokio::test]
async fn test_database_any_of() {
    let raw = RawSearchParams::from_query_string(
        "database=%D0%A0%D0%98%D0%9D%D0%A6&database=%D0%92%D0%90%D0%9A",
    );
    let result = storage().get_publications(&normalize(raw).unwrap()).await.unwrap();

    let mut ids: Vec<i64> = result.data.iter().map(|p| p.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[::core::prelude::v1::test]
fn test_invalid_year_is_rejected() {
    let raw = RawSearchParams {
        year_from: Some(RawNumber::Text("abc".to_string())),
        ..Default::default()
    };
    assert!(matches!(
        normalize(raw),
        Err(ValidationError::NotANumber { field: "yearFrom", .. })
    ));
}

#[tokio::test]
async fn test_citations_of_stored_records() {
    let storage = storage();
    let record = storage.get_publication(1).await.unwrap().unwrap();

    assert_eq!(
        format_citation(&record, CitationStyle::Gost),
        "Иванов И.И. Метод X // Журнал Y. – 2023. – Т. 5, № 2. – С. 10-20. – DOI: 10.1/x. – (ВАК, ВАК)"
    );
    assert_eq!(
        format_citation(&record, CitationStyle::Apa),
        "Иванов И.И. (2023). Метод X. Журнал Y, 5(2), 10-20. https://doi.org/10.1/x"
    );

    let patent = storage.get_publication(3).await.unwrap().unwrap();
    let bibtex = format_citation(&patent, CitationStyle::Bibtex);
    assert!(bibtex.starts_with("@patent{"));
    assert!(bibtex.contains("note = {Патенты}"));
}

#[tokio::test]
async fn test_bundle_of_selection() {
    let storage = storage();
    let selection = storage.get_publications_by_ids(&[1, 2]).await.unwrap();

    let bundle = format_bundle(&selection, CitationStyle::Gost);
    let parts: Vec<&str> = bundle.split("\n\n").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].starts_with("Иванов И.И."));
    assert!(parts[1].starts_with("Петров П.П., Сидоров С.С."));
}

#[::core::prelude::v1::test]
fn test_classifier_over_catalog() {
    let palettes: Vec<Palette> = catalog()
        .iter()
        .map(|p| classify(p.category.as_deref().unwrap_or("")).palette)
        .collect();
    assert_eq!(
        palettes,
        vec![Palette::Indigo, Palette::Blue, Palette::Purple, Palette::Blue]
    );
}

#[::core::prelude::v1::test]
fn test_page_strip_for_result() {
    let pages = total_pages(95, 10);
    assert_eq!(pages, 10);
    assert_eq!(
        page_window(5, pages),
        vec![
            PageItem::Page(1),
            PageItem::Ellipsis,
            PageItem::Page(4),
            PageItem::Page(5),
            PageItem::Page(6),
            PageItem::Ellipsis,
            PageItem::Page(10),
        ]
    );
}

#[actix_web::test]
async fn test_rest_api_over_seed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&catalog()).unwrap()).unwrap();

    let storage = MemoryStorage::load_json(file.path()).await.unwrap();
    let state = AppState::new(Arc::new(storage)).default_limit(2);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes),
    )
    .await;

    // Configured default page size applies when no limit is given
    let req = test::TestRequest::get().uri("/api/publications").to_request();
    let result: SearchResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.total, 4);
    let ids: Vec<i64> = result.data.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 4]);

    let req = test::TestRequest::get()
        .uri("/api/publications?category=all&sortBy=title&sortDirection=asc&limit=10")
        .to_request();
    let result: SearchResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.total, 4);

    let req = test::TestRequest::get()
        .uri("/api/publications?sortBy=rank")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/publications/3/citation?style=BIBTEX")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["style"], "BIBTEX");
    assert!(body["formatted"].as_str().unwrap().starts_with("@patent{"));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
