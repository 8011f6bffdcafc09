//! REST handlers: translate requests into catalog calls and results into JSON.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::Storage;
use crate::models::{
    ExportRequest, ExportSummary, NewPublication, PublicationPatch, RawSearchParams, DEFAULT_LIMIT,
};
use crate::utils::{
    get_structured_citation, normalize_with_limit, validate_new_publication, validate_patch,
    CitationStyle,
};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    /// Page size used when a search does not give `limit`
    pub default_limit: u32,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            default_limit: DEFAULT_LIMIT,
        }
    }

    pub fn default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::invalid_publication_id(raw))
}

// ==================== SEARCH ====================

/// GET /api/publications
pub async fn list_publications(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let raw = RawSearchParams::from_query_string(req.query_string());
    let query = normalize_with_limit(raw, state.default_limit)?;
    let result = state.storage.get_publications(&query).await?;
    Ok(HttpResponse::Ok().json(result))
}

// ==================== CRUD ====================

/// GET /api/publications/{id}
pub async fn get_publication(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let publication = state
        .storage
        .get_publication(id)
        .await?
        .ok_or_else(ApiError::publication_not_found)?;
    Ok(HttpResponse::Ok().json(publication))
}

/// POST /api/publications
pub async fn create_publication(
    state: web::Data<AppState>,
    body: web::Json<NewPublication>,
) -> ApiResult<HttpResponse> {
    let data = body.into_inner();
    validate_new_publication(&data)?;
    let publication = state.storage.create_publication(data).await?;
    Ok(HttpResponse::Created().json(publication))
}

/// PUT /api/publications/{id}
pub async fn update_publication(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PublicationPatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let patch = body.into_inner();
    validate_patch(&patch)?;
    let publication = state
        .storage
        .update_publication(id, patch)
        .await?
        .ok_or_else(ApiError::publication_not_found)?;
    Ok(HttpResponse::Ok().json(publication))
}

/// DELETE /api/publications/{id}
pub async fn delete_publication(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    if !state.storage.delete_publication(id).await? {
        return Err(ApiError::publication_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}

// ==================== SELECTION ====================

fn ids_from_body(body: &Value) -> ApiResult<Vec<i64>> {
    let invalid = || ApiError::BadRequest("Invalid ids format: expected an array of integers".to_string());
    body.get("ids")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_i64().ok_or_else(invalid))
        .collect()
}

/// POST /api/publications/batch
pub async fn batch_publications(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let ids = ids_from_body(&body)?;
    let publications = state.storage.get_publications_by_ids(&ids).await?;
    Ok(HttpResponse::Ok().json(publications))
}

/// POST /api/publications/export
///
/// Echoes a summary of the export; no file is produced.
pub async fn export_publications(
    state: web::Data<AppState>,
    body: web::Json<ExportRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let publications = state.storage.get_publications_by_ids(&request.ids).await?;
    if publications.is_empty() {
        return Err(ApiError::NotFound("Publications not found".to_string()));
    }

    tracing::info!(count = publications.len(), format = request.format.id(), "export requested");
    Ok(HttpResponse::Ok().json(ExportSummary::new(&request, publications.len())))
}

#[derive(Debug, Deserialize)]
pub struct CitationParams {
    pub style: Option<String>,
}

/// GET /api/publications/{id}/citation?style=
pub async fn cite_publication(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<CitationParams>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let style = params
        .style
        .as_deref()
        .map(CitationStyle::parse)
        .unwrap_or_default();
    let publication = state
        .storage
        .get_publication(id)
        .await?
        .ok_or_else(ApiError::publication_not_found)?;
    Ok(HttpResponse::Ok().json(get_structured_citation(&publication, style)))
}
