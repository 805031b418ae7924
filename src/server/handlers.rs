//! HTTP handlers for the catalog routes
//!
//! Handlers only translate between HTTP and [`CatalogService`]; all query
//! semantics live in the core.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::core::error::{CatalogError, ValidationError};
use crate::core::projection::Projection;
use crate::core::query::{
    PaginatedResponse, QueryParams, RawParams, RelatedParams, RelatedResponse,
};
use crate::core::service::CatalogService;

/// Header carrying the filtered total of a list query
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CatalogService,
}

/// Create a record
///
/// POST /items
///
/// Responds 201 with the stored record and a `Location` header.
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ValidationError::InvalidBody)?;

    // Insert persists the snapshot synchronously
    let service = state.service;
    let record = run_blocking(move || service.create_record(&payload)).await?;

    let location = format!("/items/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}

/// Fetch one record
///
/// GET /items/{item_id}?fields=name,price
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(raw): Query<RawParams>,
) -> Result<Json<Value>, CatalogError> {
    let fields = Projection::parse(raw.first("fields"));
    let service = state.service;
    let record = run_blocking(move || service.get_record(&item_id, &fields)).await?;
    Ok(Json(record))
}

/// List records
///
/// GET /items?category=..&vendor=..&min_price=..&tag=..&q=..&sort_by=..&page=..
pub async fn list_items(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Response, CatalogError> {
    let params = QueryParams::from_raw(&raw);
    let service = state.service;
    let response = run_blocking(move || service.query_records(&params)).await?;
    Ok(list_response(response))
}

/// List records of one category
///
/// GET /categories/{category}/items
pub async fn list_items_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(raw): Query<RawParams>,
) -> Result<Response, CatalogError> {
    let params = QueryParams::from_raw(&raw);
    let service = state.service;
    let response = run_blocking(move || service.query_by_category(&category, params)).await?;
    Ok(list_response(response))
}

/// List records within a price range
///
/// GET /items/price/{min_price}/{max_price}
pub async fn list_items_by_price_range(
    State(state): State<AppState>,
    Path((min_price, max_price)): Path<(String, String)>,
    Query(raw): Query<RawParams>,
) -> Result<Response, CatalogError> {
    let params = QueryParams::from_raw(&raw);
    let service = state.service;
    let response = run_blocking(move || {
        service.query_by_price_range(&min_price, &max_price, params)
    })
    .await?;
    Ok(list_response(response))
}

/// Records related to one record
///
/// GET /items/{item_id}/related?limit=5&sort_by=-rating,price&fields=name
pub async fn related_items(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(raw): Query<RawParams>,
) -> Result<Json<RelatedResponse>, CatalogError> {
    let params = RelatedParams::from_raw(&raw);
    let service = state.service;
    let response = run_blocking(move || service.related_records(&item_id, &params)).await?;
    Ok(Json(response))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "catalog"
    }))
}

/// Run a service call on the blocking pool
///
/// The record store lock is also held across snapshot writes, so no service
/// call is made on a runtime worker.
async fn run_blocking<T, F>(f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CatalogError::Internal(e.to_string()))?
}

fn list_response(response: PaginatedResponse) -> Response {
    let total = response.meta.pagination.total();
    ([(TOTAL_COUNT_HEADER, total.to_string())], Json(response)).into_response()
}
