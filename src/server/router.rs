//! Router builder for the catalog routes

use crate::server::handlers::{
    AppState, create_item, get_item, health_check, list_items, list_items_by_category,
    list_items_by_price_range, related_items,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the catalog routes
///
/// - POST /items - Create a record
/// - GET /items - List records (filter, sort, paginate, project, stats)
/// - GET /items/{item_id} - Get one record
/// - GET /items/{item_id}/related - Records of the same category
/// - GET /items/price/{min_price}/{max_price} - List records within a price range
/// - GET /categories/{category}/items - List records of one category
/// - GET /health, /healthz - Liveness probe
pub fn build_catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/items", post(create_item).get(list_items))
        .route("/items/{item_id}", get(get_item))
        .route("/items/{item_id}/related", get(related_items))
        .route(
            "/items/price/{min_price}/{max_price}",
            get(list_items_by_price_range),
        )
        .route("/categories/{category}/items", get(list_items_by_category))
        .with_state(state)
}
