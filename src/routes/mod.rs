use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{response::ErrorBody, state::AppState};

pub mod auth;
pub mod categories;
pub mod doc;
pub mod health;
pub mod orders;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/tokens", auth::router())
        .route("/user", get(auth::me))
        .nest("/category", categories::router())
        .nest("/product", products::router())
        .nest("/orders", orders::router())
}

/// Full application: health, `/api`, stored images, docs and a JSON 404 fallback.
pub fn create_app(state: AppState) -> Router {
    let images = ServeDir::new(state.images.root());
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest_service("/category-images", images)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    tracing::debug!(path = %uri.path(), "no route");
    (StatusCode::NOT_FOUND, Json(ErrorBody::message("Not Found")))
}
