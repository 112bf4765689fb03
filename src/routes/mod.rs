use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::{AdmissionRepository, ProfileRepository},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
};

pub mod recommendations;

/// Shared, read-only application state
///
/// Holds only the data-access collaborators; every request computes its
/// recommendations from freshly fetched rows.
pub struct AppState {
    pub admissions: Arc<dyn AdmissionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl AppState {
    pub fn new(
        admissions: Arc<dyn AdmissionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            admissions,
            profiles,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
