//! Health check and category listing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::models::{Category, ALL_CATEGORIES};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub practitioners: usize,
}

/// `GET /api/health`: liveness plus directory size.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        practitioners: ctx.core.directory().len(),
    })
}

/// `GET /api/categories`: every category in display order.
pub async fn categories() -> Json<Vec<Category>> {
    Json(ALL_CATEGORIES.to_vec())
}
