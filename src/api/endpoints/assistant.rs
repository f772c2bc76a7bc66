//! Symptom assistant endpoints.
//!
//! - `POST /api/assistant/open` / `close`: dialog lifecycle
//! - `POST /api/assistant/recommend`: classify and reconcile
//! - `GET /api/assistant/status`: language model reachability

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::selection::{ClassificationOutcome, SelectionState};

#[derive(Serialize)]
pub struct DialogResponse {
    pub selection: SelectionState,
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub symptoms: String,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub outcome: ClassificationOutcome,
    pub selection: SelectionState,
}

#[derive(Serialize)]
pub struct AssistantStatus {
    pub reachable: bool,
    pub model: String,
}

/// `POST /api/assistant/open`
pub async fn open(State(ctx): State<ApiContext>) -> Result<Json<DialogResponse>, ApiError> {
    ctx.core.write_selection()?.open_assistant();
    Ok(Json(DialogResponse {
        selection: ctx.core.selection()?,
    }))
}

/// `POST /api/assistant/close`
pub async fn close(State(ctx): State<ApiContext>) -> Result<Json<DialogResponse>, ApiError> {
    ctx.core.write_selection()?.close_assistant();
    Ok(Json(DialogResponse {
        selection: ctx.core.selection()?,
    }))
}

/// `POST /api/assistant/recommend`
pub async fn recommend(
    State(ctx): State<ApiContext>,
    Json(body): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    if body.symptoms.trim().is_empty() {
        return Err(ApiError::BadRequest("Describe your symptoms first".into()));
    }

    let outcome = ctx.core.recommend(&body.symptoms).await?;
    Ok(Json(RecommendResponse {
        outcome,
        selection: ctx.core.selection()?,
    }))
}

/// `GET /api/assistant/status`
pub async fn status(State(ctx): State<ApiContext>) -> Json<AssistantStatus> {
    let gateway = ctx.core.gateway();
    Json(AssistantStatus {
        reachable: gateway.is_reachable().await,
        model: gateway.model().to_string(),
    })
}
