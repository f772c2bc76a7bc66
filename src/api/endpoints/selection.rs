//! Selection state endpoints. Every mutation answers with the new
//! selection and the recomputed view.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::practitioners::parse_category;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::filter::FilterSummary;
use crate::selection::SelectionState;

#[derive(Serialize)]
pub struct SelectionResponse {
    pub selection: SelectionState,
    pub view: FilterSummary,
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: String,
}

fn respond(ctx: &ApiContext) -> Result<Json<SelectionResponse>, ApiError> {
    let selection = ctx.core.selection()?;
    let view = ctx
        .core
        .view(selection.active_category, &selection.search_text);
    Ok(Json(SelectionResponse { selection, view }))
}

/// `GET /api/selection`
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<SelectionResponse>, ApiError> {
    respond(&ctx)
}

/// `PUT /api/selection/category`
pub async fn set_category(
    State(ctx): State<ApiContext>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let category = parse_category(&body.category)?;
    ctx.core.write_selection()?.select_category(category);
    respond(&ctx)
}

/// `PUT /api/selection/search`
pub async fn set_search(
    State(ctx): State<ApiContext>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    ctx.core.write_selection()?.set_search(&body.text);
    respond(&ctx)
}

/// `POST /api/selection/clear`
pub async fn clear(State(ctx): State<ApiContext>) -> Result<Json<SelectionResponse>, ApiError> {
    ctx.core.write_selection()?.clear_filters();
    respond(&ctx)
}
