//! Practitioner listing.
//!
//! - `GET /api/practitioners`: visible subset for the session selection,
//!   or for `category` / `q` query overrides (state is not mutated)
//! - `GET /api/practitioners/:id`: single record

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::filter::FilterSummary;
use crate::models::{Category, PractitionerRecord};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

pub(crate) fn parse_category(label: &str) -> Result<Category, ApiError> {
    Category::from_str(label).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// `GET /api/practitioners`
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<FilterSummary>, ApiError> {
    if query.category.is_none() && query.q.is_none() {
        return Ok(Json(ctx.core.current_view()?));
    }

    let current = ctx.core.selection()?;
    let category = match query.category.as_deref() {
        Some(label) => parse_category(label)?,
        None => current.active_category,
    };
    let search = query.q.unwrap_or(current.search_text);

    Ok(Json(ctx.core.view(category, &search)))
}

/// `GET /api/practitioners/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<PractitionerRecord>, ApiError> {
    ctx.core
        .directory()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("practitioner {id}")))
}
