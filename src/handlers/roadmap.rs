//! Roadmap API Handler
//!
//! JSON endpoint for programmatic clients; the HTML page uses `pages`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{RoadmapData, SearchRequest};
use crate::utils::ApiResult;

/// Generate a learning roadmap
/// POST /api/roadmap
#[utoipa::path(
    post,
    path = "/api/roadmap",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Validated three-level roadmap", body = RoadmapData),
        (status = 400, description = "Malformed body, empty or overlong query"),
        (status = 429, description = "Model API rate limited"),
        (status = 502, description = "Model call failed or returned an unusable response"),
        (status = 504, description = "Model call timed out")
    ),
    tag = "Roadmap"
)]
pub async fn generate_roadmap(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<RoadmapData>> {
    let Json(req) = payload?;
    let request = req.normalized()?;
    let data = state.roadmap_service.generate_roadmap(&request).await?;
    Ok(Json(data))
}
