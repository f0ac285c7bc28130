use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::models::{CreateResearchRequest, UpdateResearchRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::response::{created, success, success_message};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchListParams {
    pub category: Option<String>,
}

/// 研究摘要列表，可按分类过滤
pub async fn list_research(
    State(state): State<AppState>,
    Query(params): Query<ResearchListParams>,
) -> ApiResult<impl IntoResponse> {
    let research = state.catalog.list_research(params.category.as_deref()).await?;
    Ok(success(research))
}

pub async fn get_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let research = state
        .catalog
        .get_research(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Research summary {} not found", id)))?;

    Ok(success(research))
}

pub async fn create_research(
    State(state): State<AppState>,
    Json(request): Json<CreateResearchRequest>,
) -> ApiResult<impl IntoResponse> {
    let research = state.catalog.create_research(request).await?;
    Ok(created(research, "Research summary created"))
}

pub async fn update_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateResearchRequest>,
) -> ApiResult<impl IntoResponse> {
    let research = state
        .catalog
        .update_research(&id, request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Research summary {} not found", id)))?;

    Ok(success(research))
}

pub async fn delete_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.catalog.delete_research(&id).await? {
        return Err(ApiError::NotFound(format!("Research summary {} not found", id)));
    }
    Ok(success_message("Research summary deleted"))
}
