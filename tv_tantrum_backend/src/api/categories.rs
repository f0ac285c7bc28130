use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::models::{CreateCategoryRequest, ShowResponse, UpdateCategoryRequest};
use crate::api::error::ApiResult;
use crate::api_error;
use crate::api::response::{created, success, success_message};
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    /// 为 true 时包含未启用的分类
    #[serde(default)]
    pub all: bool,
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> ApiResult<impl IntoResponse> {
    let categories = state.catalog.list_categories(params.all).await?;
    Ok(success(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .catalog
        .get_category(&id)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("Category {} not found", id)))?;

    Ok(success(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let category = state.catalog.create_category(request).await?;
    Ok(created(category, "Category created"))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .catalog
        .update_category(&id, request)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("Category {} not found", id)))?;

    Ok(success(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.catalog.delete_category(&id).await? {
        return Err(api_error!(NotFound, format!("Category {} not found", id)));
    }
    Ok(success_message("Category deleted"))
}

/// 按分类筛选配置返回节目
pub async fn get_category_shows(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let shows = state
        .catalog
        .get_category_shows(&id)
        .await?
        .ok_or_else(|| api_error!(NotFound, format!("Category {} not found", id)))?;

    let items: Vec<ShowResponse> = shows.into_iter().map(ShowResponse::from).collect();
    Ok(success(items))
}
