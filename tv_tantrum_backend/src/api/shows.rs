use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::models::{
    CreateShowRequest, FilterSpec, ShowResponse, StimulationScoreRange, ThemeMatchMode, UpdateShowRequest,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::response::{created, paginated, success, success_message};
use super::AppState;

const MAX_PAGE_SIZE: usize = 200;

/// 节目列表查询参数（与 FilterSpec 对应的扁平形式）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowListParams {
    pub age_group: Option<String>,
    pub tantrum_factor: Option<String>,
    pub search: Option<String>,
    /// 逗号分隔
    pub themes: Option<String>,
    pub theme_match_mode: Option<String>,
    pub interaction_level: Option<String>,
    pub min_stimulation_score: Option<i32>,
    pub max_stimulation_score: Option<i32>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ShowListParams {
    /// 转换为过滤条件，空字符串视为未设置
    pub fn to_filter_spec(&self) -> ApiResult<FilterSpec> {
        let theme_match_mode = match self.theme_match_mode.as_deref().filter(|m| !m.trim().is_empty()) {
            Some(mode) => mode.parse::<ThemeMatchMode>().map_err(ApiError::BadRequest)?,
            None => ThemeMatchMode::default(),
        };

        let stimulation_score_range = match (self.min_stimulation_score, self.max_stimulation_score) {
            (None, None) => None,
            (min, max) => {
                let range = StimulationScoreRange::new(min.unwrap_or(1), max.unwrap_or(5));
                if range.min > range.max {
                    return Err(ApiError::BadRequest(format!(
                        "minStimulationScore ({}) is greater than maxStimulationScore ({})",
                        range.min, range.max
                    )));
                }
                Some(range)
            }
        };

        Ok(FilterSpec {
            age_group: non_blank(&self.age_group),
            tantrum_factor: non_blank(&self.tantrum_factor),
            search: non_blank(&self.search),
            themes: self
                .themes
                .as_deref()
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            theme_match_mode,
            interaction_level: non_blank(&self.interaction_level),
            stimulation_score_range,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    /// 逗号分隔的节目ID
    pub ids: String,
}

/// 浏览节目列表
pub async fn list_shows(
    State(state): State<AppState>,
    Query(params): Query<ShowListParams>,
) -> ApiResult<impl IntoResponse> {
    let filters = params.to_filter_spec()?;
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE));
    let offset = limit.map(|l| (page - 1).saturating_mul(l)).unwrap_or(0);

    let listing = state
        .catalog
        .browse_shows(&filters, params.sort_by.as_deref(), limit, offset)
        .await?;

    let items: Vec<ShowResponse> = listing.shows.into_iter().map(ShowResponse::from).collect();
    let limit = limit.unwrap_or(listing.total);
    Ok(paginated(items, listing.total, page, limit))
}

/// 对比节目
pub async fn compare_shows(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> ApiResult<impl IntoResponse> {
    let ids: Vec<String> = params.ids.split(',').map(|id| id.trim().to_string()).collect();
    let comparison = state.catalog.compare_shows(&ids).await?;
    Ok(success(comparison))
}

/// 节目详情（记录一次浏览）
pub async fn get_show_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let show = state
        .catalog
        .get_show_detail(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Show {} not found", id)))?;

    Ok(success(ShowResponse::from(show)))
}

pub async fn create_show(
    State(state): State<AppState>,
    Json(request): Json<CreateShowRequest>,
) -> ApiResult<impl IntoResponse> {
    let show = state.catalog.create_show(request).await?;
    Ok(created(ShowResponse::from(show), "Show created"))
}

pub async fn update_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateShowRequest>,
) -> ApiResult<impl IntoResponse> {
    let show = state
        .catalog
        .update_show(&id, request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Show {} not found", id)))?;

    Ok(success(ShowResponse::from(show)))
}

pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.catalog.delete_show(&id).await? {
        return Err(ApiError::NotFound(format!("Show {} not found", id)));
    }
    Ok(success_message("Show deleted"))
}

pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.catalog.record_view(&id).await? {
        return Err(ApiError::NotFound(format!("Show {} not found", id)));
    }
    Ok(success_message("View recorded"))
}

pub async fn record_search_hit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.catalog.record_search_hit(&id).await? {
        return Err(ApiError::NotFound(format!("Show {} not found", id)));
    }
    Ok(success_message("Search hit recorded"))
}

/// 所有节目主题（去重）
pub async fn get_themes(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let themes = state.catalog.get_themes().await?;
    Ok(success(themes))
}
