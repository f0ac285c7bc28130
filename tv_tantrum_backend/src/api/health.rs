use axum::{
    extract::State,
    response::IntoResponse,
};
use serde_json::json;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::response::success;

/// 健康检查端点
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    // 检查数据库连接
    state.database.verify_integrity().await
        .map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            ApiError::Internal("Database connection failed".to_string())
        })?;

    Ok(success(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": "connected"
    })))
}

/// 获取目录统计信息
pub async fn get_stats(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let stats = state.catalog.get_statistics().await
        .map_err(|e| {
            tracing::error!("Failed to get statistics: {}", e);
            ApiError::Internal("Failed to retrieve statistics".to_string())
        })?;

    let storage = state.database.get_storage_stats().await
        .map_err(|e| ApiError::Internal(format!("Failed to get database stats: {}", e)))?;

    let cache_stats = state.catalog.cache_stats();

    Ok(success(json!({
        "show_count": stats.total_shows,
        "featured_count": stats.featured_shows,
        "research_count": stats.total_research,
        "category_count": stats.total_categories,
        "score_distribution": stats.score_distribution,
        "database_size_mb": storage.size_mb(),
        "query_cache": cache_stats,
        "compare_max_shows": state.config.compare_max_shows,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// 清空查询缓存
pub async fn clear_cache(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    state.catalog.show_cache().invalidate_all();
    tracing::info!("Query cache cleared on request");

    Ok(success(json!({
        "message": "Query cache cleared",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
