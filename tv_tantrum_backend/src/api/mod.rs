pub mod categories;
pub mod error;
pub mod health;
pub mod research;
pub mod response;
pub mod shows;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::AppConfig, database::Database, services::CatalogService};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub catalog: Arc<CatalogService>,
    pub config: Arc<AppConfig>,
}

/// 构建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "TV Tantrum Backend API v1.0" }))
        // Health and stats
        .route("/api/health", get(health::health_check))
        .route("/api/stats", get(health::get_stats))
        .route("/api/cache/clear", post(health::clear_cache))
        // Shows
        .route("/api/tv-shows", get(shows::list_shows).post(shows::create_show))
        .route("/api/tv-shows/compare", get(shows::compare_shows))
        .route(
            "/api/tv-shows/:id",
            get(shows::get_show_detail)
                .put(shows::update_show)
                .delete(shows::delete_show),
        )
        .route("/api/tv-shows/:id/view", post(shows::record_view))
        .route("/api/tv-shows/:id/search-hit", post(shows::record_search_hit))
        .route("/api/themes", get(shows::get_themes))
        // Research
        .route("/api/research", get(research::list_research).post(research::create_research))
        .route(
            "/api/research/:id",
            get(research::get_research)
                .put(research::update_research)
                .delete(research::delete_research),
        )
        // Homepage categories
        .route(
            "/api/homepage-categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/homepage-categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/api/homepage-categories/:id/shows", get(categories::get_category_shows))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
