use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tv_tantrum_backend::api;
use tv_tantrum_backend::config::AppConfig;
use tv_tantrum_backend::database::Database;
use tv_tantrum_backend::services::{CacheMaintenanceTask, CatalogService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 需在订阅器读取 RUST_LOG 之前加载
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // Initialize database
    let database = Database::connect(&config.database_url).await?;

    // Initialize catalog service
    let repository = Arc::new(database.repository().clone());
    let catalog = Arc::new(CatalogService::new(
        repository,
        config.query_cache.clone(),
        config.compare_max_shows,
    ));

    // Start cache maintenance task
    let maintenance_task = CacheMaintenanceTask::new(
        catalog.show_cache().clone(),
        Duration::from_secs(60), // 每分钟执行一次
    );
    tokio::spawn(maintenance_task.start());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let app = api::create_router(api::AppState {
        database: database.clone(),
        catalog,
        config: Arc::new(config.clone()),
    });

    tracing::info!("🚀 Server listening on {}", addr);
    tracing::info!(
        "📊 Query cache ready (ttl: {}s, capacity: {})",
        config.query_cache.ttl.as_secs(),
        config.query_cache.max_capacity
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
