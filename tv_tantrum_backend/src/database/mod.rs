use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, Pool, Sqlite};
use anyhow::Result;
use std::str::FromStr;

pub mod schema;
pub mod repository;
pub mod query_builder;

pub use repository::{CatalogRepository, SqliteRepository};
pub use query_builder::ShowQueryBuilder;

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    repository: SqliteRepository,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self> {
        tracing::info!("Connecting to database: {}", database_url);

        // 配置 SQLite 连接选项
        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(30));  // 设置忙等待超时

        // SQLite 单写入者，限制为1个连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await?;

        // Run migrations
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        // Verify schema integrity
        schema::verify_schema(&pool).await?;

        let repository = SqliteRepository::new(pool.clone());

        let storage = schema::get_storage_stats(&pool).await?;
        tracing::info!(
            "Database initialized - Shows: {}, Research: {}, Categories: {}, Size: {:.2} MB",
            repository.get_show_count().await?,
            repository.get_research_count().await?,
            repository.get_category_count().await?,
            storage.size_mb()
        );

        Ok(Self { pool, repository })
    }

    pub fn repository(&self) -> &SqliteRepository {
        &self.repository
    }

    /// 数据库文件占用
    pub async fn get_storage_stats(&self) -> Result<schema::StorageStats> {
        schema::get_storage_stats(&self.pool).await
    }

    /// 验证数据库完整性
    pub async fn verify_integrity(&self) -> Result<()> {
        schema::verify_schema(&self.pool).await
    }
}
