use sqlx::{Pool, Sqlite};
use anyhow::Result;

/// 启动时必须存在的 schema 对象 (类型, 名称)
const REQUIRED_OBJECTS: &[(&str, &str)] = &[
    ("table", "tv_shows"),
    ("table", "research_summaries"),
    ("table", "homepage_categories"),
    ("index", "idx_shows_name"),
    ("index", "idx_shows_stimulation"),
    ("index", "idx_shows_featured"),
    ("index", "idx_research_category"),
    ("index", "idx_categories_order"),
];

/// 检查迁移后的表与索引，一次报告全部缺失项
pub async fn verify_schema(pool: &Pool<Sqlite>) -> Result<()> {
    let mut missing = Vec::new();

    for (kind, name) in REQUIRED_OBJECTS {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = ? AND name = ?")
                .bind(kind)
                .bind(name)
                .fetch_optional(pool)
                .await?;

        if found.is_none() {
            missing.push(format!("{} '{}'", kind, name));
        }
    }

    if !missing.is_empty() {
        anyhow::bail!("Catalog schema is incomplete, missing: {}", missing.join(", "));
    }

    tracing::debug!("Catalog schema verified ({} objects)", REQUIRED_OBJECTS.len());
    Ok(())
}

/// SQLite 文件占用（行数统计由仓库负责）
#[derive(Debug, Clone, Copy)]
pub struct StorageStats {
    pub page_count: i64,
    pub page_size: i64,
}

impl StorageStats {
    pub fn size_bytes(&self) -> i64 {
        self.page_count * self.page_size
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes() as f64 / (1024.0 * 1024.0)
    }
}

pub async fn get_storage_stats(pool: &Pool<Sqlite>) -> Result<StorageStats> {
    let (page_count, page_size): (i64, i64) =
        sqlx::query_as("SELECT page_count, page_size FROM pragma_page_count(), pragma_page_size()")
            .fetch_one(pool)
            .await?;

    Ok(StorageStats { page_count, page_size })
}
