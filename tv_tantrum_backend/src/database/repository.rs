use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use anyhow::Result;

use crate::models::{
    FilterSpec, HomepageCategory, HomepageCategoryRow, ResearchSummary, ScoreBucket, TvShow, TvShowRow,
};
use super::query_builder::ShowQueryBuilder;

/// 目录仓库接口
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // 节目操作
    async fn get_shows_prefiltered(&self, filters: &FilterSpec) -> Result<Vec<TvShow>>;
    async fn get_show_by_id(&self, id: &str) -> Result<Option<TvShow>>;
    async fn insert_show(&self, show: &TvShow) -> Result<()>;
    async fn update_show(&self, show: &TvShow) -> Result<()>;
    async fn delete_show(&self, id: &str) -> Result<bool>;
    async fn increment_view_count(&self, id: &str) -> Result<bool>;
    async fn increment_search_count(&self, id: &str) -> Result<bool>;
    async fn get_all_themes(&self) -> Result<Vec<String>>;

    // 研究摘要操作
    async fn get_research(&self, category: Option<&str>) -> Result<Vec<ResearchSummary>>;
    async fn get_research_by_id(&self, id: &str) -> Result<Option<ResearchSummary>>;
    async fn insert_research(&self, research: &ResearchSummary) -> Result<()>;
    async fn update_research(&self, research: &ResearchSummary) -> Result<()>;
    async fn delete_research(&self, id: &str) -> Result<bool>;

    // 首页分类操作
    async fn get_categories(&self) -> Result<Vec<HomepageCategory>>;
    async fn get_active_categories(&self) -> Result<Vec<HomepageCategory>>;
    async fn get_category_by_id(&self, id: &str) -> Result<Option<HomepageCategory>>;
    async fn insert_category(&self, category: &HomepageCategory) -> Result<()>;
    async fn update_category(&self, category: &HomepageCategory) -> Result<()>;
    async fn delete_category(&self, id: &str) -> Result<bool>;

    // 统计
    async fn get_show_count(&self) -> Result<i64>;
    async fn get_featured_count(&self) -> Result<i64>;
    async fn get_research_count(&self) -> Result<i64>;
    async fn get_category_count(&self) -> Result<i64>;
    async fn get_score_distribution(&self) -> Result<Vec<ScoreBucket>>;
}

/// SQLite 数据库仓库实现
#[derive(Clone)]
pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[async_trait]
impl CatalogRepository for SqliteRepository {
    async fn get_shows_prefiltered(&self, filters: &FilterSpec) -> Result<Vec<TvShow>> {
        let mut query = ShowQueryBuilder::new()
            .with_prefilter(filters)
            .with_catalog_order()
            .build();

        let rows = query
            .build_query_as::<TvShowRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TvShow::from).collect())
    }

    async fn get_show_by_id(&self, id: &str) -> Result<Option<TvShow>> {
        let row = sqlx::query_as::<_, TvShowRow>("SELECT * FROM tv_shows WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TvShow::from))
    }

    async fn insert_show(&self, show: &TvShow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tv_shows (
                id, name, description, age_range, episode_length, creator,
                release_year, end_year, stimulation_score, interactivity_level,
                dialogue_intensity, sound_effects_level, themes, overall_rating,
                image_url, available_on, is_featured, view_count, search_count,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&show.id)
        .bind(&show.name)
        .bind(&show.description)
        .bind(&show.age_range)
        .bind(show.episode_length)
        .bind(&show.creator)
        .bind(show.release_year)
        .bind(show.end_year)
        .bind(show.stimulation_score)
        .bind(&show.interactivity_level)
        .bind(&show.dialogue_intensity)
        .bind(&show.sound_effects_level)
        .bind(show.themes_json())
        .bind(show.overall_rating)
        .bind(&show.image_url)
        .bind(show.available_on_json())
        .bind(show.is_featured)
        .bind(show.view_count.unwrap_or(0))
        .bind(show.search_count.unwrap_or(0))
        .bind(show.created_at)
        .bind(show.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_show(&self, show: &TvShow) -> Result<()> {
        // 计数器由专门的接口维护，这里不覆盖
        sqlx::query(
            r#"
            UPDATE tv_shows SET
                name = ?, description = ?, age_range = ?, episode_length = ?,
                creator = ?, release_year = ?, end_year = ?, stimulation_score = ?,
                interactivity_level = ?, dialogue_intensity = ?, sound_effects_level = ?,
                themes = ?, overall_rating = ?, image_url = ?, available_on = ?,
                is_featured = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&show.name)
        .bind(&show.description)
        .bind(&show.age_range)
        .bind(show.episode_length)
        .bind(&show.creator)
        .bind(show.release_year)
        .bind(show.end_year)
        .bind(show.stimulation_score)
        .bind(&show.interactivity_level)
        .bind(&show.dialogue_intensity)
        .bind(&show.sound_effects_level)
        .bind(show.themes_json())
        .bind(show.overall_rating)
        .bind(&show.image_url)
        .bind(show.available_on_json())
        .bind(show.is_featured)
        .bind(show.updated_at)
        .bind(&show.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_show(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tv_shows WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_view_count(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE tv_shows SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_search_count(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE tv_shows SET search_count = search_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_all_themes(&self) -> Result<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT themes FROM tv_shows")
            .fetch_all(&self.pool)
            .await?;

        // 主题以 JSON 数组存储，按小写去重后排序
        let mut themes: Vec<String> = Vec::new();
        for json in rows {
            let parsed: Vec<String> = match serde_json::from_str(&json) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Skipping invalid themes JSON: {}", e);
                    continue;
                }
            };
            for theme in parsed {
                let theme = theme.trim().to_string();
                if !theme.is_empty() && !themes.iter().any(|t| t.eq_ignore_ascii_case(&theme)) {
                    themes.push(theme);
                }
            }
        }
        themes.sort_by_key(|t| t.to_lowercase());

        Ok(themes)
    }

    async fn get_research(&self, category: Option<&str>) -> Result<Vec<ResearchSummary>> {
        let research = match category.filter(|c| !c.trim().is_empty()) {
            Some(category) => {
                sqlx::query_as::<_, ResearchSummary>(
                    "SELECT * FROM research_summaries WHERE category = ? COLLATE NOCASE ORDER BY created_at DESC"
                )
                .bind(category.trim())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ResearchSummary>(
                    "SELECT * FROM research_summaries ORDER BY created_at DESC"
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(research)
    }

    async fn get_research_by_id(&self, id: &str) -> Result<Option<ResearchSummary>> {
        let research = sqlx::query_as::<_, ResearchSummary>("SELECT * FROM research_summaries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(research)
    }

    async fn insert_research(&self, research: &ResearchSummary) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO research_summaries (
                id, title, category, summary, full_text, original_study_title,
                authors, publication_year, source_url, headline, sub_headline,
                key_findings, image_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&research.id)
        .bind(&research.title)
        .bind(&research.category)
        .bind(&research.summary)
        .bind(&research.full_text)
        .bind(&research.original_study_title)
        .bind(&research.authors)
        .bind(research.publication_year)
        .bind(&research.source_url)
        .bind(&research.headline)
        .bind(&research.sub_headline)
        .bind(&research.key_findings)
        .bind(&research.image_url)
        .bind(research.created_at)
        .bind(research.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_research(&self, research: &ResearchSummary) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE research_summaries SET
                title = ?, category = ?, summary = ?, full_text = ?,
                original_study_title = ?, authors = ?, publication_year = ?,
                source_url = ?, headline = ?, sub_headline = ?, key_findings = ?,
                image_url = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&research.title)
        .bind(&research.category)
        .bind(&research.summary)
        .bind(&research.full_text)
        .bind(&research.original_study_title)
        .bind(&research.authors)
        .bind(research.publication_year)
        .bind(&research.source_url)
        .bind(&research.headline)
        .bind(&research.sub_headline)
        .bind(&research.key_findings)
        .bind(&research.image_url)
        .bind(research.updated_at)
        .bind(&research.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_research(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM research_summaries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_categories(&self) -> Result<Vec<HomepageCategory>> {
        let rows = sqlx::query_as::<_, HomepageCategoryRow>(
            "SELECT * FROM homepage_categories ORDER BY display_order ASC, name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HomepageCategory::from).collect())
    }

    async fn get_active_categories(&self) -> Result<Vec<HomepageCategory>> {
        let rows = sqlx::query_as::<_, HomepageCategoryRow>(
            "SELECT * FROM homepage_categories WHERE is_active = 1 ORDER BY display_order ASC, name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HomepageCategory::from).collect())
    }

    async fn get_category_by_id(&self, id: &str) -> Result<Option<HomepageCategory>> {
        let row = sqlx::query_as::<_, HomepageCategoryRow>("SELECT * FROM homepage_categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(HomepageCategory::from))
    }

    async fn insert_category(&self, category: &HomepageCategory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO homepage_categories (
                id, name, description, display_order, is_active, filter_config,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.display_order)
        .bind(category.is_active)
        .bind(category.filter_config_json())
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_category(&self, category: &HomepageCategory) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE homepage_categories SET
                name = ?, description = ?, display_order = ?, is_active = ?,
                filter_config = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.display_order)
        .bind(category.is_active)
        .bind(category.filter_config_json())
        .bind(category.updated_at)
        .bind(&category.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM homepage_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_show_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM tv_shows").await
    }

    async fn get_featured_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM tv_shows WHERE is_featured = 1").await
    }

    async fn get_research_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM research_summaries").await
    }

    async fn get_category_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM homepage_categories").await
    }

    async fn get_score_distribution(&self) -> Result<Vec<ScoreBucket>> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT stimulation_score, COUNT(*) FROM tv_shows GROUP BY stimulation_score ORDER BY stimulation_score"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(stimulation_score, count)| ScoreBucket { stimulation_score, count })
            .collect())
    }
}
