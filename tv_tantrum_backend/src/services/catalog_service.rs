use std::sync::Arc;
use anyhow::Result;

use crate::database::CatalogRepository;
use crate::models::{
    CatalogStatistics, CompareResponse, CreateCategoryRequest, CreateResearchRequest, CreateShowRequest,
    FilterSpec, HomepageCategory, ResearchSummary, TvShow, UpdateCategoryRequest, UpdateResearchRequest,
    UpdateShowRequest, ValidationError,
};
use crate::services::labels::score_for_tantrum_factor;
use crate::services::query_cache::{QueryCache, QueryCacheConfig, QueryCacheStats};
use crate::services::show_filter::filter_shows;
use crate::services::show_sort::sort_shows;

/// 一页节目列表
#[derive(Debug, Clone)]
pub struct ShowPage {
    pub shows: Vec<TvShow>,
    /// 过滤后的总数（分页前）
    pub total: usize,
}

/// 目录服务层，封装业务逻辑
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
    show_cache: QueryCache<Arc<Vec<TvShow>>>,
    compare_max_shows: usize,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        cache_config: QueryCacheConfig,
        compare_max_shows: usize,
    ) -> Self {
        Self {
            repository,
            show_cache: QueryCache::new(cache_config),
            compare_max_shows,
        }
    }

    pub fn show_cache(&self) -> &QueryCache<Arc<Vec<TvShow>>> {
        &self.show_cache
    }

    /// 预筛选后的候选节目（带缓存）
    async fn load_candidates(&self, filters: &FilterSpec) -> Result<Arc<Vec<TvShow>>> {
        let key = prefilter_key(filters);
        let repository = &self.repository;
        self.show_cache
            .get_or_load(&key, || async move {
                let shows = repository.get_shows_prefiltered(filters).await?;
                Ok(Arc::new(shows))
            })
            .await
    }

    /// 过滤并排序节目
    pub async fn list_shows(&self, filters: &FilterSpec, sort_by: Option<&str>) -> Result<Vec<TvShow>> {
        let candidates = self.load_candidates(filters).await?;
        let filtered = filter_shows(&candidates, filters);
        Ok(sort_shows(&filtered, sort_by))
    }

    /// 浏览节目：过滤、排序后分页
    pub async fn browse_shows(
        &self,
        filters: &FilterSpec,
        sort_by: Option<&str>,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<ShowPage> {
        let shows = self.list_shows(filters, sort_by).await?;
        let total = shows.len();
        let page: Vec<TvShow> = match limit {
            Some(limit) => shows.into_iter().skip(offset).take(limit).collect(),
            None => shows.into_iter().skip(offset).collect(),
        };

        tracing::debug!("Browse returned {} of {} shows", page.len(), total);
        Ok(ShowPage { shows: page, total })
    }

    /// 获取节目详情并记录一次浏览
    pub async fn get_show_detail(&self, id: &str) -> Result<Option<TvShow>> {
        if !self.repository.increment_view_count(id).await? {
            return Ok(None);
        }
        self.repository.get_show_by_id(id).await
    }

    pub async fn get_show(&self, id: &str) -> Result<Option<TvShow>> {
        self.repository.get_show_by_id(id).await
    }

    /// 记录浏览，节目不存在时返回 false
    pub async fn record_view(&self, id: &str) -> Result<bool> {
        self.repository.increment_view_count(id).await
    }

    /// 记录搜索命中，节目不存在时返回 false
    pub async fn record_search_hit(&self, id: &str) -> Result<bool> {
        self.repository.increment_search_count(id).await
    }

    /// 对比多个节目
    pub async fn compare_shows(&self, ids: &[String]) -> Result<CompareResponse> {
        let mut unique: Vec<&str> = Vec::new();
        for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        if unique.is_empty() {
            return Err(ValidationError::EmptyComparison.into());
        }
        if unique.len() > self.compare_max_shows {
            return Err(ValidationError::TooManyComparedShows(unique.len(), self.compare_max_shows).into());
        }

        let mut shows = Vec::with_capacity(unique.len());
        let mut missing_ids = Vec::new();
        for id in unique {
            match self.repository.get_show_by_id(id).await? {
                Some(show) => shows.push(show),
                None => missing_ids.push(id.to_string()),
            }
        }

        // 分数相同时取先出现的
        let calmest_id = shows
            .iter()
            .fold(None::<&TvShow>, |best, show| match best {
                Some(b) if b.stimulation_score <= show.stimulation_score => Some(b),
                _ => Some(show),
            })
            .map(|show| show.id.clone());

        Ok(CompareResponse {
            shows: shows.into_iter().map(Into::into).collect(),
            missing_ids,
            calmest_id,
        })
    }

    /// 创建节目
    pub async fn create_show(&self, request: CreateShowRequest) -> Result<TvShow> {
        let show = TvShow::from_create_request(request)?;
        self.repository.insert_show(&show).await?;
        self.show_cache.invalidate_all();

        tracing::info!("Created show {} ({})", show.name, show.id);
        Ok(show)
    }

    /// 更新节目，不存在时返回 None
    pub async fn update_show(&self, id: &str, request: UpdateShowRequest) -> Result<Option<TvShow>> {
        let mut show = match self.repository.get_show_by_id(id).await? {
            Some(show) => show,
            None => return Ok(None),
        };

        show.apply_update(request)?;
        self.repository.update_show(&show).await?;
        self.show_cache.invalidate_all();

        Ok(Some(show))
    }

    /// 删除节目
    pub async fn delete_show(&self, id: &str) -> Result<bool> {
        let deleted = self.repository.delete_show(id).await?;
        if deleted {
            self.show_cache.invalidate_all();
            tracing::info!("Deleted show {}", id);
        }
        Ok(deleted)
    }

    pub async fn get_themes(&self) -> Result<Vec<String>> {
        self.repository.get_all_themes().await
    }

    pub async fn list_research(&self, category: Option<&str>) -> Result<Vec<ResearchSummary>> {
        self.repository.get_research(category).await
    }

    pub async fn get_research(&self, id: &str) -> Result<Option<ResearchSummary>> {
        self.repository.get_research_by_id(id).await
    }

    pub async fn create_research(&self, request: CreateResearchRequest) -> Result<ResearchSummary> {
        let research = ResearchSummary::from_create_request(request)?;
        self.repository.insert_research(&research).await?;
        Ok(research)
    }

    pub async fn update_research(&self, id: &str, request: UpdateResearchRequest) -> Result<Option<ResearchSummary>> {
        let mut research = match self.repository.get_research_by_id(id).await? {
            Some(research) => research,
            None => return Ok(None),
        };

        research.apply_update(request)?;
        self.repository.update_research(&research).await?;
        Ok(Some(research))
    }

    pub async fn delete_research(&self, id: &str) -> Result<bool> {
        self.repository.delete_research(id).await
    }

    /// 首页分类列表，`include_inactive` 为 false 时只返回启用的分类
    pub async fn list_categories(&self, include_inactive: bool) -> Result<Vec<HomepageCategory>> {
        if include_inactive {
            self.repository.get_categories().await
        } else {
            self.repository.get_active_categories().await
        }
    }

    pub async fn get_category(&self, id: &str) -> Result<Option<HomepageCategory>> {
        self.repository.get_category_by_id(id).await
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<HomepageCategory> {
        let category = HomepageCategory::from_create_request(request)?;
        self.repository.insert_category(&category).await?;
        Ok(category)
    }

    pub async fn update_category(&self, id: &str, request: UpdateCategoryRequest) -> Result<Option<HomepageCategory>> {
        let mut category = match self.repository.get_category_by_id(id).await? {
            Some(category) => category,
            None => return Ok(None),
        };

        category.apply_update(request)?;
        self.repository.update_category(&category).await?;
        Ok(Some(category))
    }

    pub async fn delete_category(&self, id: &str) -> Result<bool> {
        self.repository.delete_category(id).await
    }

    /// 按分类保存的筛选配置解析出节目
    pub async fn get_category_shows(&self, id: &str) -> Result<Option<Vec<TvShow>>> {
        let category = match self.repository.get_category_by_id(id).await? {
            Some(category) => category,
            None => return Ok(None),
        };

        let config = &category.filter_config;
        let shows = self.list_shows(&config.filters, config.sort_by.as_deref()).await?;
        Ok(Some(shows))
    }

    /// 获取统计信息
    pub async fn get_statistics(&self) -> Result<CatalogStatistics> {
        Ok(CatalogStatistics {
            total_shows: self.repository.get_show_count().await?,
            total_research: self.repository.get_research_count().await?,
            total_categories: self.repository.get_category_count().await?,
            featured_shows: self.repository.get_featured_count().await?,
            score_distribution: self.repository.get_score_distribution().await?,
        })
    }

    pub fn cache_stats(&self) -> QueryCacheStats {
        self.show_cache.stats()
    }
}

/// 缓存键只取决于会下推到 SQL 的条件
fn prefilter_key(filters: &FilterSpec) -> String {
    let range = filters
        .stimulation_score_range
        .map(|r| format!("{}-{}", r.min, r.max))
        .unwrap_or_else(|| "*".to_string());
    let score = filters
        .tantrum_factor
        .as_deref()
        .and_then(score_for_tantrum_factor)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "*".to_string());
    format!("shows:range={}:score={}", range, score)
}
