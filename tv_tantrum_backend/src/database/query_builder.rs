use crate::models::FilterSpec;
use crate::services::labels::score_for_tantrum_factor;
use sqlx::{QueryBuilder, Sqlite};

/// 节目预筛选查询构建器
///
/// 只处理数值列（刺激分数范围、发脾气指数），其余条件交给内存过滤引擎。
/// 预筛选只会缩小候选集，不会改变最终结果。
pub struct ShowQueryBuilder {
    query: QueryBuilder<'static, Sqlite>,
    has_where: bool,
}

impl ShowQueryBuilder {
    pub fn new() -> Self {
        let query = QueryBuilder::new("SELECT * FROM tv_shows");
        Self {
            query,
            has_where: false,
        }
    }

    pub fn with_prefilter(mut self, filters: &FilterSpec) -> Self {
        // 刺激分数范围
        if let Some(range) = filters.stimulation_score_range {
            self.add_where_clause();
            self.query.push("stimulation_score BETWEEN ");
            self.query.push_bind(range.min);
            self.query.push(" AND ");
            self.query.push_bind(range.max);
        }

        // 已知的发脾气指数标签对应唯一分数
        if let Some(score) = filters
            .tantrum_factor
            .as_deref()
            .and_then(score_for_tantrum_factor)
        {
            self.add_where_clause();
            self.query.push("stimulation_score = ");
            self.query.push_bind(score);
        }

        self
    }

    /// 按插入顺序返回，保证未排序时结果稳定
    pub fn with_catalog_order(mut self) -> Self {
        self.query.push(" ORDER BY created_at ASC, rowid ASC");
        self
    }

    pub fn build(self) -> QueryBuilder<'static, Sqlite> {
        self.query
    }

    fn add_where_clause(&mut self) {
        if !self.has_where {
            self.query.push(" WHERE ");
            self.has_where = true;
        } else {
            self.query.push(" AND ");
        }
    }
}

impl Default for ShowQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
