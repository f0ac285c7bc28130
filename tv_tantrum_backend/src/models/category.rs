use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::filter::FilterSpec;
use super::validation::{NumberValidator, StringValidator, ValidationError, Validator};

/// 首页分类保存的筛选配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilterConfig {
    #[serde(flatten)]
    pub filters: FilterSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

/// 首页分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub filter_config: CategoryFilterConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 数据库行（filter_config 以 JSON 字符串存储）
#[derive(Debug, Clone, FromRow)]
pub struct HomepageCategoryRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub filter_config: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HomepageCategoryRow> for HomepageCategory {
    fn from(row: HomepageCategoryRow) -> Self {
        let filter_config = serde_json::from_str(&row.filter_config).unwrap_or_else(|e| {
            tracing::warn!("Invalid filter config for category {}: {}", row.id, e);
            CategoryFilterConfig::default()
        });

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            display_order: row.display_order,
            is_active: row.is_active,
            filter_config,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub filter_config: CategoryFilterConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub filter_config: Option<CategoryFilterConfig>,
}

impl HomepageCategory {
    pub fn from_create_request(request: CreateCategoryRequest) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let category = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            description: request.description.filter(|d| !d.trim().is_empty()),
            display_order: request.display_order.unwrap_or(0),
            is_active: request.is_active.unwrap_or(true),
            filter_config: request.filter_config,
            created_at: now,
            updated_at: now,
        };
        category.validate()?;
        Ok(category)
    }

    pub fn apply_update(&mut self, request: UpdateCategoryRequest) -> Result<(), ValidationError> {
        if let Some(name) = request.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = if description.trim().is_empty() { None } else { Some(description) };
        }
        if let Some(order) = request.display_order {
            self.display_order = order;
        }
        if let Some(is_active) = request.is_active {
            self.is_active = is_active;
        }
        if let Some(config) = request.filter_config {
            self.filter_config = config;
        }

        self.validate()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 筛选配置的 JSON 表示（用于入库）
    pub fn filter_config_json(&self) -> String {
        serde_json::to_string(&self.filter_config).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Validator for HomepageCategory {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        StringValidator::validate_name(&self.name)?;
        NumberValidator::validate_display_order(self.display_order)?;
        if let Some(range) = self.filter_config.filters.stimulation_score_range {
            if range.min > range.max {
                return Err(ValidationError::InvalidScoreRange(range.min, range.max));
            }
        }
        Ok(())
    }
}
