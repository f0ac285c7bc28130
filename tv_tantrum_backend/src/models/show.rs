use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::level::Level;
use super::validation::{CollectionValidator, NumberValidator, StringValidator, ValidationError, Validator};

/// 儿童电视节目
///
/// 过滤引擎和排序器只读取此结构，不做任何修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvShow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub age_range: Option<String>,
    pub episode_length: Option<i32>,
    pub creator: Option<String>,
    pub release_year: Option<i32>,
    pub end_year: Option<i32>,
    pub stimulation_score: i32,
    pub interactivity_level: Option<String>,
    pub dialogue_intensity: Option<String>,
    pub sound_effects_level: Option<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub overall_rating: f64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub available_on: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub view_count: Option<i64>,
    pub search_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 数据库行（themes / available_on 以 JSON 字符串存储）
#[derive(Debug, Clone, FromRow)]
pub struct TvShowRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub age_range: Option<String>,
    pub episode_length: Option<i32>,
    pub creator: Option<String>,
    pub release_year: Option<i32>,
    pub end_year: Option<i32>,
    pub stimulation_score: i32,
    pub interactivity_level: Option<String>,
    pub dialogue_intensity: Option<String>,
    pub sound_effects_level: Option<String>,
    pub themes: String, // JSON array as string
    pub overall_rating: f64,
    pub image_url: Option<String>,
    pub available_on: String, // JSON array as string
    pub is_featured: bool,
    pub view_count: i64,
    pub search_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TvShowRow> for TvShow {
    fn from(row: TvShowRow) -> Self {
        let themes = serde_json::from_str(&row.themes).unwrap_or_else(|e| {
            tracing::warn!("Invalid themes JSON for show {}: {}", row.id, e);
            Vec::new()
        });
        let available_on = serde_json::from_str(&row.available_on).unwrap_or_default();

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            age_range: row.age_range,
            episode_length: row.episode_length,
            creator: row.creator,
            release_year: row.release_year,
            end_year: row.end_year,
            stimulation_score: row.stimulation_score,
            interactivity_level: row.interactivity_level,
            dialogue_intensity: row.dialogue_intensity,
            sound_effects_level: row.sound_effects_level,
            themes,
            overall_rating: row.overall_rating,
            image_url: row.image_url,
            available_on,
            is_featured: row.is_featured,
            view_count: Some(row.view_count),
            search_count: Some(row.search_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowRequest {
    pub name: String,
    pub description: Option<String>,
    pub age_range: Option<String>,
    pub episode_length: Option<i32>,
    pub creator: Option<String>,
    pub release_year: Option<i32>,
    pub end_year: Option<i32>,
    pub stimulation_score: i32,
    pub interactivity_level: Option<String>,
    pub dialogue_intensity: Option<String>,
    pub sound_effects_level: Option<String>,
    pub themes: Option<Vec<String>>,
    pub overall_rating: Option<f64>,
    pub image_url: Option<String>,
    pub available_on: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShowRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub age_range: Option<String>,
    pub episode_length: Option<i32>,
    pub creator: Option<String>,
    pub release_year: Option<i32>,
    pub end_year: Option<i32>,
    pub stimulation_score: Option<i32>,
    pub interactivity_level: Option<String>,
    pub dialogue_intensity: Option<String>,
    pub sound_effects_level: Option<String>,
    pub themes: Option<Vec<String>>,
    pub overall_rating: Option<f64>,
    pub image_url: Option<String>,
    pub available_on: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

/// 空字符串视为清空
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// 等级文本在入库时归一化
fn canonical_level(value: String) -> Option<String> {
    non_blank(value).map(|v| Level::canonicalize(&v))
}

impl TvShow {
    /// 创建新节目
    pub fn new(name: String, stimulation_score: i32) -> Result<Self, ValidationError> {
        StringValidator::validate_name(&name)?;
        NumberValidator::validate_stimulation_score(stimulation_score)?;

        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: String::new(),
            age_range: None,
            episode_length: None,
            creator: None,
            release_year: None,
            end_year: None,
            stimulation_score,
            interactivity_level: None,
            dialogue_intensity: None,
            sound_effects_level: None,
            themes: Vec::new(),
            overall_rating: 0.0,
            image_url: None,
            available_on: Vec::new(),
            is_featured: false,
            view_count: Some(0),
            search_count: Some(0),
            created_at: now,
            updated_at: now,
        })
    }

    /// 从创建请求构建节目
    pub fn from_create_request(request: CreateShowRequest) -> Result<Self, ValidationError> {
        let mut show = Self::new(request.name, request.stimulation_score)?;

        if let Some(description) = request.description {
            show.set_description(description)?;
        }
        show.age_range = request.age_range.and_then(non_blank);
        if let Some(minutes) = request.episode_length {
            show.set_episode_length(Some(minutes))?;
        }
        show.creator = request.creator.and_then(non_blank);
        show.set_years(request.release_year, request.end_year)?;

        show.interactivity_level = request.interactivity_level.and_then(canonical_level);
        show.dialogue_intensity = request.dialogue_intensity.and_then(canonical_level);
        show.sound_effects_level = request.sound_effects_level.and_then(canonical_level);

        if let Some(themes) = request.themes {
            show.set_themes(&themes)?;
        }
        if let Some(rating) = request.overall_rating {
            show.set_overall_rating(rating)?;
        }
        if let Some(image_url) = request.image_url {
            show.set_image_url(non_blank(image_url))?;
        }
        if let Some(platforms) = request.available_on {
            show.available_on = platforms.into_iter().filter_map(non_blank).collect();
        }
        show.is_featured = request.is_featured.unwrap_or(false);

        Ok(show)
    }

    /// 应用更新请求
    pub fn apply_update(&mut self, request: UpdateShowRequest) -> Result<(), ValidationError> {
        if let Some(name) = request.name {
            StringValidator::validate_name(&name)?;
            self.name = name;
        }

        if let Some(description) = request.description {
            self.set_description(description)?;
        }

        if let Some(age_range) = request.age_range {
            self.age_range = non_blank(age_range);
        }

        if let Some(minutes) = request.episode_length {
            self.set_episode_length(Some(minutes))?;
        }

        if let Some(creator) = request.creator {
            self.creator = non_blank(creator);
        }

        if request.release_year.is_some() || request.end_year.is_some() {
            let release = request.release_year.or(self.release_year);
            let end = request.end_year.or(self.end_year);
            self.set_years(release, end)?;
        }

        if let Some(score) = request.stimulation_score {
            NumberValidator::validate_stimulation_score(score)?;
            self.stimulation_score = score;
        }

        if let Some(level) = request.interactivity_level {
            self.interactivity_level = canonical_level(level);
        }

        if let Some(level) = request.dialogue_intensity {
            self.dialogue_intensity = canonical_level(level);
        }

        if let Some(level) = request.sound_effects_level {
            self.sound_effects_level = canonical_level(level);
        }

        if let Some(themes) = request.themes {
            self.set_themes(&themes)?;
        }

        if let Some(rating) = request.overall_rating {
            self.set_overall_rating(rating)?;
        }

        if let Some(image_url) = request.image_url {
            self.set_image_url(non_blank(image_url))?;
        }

        if let Some(platforms) = request.available_on {
            self.available_on = platforms.into_iter().filter_map(non_blank).collect();
        }

        if let Some(is_featured) = request.is_featured {
            self.is_featured = is_featured;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_description(&mut self, description: String) -> Result<(), ValidationError> {
        StringValidator::validate_description(&description)?;
        self.description = description;
        Ok(())
    }

    pub fn set_episode_length(&mut self, minutes: Option<i32>) -> Result<(), ValidationError> {
        NumberValidator::validate_episode_length(&minutes)?;
        self.episode_length = minutes;
        Ok(())
    }

    /// 设置播出年份（结束年份不能早于开播年份）
    pub fn set_years(&mut self, release_year: Option<i32>, end_year: Option<i32>) -> Result<(), ValidationError> {
        NumberValidator::validate_year(&release_year)?;
        NumberValidator::validate_year(&end_year)?;
        if let (Some(start), Some(end)) = (release_year, end_year) {
            if end < start {
                return Err(ValidationError::InvalidYearRange(start, end));
            }
        }
        self.release_year = release_year;
        self.end_year = end_year;
        Ok(())
    }

    /// 设置主题（去空白、去重，保留原始顺序）
    pub fn set_themes(&mut self, themes: &[String]) -> Result<(), ValidationError> {
        let mut cleaned: Vec<String> = Vec::with_capacity(themes.len());
        for theme in themes {
            let theme = theme.trim();
            if theme.is_empty() {
                continue;
            }
            if !cleaned.iter().any(|t| t.eq_ignore_ascii_case(theme)) {
                cleaned.push(theme.to_string());
            }
        }
        CollectionValidator::validate_themes(&cleaned)?;
        self.themes = cleaned;
        Ok(())
    }

    pub fn set_overall_rating(&mut self, rating: f64) -> Result<(), ValidationError> {
        NumberValidator::validate_overall_rating(rating)?;
        self.overall_rating = rating;
        Ok(())
    }

    pub fn set_image_url(&mut self, url: Option<String>) -> Result<(), ValidationError> {
        StringValidator::validate_url(&url)?;
        self.image_url = url;
        Ok(())
    }

    /// 热度分：浏览量×2 + 搜索量，缺失计数按 0 计
    pub fn popularity_score(&self) -> i64 {
        self.view_count.unwrap_or(0) * 2 + self.search_count.unwrap_or(0)
    }

    /// 互动等级（无法识别时为 None）
    pub fn interactivity(&self) -> Option<Level> {
        self.interactivity_level.as_deref().and_then(Level::normalize)
    }

    /// 主题的 JSON 表示（用于入库）
    pub fn themes_json(&self) -> String {
        serde_json::to_string(&self.themes).unwrap_or_else(|_| "[]".to_string())
    }

    /// 播放平台的 JSON 表示（用于入库）
    pub fn available_on_json(&self) -> String {
        serde_json::to_string(&self.available_on).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Validator for TvShow {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        StringValidator::validate_name(&self.name)?;
        StringValidator::validate_description(&self.description)?;
        StringValidator::validate_url(&self.image_url)?;
        NumberValidator::validate_stimulation_score(self.stimulation_score)?;
        NumberValidator::validate_overall_rating(self.overall_rating)?;
        NumberValidator::validate_episode_length(&self.episode_length)?;
        NumberValidator::validate_year(&self.release_year)?;
        NumberValidator::validate_year(&self.end_year)?;
        CollectionValidator::validate_themes(&self.themes)?;
        Ok(())
    }
}
