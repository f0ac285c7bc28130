use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{NumberValidator, StringValidator, ValidationError, Validator};

/// 研究文章摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub full_text: Option<String>,
    pub original_study_title: Option<String>,
    pub authors: Option<String>,
    pub publication_year: Option<i32>,
    pub source_url: Option<String>,
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub key_findings: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResearchRequest {
    pub title: String,
    pub category: String,
    pub summary: String,
    pub full_text: Option<String>,
    pub original_study_title: Option<String>,
    pub authors: Option<String>,
    pub publication_year: Option<i32>,
    pub source_url: Option<String>,
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub key_findings: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResearchRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub full_text: Option<String>,
    pub original_study_title: Option<String>,
    pub authors: Option<String>,
    pub publication_year: Option<i32>,
    pub source_url: Option<String>,
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub key_findings: Option<String>,
    pub image_url: Option<String>,
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ResearchSummary {
    pub fn from_create_request(request: CreateResearchRequest) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let research = Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title,
            category: request.category.trim().to_string(),
            summary: request.summary,
            full_text: request.full_text.and_then(non_blank),
            original_study_title: request.original_study_title.and_then(non_blank),
            authors: request.authors.and_then(non_blank),
            publication_year: request.publication_year,
            source_url: request.source_url.and_then(non_blank),
            headline: request.headline.and_then(non_blank),
            sub_headline: request.sub_headline.and_then(non_blank),
            key_findings: request.key_findings.and_then(non_blank),
            image_url: request.image_url.and_then(non_blank),
            created_at: now,
            updated_at: now,
        };
        research.validate()?;
        Ok(research)
    }

    /// 应用更新请求（空字符串清空可选字段）
    pub fn apply_update(&mut self, request: UpdateResearchRequest) -> Result<(), ValidationError> {
        if let Some(title) = request.title {
            self.title = title;
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if let Some(summary) = request.summary {
            self.summary = summary;
        }
        if let Some(v) = request.full_text {
            self.full_text = non_blank(v);
        }
        if let Some(v) = request.original_study_title {
            self.original_study_title = non_blank(v);
        }
        if let Some(v) = request.authors {
            self.authors = non_blank(v);
        }
        if let Some(year) = request.publication_year {
            self.publication_year = Some(year);
        }
        if let Some(v) = request.source_url {
            self.source_url = non_blank(v);
        }
        if let Some(v) = request.headline {
            self.headline = non_blank(v);
        }
        if let Some(v) = request.sub_headline {
            self.sub_headline = non_blank(v);
        }
        if let Some(v) = request.key_findings {
            self.key_findings = non_blank(v);
        }
        if let Some(v) = request.image_url {
            self.image_url = non_blank(v);
        }

        self.validate()?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Validator for ResearchSummary {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        StringValidator::validate_title(&self.title)?;
        if self.category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        StringValidator::validate_url(&self.source_url)?;
        StringValidator::validate_url(&self.image_url)?;
        NumberValidator::validate_year(&self.publication_year)?;
        Ok(())
    }
}
