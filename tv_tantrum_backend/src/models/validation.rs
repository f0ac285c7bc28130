use thiserror::Error;

/// 验证错误类型
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name is too long (max 200 characters)")]
    NameTooLong,

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title is too long (max 300 characters)")]
    TitleTooLong,

    #[error("Description is too long (max 5000 characters)")]
    DescriptionTooLong,

    #[error("Invalid stimulation score: {0} (must be between 1 and 5)")]
    InvalidStimulationScore(i32),

    #[error("Invalid rating: {0} (must be between 0.0 and 5.0)")]
    InvalidRating(f64),

    #[error("Invalid episode length: {0} (must be positive)")]
    InvalidEpisodeLength(i32),

    #[error("Invalid year: {0} (must be between 1900 and 2100)")]
    InvalidYear(i32),

    #[error("Invalid year range: {0}-{1}")]
    InvalidYearRange(i32, i32),

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("Too many themes (max 20)")]
    TooManyThemes,

    #[error("Theme name is too long (max 50 characters)")]
    ThemeNameTooLong,

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Invalid display order: {0} (must not be negative)")]
    InvalidDisplayOrder(i32),

    #[error("Invalid stimulation score range: {0}-{1}")]
    InvalidScoreRange(i32, i32),

    #[error("No shows selected for comparison")]
    EmptyComparison,

    #[error("Too many shows to compare: {0} (max {1})")]
    TooManyComparedShows(usize, usize),
}

/// 验证器trait
pub trait Validator {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}

/// 字符串验证工具
pub struct StringValidator;

impl StringValidator {
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if name.chars().count() > 200 {
            return Err(ValidationError::NameTooLong);
        }

        Ok(())
    }

    pub fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        if title.chars().count() > 300 {
            return Err(ValidationError::TitleTooLong);
        }

        Ok(())
    }

    pub fn validate_description(text: &str) -> Result<(), ValidationError> {
        if text.chars().count() > 5000 {
            return Err(ValidationError::DescriptionTooLong);
        }
        Ok(())
    }

    pub fn validate_url(url: &Option<String>) -> Result<(), ValidationError> {
        if let Some(url_str) = url {
            if !url_str.is_empty() && !url_str.starts_with("http") && !url_str.starts_with('/') {
                return Err(ValidationError::InvalidUrl(url_str.clone()));
            }
        }
        Ok(())
    }
}

/// 数值验证工具
pub struct NumberValidator;

impl NumberValidator {
    pub fn validate_stimulation_score(score: i32) -> Result<(), ValidationError> {
        if !(1..=5).contains(&score) {
            return Err(ValidationError::InvalidStimulationScore(score));
        }
        Ok(())
    }

    pub fn validate_overall_rating(rating: f64) -> Result<(), ValidationError> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ValidationError::InvalidRating(rating));
        }
        Ok(())
    }

    pub fn validate_episode_length(minutes: &Option<i32>) -> Result<(), ValidationError> {
        if let Some(m) = minutes {
            if *m <= 0 {
                return Err(ValidationError::InvalidEpisodeLength(*m));
            }
        }
        Ok(())
    }

    pub fn validate_year(year: &Option<i32>) -> Result<(), ValidationError> {
        if let Some(y) = year {
            if *y < 1900 || *y > 2100 {
                return Err(ValidationError::InvalidYear(*y));
            }
        }
        Ok(())
    }

    pub fn validate_display_order(order: i32) -> Result<(), ValidationError> {
        if order < 0 {
            return Err(ValidationError::InvalidDisplayOrder(order));
        }
        Ok(())
    }
}

/// 集合验证工具
pub struct CollectionValidator;

impl CollectionValidator {
    pub fn validate_themes(themes: &[String]) -> Result<(), ValidationError> {
        if themes.len() > 20 {
            return Err(ValidationError::TooManyThemes);
        }

        for theme in themes {
            if theme.chars().count() > 50 {
                return Err(ValidationError::ThemeNameTooLong);
            }
        }

        Ok(())
    }
}
