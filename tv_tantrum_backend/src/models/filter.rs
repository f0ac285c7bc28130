use serde::{Deserialize, Serialize};

/// 节目筛选条件
///
/// 所有字段均可选，缺省即"不限制"。每次请求构建一次，用完即弃。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tantrum_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    #[serde(default)]
    pub theme_match_mode: ThemeMatchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stimulation_score_range: Option<StimulationScoreRange>,
}

impl FilterSpec {
    /// 非空白的搜索词
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 是否没有任何限制条件
    pub fn is_empty(&self) -> bool {
        self.age_group.is_none()
            && self.tantrum_factor.is_none()
            && self.search_term().is_none()
            && self.themes.is_empty()
            && self.interaction_level.is_none()
            && self.stimulation_score_range.is_none()
    }
}

/// 刺激分数闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulationScoreRange {
    pub min: i32,
    pub max: i32,
}

impl StimulationScoreRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: i32) -> bool {
        score >= self.min && score <= self.max
    }
}

/// 多主题匹配模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMatchMode {
    /// 每个筛选主题都要命中
    #[default]
    All,
    /// 命中任意一个即可
    Any,
}

impl std::str::FromStr for ThemeMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "and" => Ok(ThemeMatchMode::All),
            "any" | "or" => Ok(ThemeMatchMode::Any),
            _ => Err(format!("Invalid theme match mode: {}", s)),
        }
    }
}

/// 年龄段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Toddler,
    Preschool,
    #[serde(rename = "School-Age")]
    SchoolAge,
    Tween,
}

impl AgeGroup {
    /// 年龄段覆盖的岁数（闭区间）
    pub fn span(&self) -> (u32, u32) {
        match self {
            AgeGroup::Toddler => (0, 2),
            AgeGroup::Preschool => (3, 5),
            AgeGroup::SchoolAge => (6, 9),
            AgeGroup::Tween => (10, 12),
        }
    }

    pub fn parse(text: &str) -> Option<AgeGroup> {
        let key: String = text
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "toddler" | "toddlers" => Some(AgeGroup::Toddler),
            "preschool" | "preschooler" | "preschoolers" => Some(AgeGroup::Preschool),
            "schoolage" | "school" => Some(AgeGroup::SchoolAge),
            "tween" | "tweens" => Some(AgeGroup::Tween),
            _ => None,
        }
    }
}

/// 互动程度筛选档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionBand {
    Low,
    Moderate,
    High,
}

impl InteractionBand {
    /// 匹配用词（小写）
    pub fn terms(&self) -> &'static [&'static str] {
        match self {
            InteractionBand::Low => &["low", "limited", "minimal"],
            InteractionBand::Moderate => &["moderate", "medium", "some"],
            InteractionBand::High => &["high", "heavy", "strong", "frequent"],
        }
    }

    pub fn parse(text: &str) -> Option<InteractionBand> {
        match text.trim().to_lowercase().as_str() {
            "low" => Some(InteractionBand::Low),
            "moderate" | "medium" => Some(InteractionBand::Moderate),
            "high" => Some(InteractionBand::High),
            _ => None,
        }
    }
}

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "stimulation-score")]
    StimulationScore,
    #[serde(rename = "interactivity-level")]
    InteractivityLevel,
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "overall-rating")]
    OverallRating,
}

impl SortOption {
    /// 无法识别的取值返回 None（即不重新排序）
    pub fn parse(text: &str) -> Option<SortOption> {
        match text.trim() {
            "name" => Some(SortOption::Name),
            "stimulation-score" => Some(SortOption::StimulationScore),
            "interactivity-level" => Some(SortOption::InteractivityLevel),
            "popular" => Some(SortOption::Popular),
            "overall-rating" => Some(SortOption::OverallRating),
            _ => None,
        }
    }
}
