use serde::{Deserialize, Serialize};

/// 节目感官强度等级（互动性、对白强度、音效等共用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Moderate-Low")]
    ModerateLow,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Moderate-High")]
    ModerateHigh,
    #[serde(rename = "High")]
    High,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Low,
        Level::ModerateLow,
        Level::Moderate,
        Level::ModerateHigh,
        Level::High,
    ];

    /// 规范名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::ModerateLow => "Moderate-Low",
            Level::Moderate => "Moderate",
            Level::ModerateHigh => "Moderate-High",
            Level::High => "High",
        }
    }

    /// 排序权重（Low=1 … High=5）
    pub fn rank(&self) -> u8 {
        match self {
            Level::Low => 1,
            Level::ModerateLow => 2,
            Level::Moderate => 3,
            Level::ModerateHigh => 4,
            Level::High => 5,
        }
    }

    /// 将自由文本归一化为等级
    ///
    /// 接受大小写、空格/下划线代替连字符、"Medium" 代替 "Moderate"、
    /// 以及颠倒顺序的写法（"Low-Moderate" == "Moderate-Low"）。
    /// 无法识别时返回 `None`，调用方自行决定回退策略。
    pub fn normalize(text: &str) -> Option<Level> {
        let cleaned: String = text
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' || c == '/' { '-' } else { c })
            .collect();

        let parts: Vec<&str> = cleaned
            .split('-')
            .filter(|p| !p.is_empty())
            .map(|p| match p {
                "medium" | "mid" | "moderately" => "moderate",
                other => other,
            })
            .collect();

        match parts.as_slice() {
            ["low"] => Some(Level::Low),
            ["moderate"] => Some(Level::Moderate),
            ["high"] => Some(Level::High),
            ["moderate", "low"] | ["low", "moderate"] => Some(Level::ModerateLow),
            ["moderate", "high"] | ["high", "moderate"] => Some(Level::ModerateHigh),
            _ => None,
        }
    }

    /// 归一化失败时按 Moderate 处理
    pub fn normalize_or_moderate(text: &str) -> Level {
        Self::normalize(text).unwrap_or(Level::Moderate)
    }

    /// 入库前的规范化：能识别的写成规范名称，否则保留原文
    pub fn canonicalize(text: &str) -> String {
        match Self::normalize(text) {
            Some(level) => level.as_str().to_string(),
            None => text.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::normalize(s).ok_or_else(|| format!("Invalid level: {}", s))
    }
}
