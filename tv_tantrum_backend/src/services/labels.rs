//! 刺激分数与各项等级的显示文案
//!
//! 无法识别的输入一律按 Moderate 处理。

use serde::Serialize;

use crate::models::Level;

/// 刺激分数对应的颜色档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorBand {
    Green,
    LightGreen,
    Yellow,
    Orange,
    Red,
}

impl ColorBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            ColorBand::Green => "bg-green-500",
            ColorBand::LightGreen => "bg-green-300",
            ColorBand::Yellow => "bg-yellow-400",
            ColorBand::Orange => "bg-orange-400",
            ColorBand::Red => "bg-red-500",
        }
    }
}

const TANTRUM_FACTOR_LABELS: [&str; 5] = ["low", "low-medium", "medium", "medium-high", "high"];

/// 刺激分数 → 发脾气指数标签（1 low … 5 high）
pub fn tantrum_factor_label(score: i32) -> Option<&'static str> {
    if (1..=5).contains(&score) {
        Some(TANTRUM_FACTOR_LABELS[(score - 1) as usize])
    } else {
        None
    }
}

/// 发脾气指数标签 → 刺激分数
pub fn score_for_tantrum_factor(label: &str) -> Option<i32> {
    let label = label.trim().to_lowercase();
    TANTRUM_FACTOR_LABELS
        .iter()
        .position(|l| *l == label)
        .map(|i| i as i32 + 1)
}

pub fn stimulation_color(score: i32) -> ColorBand {
    match score {
        1 => ColorBand::Green,
        2 => ColorBand::LightGreen,
        4 => ColorBand::Orange,
        5 => ColorBand::Red,
        _ => ColorBand::Yellow,
    }
}

pub fn stimulation_description(score: i32) -> &'static str {
    match score {
        1 => "Very calm: gentle pacing, soft sounds and few scene changes.",
        2 => "Calm: mostly relaxed pacing with occasional livelier moments.",
        4 => "Stimulating: quick cuts, bright visuals and frequent sound effects.",
        5 => "Highly stimulating: rapid pacing, intense visuals and constant audio.",
        _ => "Moderate: a balanced mix of calm and energetic moments.",
    }
}

fn level_of(text: Option<&str>) -> Level {
    text.map(Level::normalize_or_moderate).unwrap_or(Level::Moderate)
}

pub fn interactivity_description(level: Option<&str>) -> &'static str {
    match level_of(level) {
        Level::Low => "Children mostly watch; the show rarely asks them to respond.",
        Level::ModerateLow => "Occasional questions or prompts invite light participation.",
        Level::Moderate => "Regular prompts encourage children to answer, move or sing along.",
        Level::ModerateHigh => "Frequent direct address keeps children responding throughout.",
        Level::High => "Constant calls to action; children are expected to participate continuously.",
    }
}

pub fn dialogue_description(level: Option<&str>) -> &'static str {
    match level_of(level) {
        Level::Low => "Sparse, slow dialogue with plenty of quiet moments.",
        Level::ModerateLow => "Gentle conversation at a relaxed pace.",
        Level::Moderate => "Steady dialogue with some excited or overlapping speech.",
        Level::ModerateHigh => "Fast, frequent dialogue with raised voices at times.",
        Level::High => "Rapid, loud and near-continuous dialogue.",
    }
}

pub fn sound_effects_description(level: Option<&str>) -> &'static str {
    match level_of(level) {
        Level::Low => "Few sound effects; the soundtrack stays soft.",
        Level::ModerateLow => "Occasional, mild sound effects.",
        Level::Moderate => "Sound effects punctuate the action without dominating it.",
        Level::ModerateHigh => "Frequent, prominent sound effects.",
        Level::High => "Loud, constant sound effects layered over most scenes.",
    }
}
