use serde::{Deserialize, Serialize};

use super::TvShow;
use crate::services::labels;

/// 节目响应DTO
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowResponse {
    #[serde(flatten)]
    pub show: TvShow,

    // 计算字段
    pub tantrum_factor: Option<String>,
    pub stimulation_color: String,
    pub stimulation_description: String,
    pub interactivity_description: String,
    pub dialogue_description: String,
    pub sound_effects_description: String,
    pub popularity_score: i64,
}

impl From<TvShow> for ShowResponse {
    fn from(show: TvShow) -> Self {
        Self {
            tantrum_factor: labels::tantrum_factor_label(show.stimulation_score).map(str::to_string),
            stimulation_color: labels::stimulation_color(show.stimulation_score).css_class().to_string(),
            stimulation_description: labels::stimulation_description(show.stimulation_score).to_string(),
            interactivity_description: labels::interactivity_description(show.interactivity_level.as_deref()).to_string(),
            dialogue_description: labels::dialogue_description(show.dialogue_intensity.as_deref()).to_string(),
            sound_effects_description: labels::sound_effects_description(show.sound_effects_level.as_deref()).to_string(),
            popularity_score: show.popularity_score(),
            show,
        }
    }
}

/// 对比结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub shows: Vec<ShowResponse>,
    /// 未找到的节目ID
    pub missing_ids: Vec<String>,
    /// 刺激分数最低（最平静）的节目ID
    pub calmest_id: Option<String>,
}

/// 统计信息
#[derive(Debug, Serialize)]
pub struct CatalogStatistics {
    pub total_shows: i64,
    pub total_research: i64,
    pub total_categories: i64,
    pub featured_shows: i64,
    pub score_distribution: Vec<ScoreBucket>,
}

#[derive(Debug, Serialize)]
pub struct ScoreBucket {
    pub stimulation_score: i32,
    pub count: i64,
}
