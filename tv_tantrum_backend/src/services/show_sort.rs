use std::cmp::Ordering;

use crate::models::{Level, SortOption, TvShow};

/// 排序节目列表（返回新列表，稳定排序）
///
/// `sort_by` 为空或无法识别时保持原顺序。
pub fn sort_shows(shows: &[TvShow], sort_by: Option<&str>) -> Vec<TvShow> {
    let mut sorted = shows.to_vec();
    if let Some(option) = sort_by.and_then(SortOption::parse) {
        sorted.sort_by(|a, b| compare(a, b, option));
    }
    sorted
}

/// 按排序方式比较两个节目
pub fn compare(a: &TvShow, b: &TvShow, option: SortOption) -> Ordering {
    match option {
        SortOption::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortOption::StimulationScore => a.stimulation_score.cmp(&b.stimulation_score),
        SortOption::InteractivityLevel => interactivity_rank(a).cmp(&interactivity_rank(b)),
        SortOption::Popular => b.popularity_score().cmp(&a.popularity_score()),
        SortOption::OverallRating => b
            .overall_rating
            .partial_cmp(&a.overall_rating)
            .unwrap_or(Ordering::Equal),
    }
}

/// 互动等级权重，缺失或无法识别时按 Moderate(3)
fn interactivity_rank(show: &TvShow) -> u8 {
    show.interactivity().unwrap_or(Level::Moderate).rank()
}
