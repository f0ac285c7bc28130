//! 节目目录过滤引擎
//!
//! 纯函数：输入完整节目列表与筛选条件，输出保持原顺序的子序列。
//! 每个条件只能淘汰节目，缺省条件视为"不限制"。搜索条件最后判断，
//! 一旦提供即由它给出最终结果。

use regex::Regex;

use crate::models::{AgeGroup, FilterSpec, InteractionBand, StimulationScoreRange, ThemeMatchMode, TvShow};
use crate::services::labels::tantrum_factor_label;

lazy_static::lazy_static! {
    // "2-5", "ages 3 to 6", "18 months - 4 years", "12-36 months"
    static ref AGE_SPAN_REGEX: Regex = Regex::new(
        r"(?i)(\d{1,2})\s*(?:(months?|mos?|years?|yrs?)\b)?\s*(?:-|–|to)\s*(\d{1,2})\s*(?:(months?|mos?|years?|yrs?)\b)?"
    )
    .expect("Invalid age span regex pattern - this is a programming error");
    // "5+", "8 and up", "6 months+"
    static ref AGE_OPEN_REGEX: Regex = Regex::new(
        r"(?i)(\d{1,2})\s*(?:(months?|mos?|years?|yrs?)\b)?\s*(?:\+|and\s+up|&\s*up)"
    )
    .expect("Invalid open age regex pattern - this is a programming error");
    // 单个年龄 "4", "18 months"
    static ref AGE_SINGLE_REGEX: Regex = Regex::new(r"^\D*(\d{1,2})\D*$")
        .expect("Invalid single age regex pattern - this is a programming error");
    static ref AGE_MONTHS_REGEX: Regex = Regex::new(r"(?i)\bmonths?\b|\bmos?\b")
        .expect("Invalid months regex pattern - this is a programming error");

    // 旧数据的文字写法（无法解析出数字区间时使用）
    static ref LEGACY_TODDLER_REGEX: Regex = Regex::new(r"(?i)toddler|bab(?:y|ies)|infant|month")
        .expect("Invalid toddler regex pattern - this is a programming error");
    static ref LEGACY_PRESCHOOL_REGEX: Regex = Regex::new(r"(?i)pre-?school|kindergarten")
        .expect("Invalid preschool regex pattern - this is a programming error");
    static ref LEGACY_SCHOOL_AGE_REGEX: Regex = Regex::new(r"(?i)school[- ]?age|elementary|grade")
        .expect("Invalid school-age regex pattern - this is a programming error");
    static ref LEGACY_TWEEN_REGEX: Regex = Regex::new(r"(?i)tween|pre-?teen")
        .expect("Invalid tween regex pattern - this is a programming error");

    // 名称末尾的年份区间："Show 2018-present", "Show (2019)"
    static ref YEAR_SUFFIX_REGEX: Regex = Regex::new(
        r"(?i)\s*[(\[]?\s*(?:19|20)\d{2}\s*(?:[-–]\s*(?:(?:19|20)\d{2}|present|now)?)?\s*[)\]]?\s*$"
    )
    .expect("Invalid year suffix regex pattern - this is a programming error");
}

/// 过滤节目列表
pub fn filter_shows(shows: &[TvShow], filters: &FilterSpec) -> Vec<TvShow> {
    let compiled = CompiledFilter::new(filters);
    shows
        .iter()
        .filter(|show| compiled.matches(show))
        .cloned()
        .collect()
}

/// 判断单个节目是否满足筛选条件
pub fn show_matches(show: &TvShow, filters: &FilterSpec) -> bool {
    CompiledFilter::new(filters).matches(show)
}

/// 预处理后的筛选条件（每次调用只做一次小写化/解析）
struct CompiledFilter {
    age_group: Option<AgeGroupFilter>,
    tantrum_factor: Option<String>,
    themes: Vec<String>,
    theme_match_mode: ThemeMatchMode,
    interaction: Option<InteractionBand>,
    score_range: Option<StimulationScoreRange>,
    search: Option<String>,
}

enum AgeGroupFilter {
    Known(AgeGroup),
    /// 无法识别的年龄段，没有节目能匹配
    Unknown,
}

impl CompiledFilter {
    fn new(filters: &FilterSpec) -> Self {
        let age_group = filters
            .age_group
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .map(|g| match AgeGroup::parse(g) {
                Some(group) => AgeGroupFilter::Known(group),
                None => AgeGroupFilter::Unknown,
            });

        Self {
            age_group,
            tantrum_factor: filters
                .tantrum_factor
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.trim().to_lowercase()),
            themes: filters
                .themes
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            theme_match_mode: filters.theme_match_mode,
            interaction: filters
                .interaction_level
                .as_deref()
                .and_then(InteractionBand::parse),
            score_range: filters.stimulation_score_range,
            search: filters.search_term().map(|s| s.to_lowercase()),
        }
    }

    fn matches(&self, show: &TvShow) -> bool {
        if let Some(ref group) = self.age_group {
            if let Some(range) = show.age_range.as_deref().filter(|r| !r.trim().is_empty()) {
                let ok = match group {
                    AgeGroupFilter::Known(group) => age_range_matches(range, *group),
                    AgeGroupFilter::Unknown => false,
                };
                if !ok {
                    return false;
                }
            }
        }

        if let Some(ref label) = self.tantrum_factor {
            if tantrum_factor_label(show.stimulation_score) != Some(label.as_str()) {
                return false;
            }
        }

        if !self.themes.is_empty() {
            if show.themes.is_empty() {
                return false;
            }
            let show_themes: Vec<String> = show.themes.iter().map(|t| t.to_lowercase()).collect();
            let hit = |wanted: &String| show_themes.iter().any(|t| t.contains(wanted.as_str()));
            let ok = match self.theme_match_mode {
                ThemeMatchMode::All => self.themes.iter().all(hit),
                ThemeMatchMode::Any => self.themes.iter().any(hit),
            };
            if !ok {
                return false;
            }
        }

        if let (Some(band), Some(level)) = (self.interaction, show.interactivity_level.as_deref()) {
            let level = level.to_lowercase();
            if !band.terms().iter().any(|term| level.contains(term)) {
                return false;
            }
        }

        if let Some(range) = self.score_range {
            if !range.contains(show.stimulation_score) {
                return false;
            }
        }

        // 搜索最后判断，结果即最终结果
        if let Some(ref term) = self.search {
            return matches_search(show, term);
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeUnit {
    Years,
    Months,
}

impl AgeUnit {
    fn of(unit: &str) -> AgeUnit {
        if unit.to_lowercase().starts_with("mo") {
            AgeUnit::Months
        } else {
            AgeUnit::Years
        }
    }

    fn to_months(self, value: u32) -> u32 {
        match self {
            AgeUnit::Years => value * 12,
            AgeUnit::Months => value,
        }
    }
}

/// 解析年龄区间文本为 (最小岁数, 最大岁数)
///
/// 月龄按端点换算：下限向下取整，上限向上取整（"18 months" => (1, 2)）。
/// 只有一个端点写了单位时，另一端沿用该单位。
pub fn parse_age_span(text: &str) -> Option<(u32, u32)> {
    if let Some(caps) = AGE_SPAN_REGEX.captures(text) {
        let a: u32 = caps[1].parse().ok()?;
        let b: u32 = caps[3].parse().ok()?;
        let a_unit = caps.get(2).map(|m| AgeUnit::of(m.as_str()));
        let b_unit = caps.get(4).map(|m| AgeUnit::of(m.as_str()));
        let a = a_unit.or(b_unit).unwrap_or(AgeUnit::Years).to_months(a);
        let b = b_unit.or(a_unit).unwrap_or(AgeUnit::Years).to_months(b);
        return Some((a.min(b) / 12, a.max(b).div_ceil(12)));
    }

    if let Some(caps) = AGE_OPEN_REGEX.captures(text) {
        let a: u32 = caps[1].parse().ok()?;
        let unit = caps.get(2).map(|m| AgeUnit::of(m.as_str())).unwrap_or(AgeUnit::Years);
        return Some((unit.to_months(a) / 12, 18));
    }

    if let Some(caps) = AGE_SINGLE_REGEX.captures(text) {
        let a: u32 = caps[1].parse().ok()?;
        if AGE_MONTHS_REGEX.is_match(text) {
            return Some((a / 12, a.div_ceil(12)));
        }
        return Some((a, a));
    }

    None
}

/// 年龄区间与年龄段是否有交集；无法解析时退回文字匹配
pub fn age_range_matches(age_range: &str, group: AgeGroup) -> bool {
    match parse_age_span(age_range) {
        Some((min, max)) => {
            let (group_min, group_max) = group.span();
            min <= group_max && max >= group_min
        }
        None => {
            let legacy = match group {
                AgeGroup::Toddler => &*LEGACY_TODDLER_REGEX,
                AgeGroup::Preschool => &*LEGACY_PRESCHOOL_REGEX,
                AgeGroup::SchoolAge => &*LEGACY_SCHOOL_AGE_REGEX,
                AgeGroup::Tween => &*LEGACY_TWEEN_REGEX,
            };
            legacy.is_match(age_range)
        }
    }
}

/// 去掉末尾的年份区间
pub fn strip_year_suffix(name: &str) -> String {
    YEAR_SUFFIX_REGEX.replace(name, "").trim().to_string()
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '’' | '‘' | '.'))
        .collect()
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// 多策略搜索匹配，按顺序命中即返回
///
/// `term` 需已小写化。
fn matches_search(show: &TvShow, term: &str) -> bool {
    let name = show.name.to_lowercase();

    // 1. 名称完全相同
    if name == term {
        return true;
    }

    // 2. 名称包含
    if name.contains(term) {
        return true;
    }

    // 3. 简介包含
    if show.description.to_lowercase().contains(term) {
        return true;
    }

    // 4. 去掉年份后缀后包含
    let bare_name = strip_year_suffix(&name);
    let bare_term = strip_year_suffix(term);
    if !bare_term.is_empty() && bare_name.contains(&bare_term) {
        return true;
    }

    // 5. 每个搜索词都出现在名称的某个词中
    let term_words = words(term);
    if !term_words.is_empty() {
        let name_words = words(&name);
        if term_words
            .iter()
            .all(|tw| name_words.iter().any(|nw| nw.contains(tw)))
        {
            return true;
        }
    }

    // 6. 忽略撇号和句点
    let plain_term = strip_punctuation(term);
    if !plain_term.trim().is_empty() && strip_punctuation(&name).contains(&plain_term) {
        return true;
    }

    // 7. 主题包含
    show.themes.iter().any(|t| t.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(name: &str, score: i32) -> TvShow {
        TvShow::new(name.to_string(), score).unwrap()
    }

    fn spec() -> FilterSpec {
        FilterSpec::default()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let shows = vec![show("Bluey", 2), show("Cocomelon", 5)];
        assert_eq!(filter_shows(&shows, &spec()), shows);
        assert!(filter_shows(&[], &spec()).is_empty());
    }

    #[test]
    fn test_age_span_parsing() {
        assert_eq!(parse_age_span("2-5"), Some((2, 5)));
        assert_eq!(parse_age_span("Ages 3 to 6"), Some((3, 6)));
        assert_eq!(parse_age_span("6 - 4 years"), Some((4, 6)));
        assert_eq!(parse_age_span("5+"), Some((5, 18)));
        assert_eq!(parse_age_span("4"), Some((4, 4)));
        assert_eq!(parse_age_span("Preschoolers"), None);
    }

    #[test]
    fn test_month_based_age_spans() {
        assert_eq!(parse_age_span("18 months"), Some((1, 2)));
        assert_eq!(parse_age_span("18 months - 4 years"), Some((1, 4)));
        assert_eq!(parse_age_span("12-36 months"), Some((1, 3)));
        assert_eq!(parse_age_span("6 months+"), Some((0, 18)));

        assert!(age_range_matches("18 months - 4 years", AgeGroup::Toddler));
        assert!(age_range_matches("18 months - 4 years", AgeGroup::Preschool));
        assert!(!age_range_matches("18 months - 4 years", AgeGroup::SchoolAge));
        assert!(age_range_matches("12-36 months", AgeGroup::Toddler));
        assert!(age_range_matches("6 months+", AgeGroup::Toddler));
        assert!(age_range_matches("a few months old", AgeGroup::Toddler));
    }

    #[test]
    fn test_toddler_filter_keeps_month_ranges() {
        let mut infant = show("Hey Bear", 3);
        infant.age_range = Some("6 months+".to_string());
        let mut early = show("Ms Rachel", 2);
        early.age_range = Some("12-36 months".to_string());
        let mut older = show("Arthur", 2);
        older.age_range = Some("6-9".to_string());

        let filters = FilterSpec {
            age_group: Some("Toddler".to_string()),
            ..spec()
        };
        let result = filter_shows(&[infant.clone(), early.clone(), older], &filters);
        assert_eq!(result, vec![infant, early]);
    }

    #[test]
    fn test_age_group_overlap() {
        assert!(age_range_matches("2-5", AgeGroup::Toddler));
        assert!(age_range_matches("2-5", AgeGroup::Preschool));
        assert!(!age_range_matches("2-5", AgeGroup::SchoolAge));
        assert!(age_range_matches("8+", AgeGroup::Tween));
        assert!(age_range_matches("Preschoolers", AgeGroup::Preschool));
        assert!(!age_range_matches("Preschoolers", AgeGroup::SchoolAge));
    }

    #[test]
    fn test_age_group_filter_keeps_shows_without_range() {
        let mut with_range = show("Arthur", 2);
        with_range.age_range = Some("6-9".to_string());
        let without_range = show("Mystery Show", 2);

        let filters = FilterSpec {
            age_group: Some("Toddler".to_string()),
            ..spec()
        };
        let result = filter_shows(&[with_range, without_range.clone()], &filters);
        assert_eq!(result, vec![without_range]);
    }

    #[test]
    fn test_tantrum_factor_exact_label() {
        let shows = vec![show("A", 1), show("B", 2), show("C", 4)];
        let filters = FilterSpec {
            tantrum_factor: Some("Low-Medium".to_string()),
            ..spec()
        };
        let names: Vec<String> = filter_shows(&shows, &filters).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["B".to_string()]);

        let unknown = FilterSpec {
            tantrum_factor: Some("extreme".to_string()),
            ..spec()
        };
        assert!(filter_shows(&shows, &unknown).is_empty());
    }

    #[test]
    fn test_themes_all_and_any() {
        let mut s = show("Adventure Show", 3);
        s.themes = vec!["adventure".to_string(), "friendship".to_string()];
        let themeless = show("Plain", 3);

        let one = FilterSpec {
            themes: vec!["advent".to_string()],
            ..spec()
        };
        assert_eq!(filter_shows(&[s.clone(), themeless.clone()], &one), vec![s.clone()]);

        let two = FilterSpec {
            themes: vec!["advent".to_string(), "mystery".to_string()],
            ..spec()
        };
        assert!(filter_shows(&[s.clone()], &two).is_empty());

        let any = FilterSpec {
            theme_match_mode: ThemeMatchMode::Any,
            ..two
        };
        assert_eq!(filter_shows(&[s.clone(), themeless], &any), vec![s]);
    }

    #[test]
    fn test_interaction_level_terms() {
        let mut limited = show("Limited", 2);
        limited.interactivity_level = Some("Limited".to_string());
        let mut heavy = show("Heavy", 4);
        heavy.interactivity_level = Some("Heavy participation".to_string());
        let unknown = show("No level", 3);

        let filters = FilterSpec {
            interaction_level: Some("Low".to_string()),
            ..spec()
        };
        let result = filter_shows(&[limited.clone(), heavy.clone(), unknown.clone()], &filters);
        assert_eq!(result, vec![limited, unknown]);

        let unrecognized = FilterSpec {
            interaction_level: Some("Sideways".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&[heavy.clone()], &unrecognized), vec![heavy]);
    }

    #[test]
    fn test_score_range_inclusive() {
        let shows = vec![show("A", 1), show("B", 3), show("C", 5)];
        let filters = FilterSpec {
            stimulation_score_range: Some(StimulationScoreRange::new(3, 5)),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &filters).len(), 2);
    }

    #[test]
    fn test_search_heuristics() {
        let mut blues = show("Blues Clues", 2);
        blues.description = "A puppy leaves clues".to_string();
        let you = show("Blue's Clues & You! 2019-present", 2);
        let mut other = show("Sesame Street", 3);
        other.themes = vec!["Literacy".to_string()];

        let shows = vec![blues.clone(), you.clone(), other.clone()];
        let filters = FilterSpec {
            search: Some("Blue's Clues".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &filters), vec![blues.clone(), you.clone()]);

        let by_year = FilterSpec {
            search: Some("Blue's Clues & You! 2019".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &by_year), vec![you]);

        let by_words = FilterSpec {
            search: Some("street sesame".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &by_words), vec![other.clone()]);

        let by_theme = FilterSpec {
            search: Some("literacy".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &by_theme), vec![other]);

        let by_description = FilterSpec {
            search: Some("puppy".to_string()),
            ..spec()
        };
        assert_eq!(filter_shows(&shows, &by_description), vec![blues]);
    }

    #[test]
    fn test_search_runs_after_other_gates() {
        let calm = show("Bluey", 2);
        let loud = show("Bluey Loud Edition", 5);
        let filters = FilterSpec {
            search: Some("bluey".to_string()),
            stimulation_score_range: Some(StimulationScoreRange::new(1, 3)),
            ..spec()
        };
        assert_eq!(filter_shows(&[calm.clone(), loud], &filters), vec![calm]);
    }

    #[test]
    fn test_strip_year_suffix() {
        assert_eq!(strip_year_suffix("Show Name 2018-present"), "Show Name");
        assert_eq!(strip_year_suffix("Show (2019)"), "Show");
        assert_eq!(strip_year_suffix("Show 1999–2004"), "Show");
        assert_eq!(strip_year_suffix("No Year"), "No Year");
    }
}
