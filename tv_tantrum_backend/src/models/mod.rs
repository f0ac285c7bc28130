pub mod category;
pub mod dto;
pub mod filter;
pub mod level;
pub mod research;
pub mod show;
pub mod validation;

pub use category::{CategoryFilterConfig, CreateCategoryRequest, HomepageCategory, HomepageCategoryRow, UpdateCategoryRequest};
pub use dto::{CatalogStatistics, CompareResponse, ScoreBucket, ShowResponse};
pub use filter::{AgeGroup, FilterSpec, InteractionBand, SortOption, StimulationScoreRange, ThemeMatchMode};
pub use level::Level;
pub use research::{CreateResearchRequest, ResearchSummary, UpdateResearchRequest};
pub use show::{CreateShowRequest, TvShow, TvShowRow, UpdateShowRequest};
pub use validation::{ValidationError, Validator};
