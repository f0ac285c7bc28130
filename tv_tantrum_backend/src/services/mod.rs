pub mod catalog_service;
pub mod labels;
pub mod query_cache;
pub mod show_filter;
pub mod show_sort;

pub use catalog_service::{CatalogService, ShowPage};
pub use labels::ColorBand;
pub use query_cache::{CacheMaintenanceTask, QueryCache, QueryCacheConfig, QueryCacheStats};
pub use show_filter::{filter_shows, show_matches};
pub use show_sort::sort_shows;
