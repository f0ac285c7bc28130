use std::str::FromStr;
use std::time::Duration;

use crate::services::QueryCacheConfig;

/// 服务配置（从环境变量读取）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub query_cache: QueryCacheConfig,
    /// 对比功能最多同时比较的节目数
    pub compare_max_shows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "sqlite:./tv_tantrum.db?mode=rwc".to_string(),
            query_cache: QueryCacheConfig::default(),
            compare_max_shows: 4,
        }
    }
}

impl AppConfig {
    /// 读取环境变量，调用前应先执行 `dotenv::dotenv()`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过自定义查找函数构建配置，非法值回退到默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cache_defaults = &defaults.query_cache;

        let ttl_secs = parse_or(&lookup, "QUERY_CACHE_TTL_SECS", cache_defaults.ttl.as_secs());
        let backoff_ms = parse_or(
            &lookup,
            "QUERY_CACHE_BACKOFF_MS",
            cache_defaults.retry_backoff.as_millis() as u64,
        );

        let compare_max_shows = match parse_or(&lookup, "COMPARE_MAX_SHOWS", defaults.compare_max_shows) {
            0 => {
                tracing::warn!("COMPARE_MAX_SHOWS must be at least 1, using {}", defaults.compare_max_shows);
                defaults.compare_max_shows
            }
            n => n,
        };

        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            database_url: lookup("DATABASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.database_url),
            query_cache: QueryCacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                max_capacity: parse_or(&lookup, "QUERY_CACHE_MAX_CAPACITY", cache_defaults.max_capacity),
                retry_count: parse_or(&lookup, "QUERY_CACHE_RETRIES", cache_defaults.retry_count),
                retry_backoff: Duration::from_millis(backoff_ms),
            },
            compare_max_shows,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid value for {}: '{}', using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
