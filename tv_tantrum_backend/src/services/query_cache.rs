use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;

/// 查询缓存配置
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCacheConfig {
    /// 缓存条目存活时间
    pub ttl: Duration,
    /// 最大条目数
    pub max_capacity: u64,
    /// 加载失败后的重试次数
    pub retry_count: u32,
    /// 首次重试前的等待时间，之后每次翻倍
    pub retry_backoff: Duration,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 256,
            retry_count: 2,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

impl QueryCacheConfig {
    /// 第 `attempt` 次重试前的等待时间
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// 带重试的查询缓存
///
/// 同一个键的并发加载只会执行一次；加载失败不写入缓存。
#[derive(Clone)]
pub struct QueryCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
    config: QueryCacheConfig,
}

impl<V: Clone + Send + Sync + 'static> QueryCache<V> {
    pub fn new(config: QueryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        Self { cache, config }
    }

    /// 读取缓存，未命中时调用 `loader` 加载（失败按配置重试）
    pub async fn get_or_load<F, Fut>(&self, key: &str, loader: F) -> anyhow::Result<V>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        if let Some(hit) = self.cache.get(key).await {
            tracing::debug!("Query cache hit: {}", key);
            return Ok(hit);
        }

        let config = &self.config;
        let result = self
            .cache
            .try_get_with(key.to_string(), async {
                let mut attempt = 0u32;
                loop {
                    match loader().await {
                        Ok(value) => return Ok(value),
                        Err(e) if attempt < config.retry_count => {
                            let wait = config.backoff_for(attempt);
                            tracing::warn!(
                                "Query load for {} failed (attempt {}/{}), retrying in {:?}: {}",
                                key,
                                attempt + 1,
                                config.retry_count + 1,
                                wait,
                                e
                            );
                            tokio::time::sleep(wait).await;
                            attempt += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
            })
            .await;

        result.map_err(|e: Arc<anyhow::Error>| anyhow::anyhow!("{:#}", e))
    }

    /// 清空所有条目（写操作后调用）
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// 执行过期清理等挂起任务
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    pub fn stats(&self) -> QueryCacheStats {
        QueryCacheStats {
            entry_count: self.cache.entry_count(),
            ttl_secs: self.config.ttl.as_secs(),
            max_capacity: self.config.max_capacity,
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Serialize)]
pub struct QueryCacheStats {
    pub entry_count: u64,
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

/// 缓存维护任务
pub struct CacheMaintenanceTask<V: Clone + Send + Sync + 'static> {
    cache: QueryCache<V>,
    interval: Duration,
}

impl<V: Clone + Send + Sync + 'static> CacheMaintenanceTask<V> {
    pub fn new(cache: QueryCache<V>, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// 启动定期维护任务
    pub async fn start(self) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;
            self.cache.run_pending_tasks().await;
            tracing::debug!("Query cache maintenance completed. Stats: {:?}", self.cache.stats());
        }
    }
}
