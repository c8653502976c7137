//! 等级区间缓存
//!
//! 按评分体系 id 缓存排好序的区间列表。创建、替换区间、切换默认时由写入方主动失效，
//! TTL 只是兜底。

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::config::{AppConfig, GradingConfig};
use crate::errors::{ExamSystemError, Result};
use crate::models::grading::entities::GradeBand;
use crate::storage::Storage;

static BAND_CACHE: OnceLock<GradeBandCache> = OnceLock::new();

#[derive(Clone)]
pub struct GradeBandCache {
    inner: Cache<i64, Arc<Vec<GradeBand>>>,
}

impl GradeBandCache {
    pub fn new(config: &GradingConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.band_cache_capacity)
            .time_to_live(Duration::from_secs(config.band_cache_ttl))
            .build();

        debug!(
            "GradeBandCache initialized with max capacity: {}",
            config.band_cache_capacity
        );
        Self { inner }
    }

    /// 全局实例，容量与 TTL 取自配置
    pub fn global() -> &'static Self {
        BAND_CACHE.get_or_init(|| Self::new(&AppConfig::get().grading))
    }

    /// 读取区间，未命中时从存储加载；同一 id 的并发加载只执行一次
    pub async fn get_or_load(
        &self,
        storage: &Arc<dyn Storage>,
        grading_system_id: i64,
    ) -> Result<Arc<Vec<GradeBand>>> {
        let storage = storage.clone();
        self.inner
            .try_get_with(grading_system_id, async move {
                let bands = storage.list_grade_bands(grading_system_id).await?;
                debug!(
                    "Loaded {} grade bands for grading system {}",
                    bands.len(),
                    grading_system_id
                );
                Ok::<_, ExamSystemError>(Arc::new(bands))
            })
            .await
            .map_err(|e| (*e).clone())
    }

    pub async fn invalidate(&self, grading_system_id: i64) {
        self.inner.invalidate(&grading_system_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_drops_entry() {
        let cache = GradeBandCache::new(&GradingConfig::default());
        cache.inner.insert(7, Arc::new(Vec::new())).await;
        assert!(cache.inner.get(&7).await.is_some());

        cache.invalidate(7).await;
        assert!(cache.inner.get(&7).await.is_none());
    }
}
