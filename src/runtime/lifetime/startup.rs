use crate::services::grading::band_cache::GradeBandCache;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 预热等级区间缓存
/// 每所学校的默认评分体系在启动时加载一次，失败只记录日志
async fn warm_band_cache(storage: &Arc<dyn Storage>) {
    let schools = match storage.list_schools().await {
        Ok(schools) => schools,
        Err(e) => {
            warn!("Failed to list schools: {}, skipping band cache warm-up", e);
            return;
        }
    };

    let cache = GradeBandCache::global();
    let mut warmed = 0;
    for school in &schools {
        match storage.get_default_grading_system(school.id).await {
            Ok(Some(system)) => match cache.get_or_load(storage, system.id).await {
                Ok(bands) => {
                    debug!(
                        "Cached {} bands of grading system {} for school {}",
                        bands.len(),
                        system.id,
                        school.id
                    );
                    warmed += 1;
                }
                Err(e) => warn!("Failed to warm bands of grading system {}: {}", system.id, e),
            },
            Ok(None) => debug!("School {} has no default grading system", school.id),
            Err(e) => warn!("Failed to load default grading system of school {}: {}", school.id, e),
        }
    }

    info!(
        "Band cache warmed for {} of {} schools",
        warmed,
        schools.len()
    );
}

/// 准备服务器启动的上下文
/// 包括存储初始化（含迁移）与缓存预热
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    warm_band_cache(&storage).await;

    StartupContext { storage }
}
