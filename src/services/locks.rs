//! 按业务单元加锁
//!
//! 同一考试的成绩写入、同一系列的汇总重建各自串行，不同单元互不影响。

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 考试级锁：成绩导入、试卷录入、状态流转、添加试卷
pub static EXAM_LOCKS: Lazy<UnitLocks> = Lazy::new(UnitLocks::new);

/// 考试系列级锁：学期汇总重建
pub static SERIES_LOCKS: Lazy<UnitLocks> = Lazy::new(UnitLocks::new);

#[derive(Default)]
pub struct UnitLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl UnitLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// 获取某个单元的锁，持有期间同一单元的其他请求等待
    pub async fn lock(&self, unit_id: i64) -> UnitGuard<'_> {
        // 先克隆出 Arc 再等待，避免持有 DashMap 分片锁跨越 await
        let mutex = self
            .locks
            .entry(unit_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        UnitGuard {
            locks: self,
            unit_id,
            guard: Some(mutex.lock_owned().await),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// 单元锁的持有凭证，释放时若已无人等待则清理对应条目
pub struct UnitGuard<'a> {
    locks: &'a UnitLocks,
    unit_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UnitGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // 只剩表内一份引用时才移除；等待者各自持有一份 Arc
        self.locks
            .locks
            .remove_if(&self.unit_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
