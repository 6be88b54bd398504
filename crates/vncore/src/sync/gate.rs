//! 翻譯互斥閘門
//!
//! 兩個翻譯方向共用同一個閘門。`GatePermit` 被丟棄時自動釋放，
//! 因此翻譯成功、失敗或工作被中途丟棄都會解除鎖定。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 翻譯閘門
#[derive(Debug, Default)]
pub struct TranslationGate {
    busy: Arc<AtomicBool>,
}

impl TranslationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 嘗試取得閘門；已被佔用時回傳 `None`
    pub fn try_acquire(&self) -> Option<GatePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GatePermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// 持有中的閘門，丟棄時釋放
#[derive(Debug)]
pub struct GatePermit {
    busy: Arc<AtomicBool>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
