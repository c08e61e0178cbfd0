use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, RouterError};

/// 单槽执行锁，覆盖一次交易调用的整棵调用树。
#[derive(Debug, Default)]
pub struct ReentrancyGate {
    locked: AtomicBool,
}

impl ReentrancyGate {
    /// 已被持有时立即失败，不触碰其他状态
    pub fn acquire(&self) -> Result<GateGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| RouterError::Reentrancy)?;
        Ok(GateGuard { gate: self })
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// 离开作用域时释放锁，包括错误路径和 panic 展开
#[must_use]
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a ReentrancyGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.locked.store(false, Ordering::Release);
    }
}
