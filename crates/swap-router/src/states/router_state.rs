use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::{Result, RouterError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterStatus {
    Active,
    Paused,
}

/// 管理员控制的熔断开关，初始为 Active
#[derive(Debug, Default)]
pub struct PauseGate {
    paused: AtomicBool,
}

impl PauseGate {
    pub fn status(&self) -> RouterStatus {
        if self.paused.load(Ordering::SeqCst) {
            RouterStatus::Paused
        } else {
            RouterStatus::Active
        }
    }

    pub fn is_paused(&self) -> bool {
        self.status() == RouterStatus::Paused
    }

    /// 交易入口的第一道检查
    pub fn ensure_active(&self) -> Result<()> {
        match self.status() {
            RouterStatus::Active => Ok(()),
            RouterStatus::Paused => Err(RouterError::Paused),
        }
    }

    /// Active -> Paused
    pub fn pause(&self) -> Result<()> {
        self.paused
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| RouterError::InvalidInput("already paused".to_string()))
    }

    /// Paused -> Active
    pub fn unpause(&self) -> Result<()> {
        self.paused
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| RouterError::InvalidInput("not paused".to_string()))
    }
}

/// 跨调用持久的可变状态，只有管理员操作会修改
#[derive(Debug)]
pub struct MutableState {
    creator_wallet: RwLock<Pubkey>,
    pub pause_gate: PauseGate,
}

impl MutableState {
    pub fn new(creator_wallet: Pubkey) -> Self {
        Self {
            creator_wallet: RwLock::new(creator_wallet),
            pause_gate: PauseGate::default(),
        }
    }

    pub fn creator_wallet(&self) -> Pubkey {
        *self.creator_wallet.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// 返回旧地址
    pub fn replace_creator_wallet(&self, new_wallet: Pubkey) -> Pubkey {
        let mut wallet = self.creator_wallet.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *wallet, new_wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_gate_transitions() {
        let gate = PauseGate::default();
        assert_eq!(gate.status(), RouterStatus::Active);
        assert!(gate.ensure_active().is_ok());

        gate.pause().unwrap();
        assert!(gate.is_paused());
        assert_eq!(gate.ensure_active(), Err(RouterError::Paused));
        assert!(gate.pause().is_err());

        gate.unpause().unwrap();
        assert_eq!(gate.status(), RouterStatus::Active);
        assert!(gate.unpause().is_err());
    }

    #[test]
    fn creator_wallet_replacement_returns_previous() {
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let state = MutableState::new(first);
        assert_eq!(state.replace_creator_wallet(second), first);
        assert_eq!(state.creator_wallet(), second);
    }
}
