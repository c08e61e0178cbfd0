use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::error::{Result, RouterError};
use crate::router::SwapRouter;
use crate::states::RouterEvent;

impl SwapRouter {
    /// 只有管理员可以调用
    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        if *caller != self.config.owner {
            return Err(RouterError::Unauthorized(*caller));
        }
        Ok(())
    }

    /// 更新创建者费用的接收地址
    ///
    /// # 参数
    ///
    /// * `caller` - 必须是管理员
    /// * `new_wallet` - 新地址，不能为零地址，也不能与当前地址相同
    ///
    pub fn set_creator_wallet(&self, caller: &Pubkey, new_wallet: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        let _guard = self.gate.acquire()?;

        if new_wallet == Pubkey::default() {
            return Err(RouterError::InvalidInput("creator wallet cannot be the zero address".to_string()));
        }
        if new_wallet == self.state.creator_wallet() {
            return Err(RouterError::InvalidInput("creator wallet unchanged".to_string()));
        }

        let old = self.state.replace_creator_wallet(new_wallet);
        info!("🔧 creator wallet {} -> {}", old, new_wallet);
        self.publish(RouterEvent::CreatorWalletChanged { old, new: new_wallet });
        Ok(())
    }

    /// 重新给交易所两种资产的最大授权，可重复调用
    pub fn recover_approvals(&self, caller: &Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        let _guard = self.gate.acquire()?;

        let spender = self.config.exchange;
        self.atomically(|events| {
            self.ensure_approvals()?;
            events.push(RouterEvent::ApprovalsRecovered { spender });
            Ok(())
        })?;
        info!("🔧 approvals to {} recovered", spender);
        Ok(())
    }

    /// 暂停交易
    pub fn pause(&self, caller: &Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        let _guard = self.gate.acquire()?;

        self.state.pause_gate.pause()?;
        info!("⏸️ trading paused by {}", caller);
        self.publish(RouterEvent::Paused { by: *caller });
        Ok(())
    }

    /// 恢复交易
    pub fn unpause(&self, caller: &Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        let _guard = self.gate.acquire()?;

        self.state.pause_gate.unpause()?;
        info!("▶️ trading resumed by {}", caller);
        self.publish(RouterEvent::Unpaused { by: *caller });
        Ok(())
    }
}
