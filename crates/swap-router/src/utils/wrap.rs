use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::interfaces::{NativeBank, NativeWrapper, TokenLedger};

/// 原生资产包装/解包，并通过余额差校验实际效果
pub struct WrapAdapter {
    router: Pubkey,
    wrapper: Arc<dyn NativeWrapper>,
    wrapped_ledger: Arc<dyn TokenLedger>,
    native: Arc<dyn NativeBank>,
}

impl WrapAdapter {
    pub fn new(
        router: Pubkey,
        wrapper: Arc<dyn NativeWrapper>,
        wrapped_ledger: Arc<dyn TokenLedger>,
        native: Arc<dyn NativeBank>,
    ) -> Self {
        Self {
            router,
            wrapper,
            wrapped_ledger,
            native,
        }
    }

    /// 原生 -> 包装，包装资产余额必须恰好增加 `amount`
    pub fn wrap_in(&self, amount: u64) -> Result<()> {
        let before = self.wrapped_ledger.balance_of(&self.router);
        if let Err(e) = self.wrapper.wrap(&self.router, amount) {
            debug!("wrap rejected: {}", e);
            return Err(RouterError::WrapFailure {
                expected: amount,
                credited: 0,
            });
        }
        let credited = self.wrapped_ledger.balance_of(&self.router).saturating_sub(before);
        if credited != amount {
            return Err(RouterError::WrapFailure {
                expected: amount,
                credited,
            });
        }
        Ok(())
    }

    /// 包装 -> 原生，原生余额必须恰好增加 `amount`
    pub fn unwrap_out(&self, amount: u64) -> Result<()> {
        let before = self.native.balance_of(&self.router);
        if let Err(e) = self.wrapper.unwrap(&self.router, amount) {
            debug!("unwrap rejected: {}", e);
            return Err(RouterError::UnwrapFailure {
                expected: amount,
                released: 0,
            });
        }
        let released = self.native.balance_of(&self.router).saturating_sub(before);
        if released != amount {
            return Err(RouterError::UnwrapFailure {
                expected: amount,
                released,
            });
        }
        Ok(())
    }

    /// 把原生资产付给 `recipient`，传输层返回 `false` 同样视为失败
    pub fn pay_out(&self, recipient: &Pubkey, amount: u64) -> Result<()> {
        if !self.native.send(&self.router, recipient, amount) {
            return Err(RouterError::PayoutFailure {
                recipient: *recipient,
                amount,
            });
        }
        Ok(())
    }
}
