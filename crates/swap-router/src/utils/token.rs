use solana_sdk::pubkey::Pubkey;

use crate::error::{Result, RouterError};
use crate::interfaces::ledger::TokenLedger;

/// 从路由器转出，检查账本的成功返回值
pub fn transfer_from_router(ledger: &dyn TokenLedger, router: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    if !ledger.transfer(router, to, amount)? {
        return Err(RouterError::TransferFailed { to: *to, amount });
    }
    Ok(())
}

/// 从用户拉取到路由器，需要用户事先授权
pub fn transfer_from_user_to_router(ledger: &dyn TokenLedger, router: &Pubkey, user: &Pubkey, amount: u64) -> Result<()> {
    let approved = ledger.allowance(user, router);
    if approved < amount {
        return Err(RouterError::InsufficientAllowance {
            required: amount,
            approved,
        });
    }
    if !ledger.transfer_from(router, user, router, amount)? {
        return Err(RouterError::TransferFailed { to: *router, amount });
    }
    Ok(())
}

/// 给 `spender` 最大授权
pub fn approve_max(ledger: &dyn TokenLedger, owner: &Pubkey, spender: &Pubkey) -> Result<()> {
    if !ledger.approve(owner, spender, u64::MAX)? {
        return Err(RouterError::ApprovalFailed(*spender));
    }
    Ok(())
}
