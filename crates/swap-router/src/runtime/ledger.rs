use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use super::chain::MemoryChain;
use crate::interfaces::{LedgerError, TokenLedger};

/// 内存链上单一资产的账本
#[derive(Clone, Debug)]
pub struct MemoryLedger {
    chain: Arc<MemoryChain>,
    asset: Pubkey,
}

impl MemoryLedger {
    pub fn new(chain: Arc<MemoryChain>, asset: Pubkey) -> Self {
        Self { chain, asset }
    }

    fn rejects(&self, to: &Pubkey) -> bool {
        self.chain.faults().rejected_token_recipients.contains(to)
    }
}

impl TokenLedger for MemoryLedger {
    fn asset(&self) -> Pubkey {
        self.asset
    }

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<bool, LedgerError> {
        if self.rejects(to) {
            return Ok(false);
        }
        self.chain.state().move_tokens(&self.asset, from, to, amount)?;
        Ok(true)
    }

    fn transfer_from(&self, spender: &Pubkey, owner: &Pubkey, to: &Pubkey, amount: u64) -> Result<bool, LedgerError> {
        if self.rejects(to) {
            return Ok(false);
        }
        let mut state = self.chain.state();
        let approved = state.allowance(&self.asset, owner, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        state.move_tokens(&self.asset, owner, to, amount)?;
        // 最大授权视为无限，不递减
        if approved != u64::MAX {
            state.allowances.insert((self.asset, *owner, *spender), approved - amount);
        }
        Ok(true)
    }

    fn approve(&self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<bool, LedgerError> {
        self.chain.state().allowances.insert((self.asset, *owner, *spender), amount);
        Ok(true)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.chain.state().allowance(&self.asset, owner, spender)
    }

    fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.chain.state().token_balance(&self.asset, owner)
    }
}
