use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use super::chain::MemoryChain;
use crate::interfaces::{LedgerError, NativeBank, NativeWrapper};

/// 原生资产转账通道
#[derive(Clone, Debug)]
pub struct MemoryNativeBank {
    chain: Arc<MemoryChain>,
}

impl MemoryNativeBank {
    pub fn new(chain: Arc<MemoryChain>) -> Self {
        Self { chain }
    }
}

impl NativeBank for MemoryNativeBank {
    fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.chain.native_balance(owner)
    }

    fn collect(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        self.chain.state().move_native(from, to, amount)
    }

    fn send(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> bool {
        if self.chain.faults().rejected_payees.contains(to) {
            return false;
        }
        self.chain.state().move_native(from, to, amount).is_ok()
    }
}

/// 1:1 包装合约，原生资产存放在 `vault` 名下
#[derive(Clone, Debug)]
pub struct MemoryWrapper {
    chain: Arc<MemoryChain>,
    wrapped_asset: Pubkey,
    vault: Pubkey,
}

impl MemoryWrapper {
    pub fn new(chain: Arc<MemoryChain>, wrapped_asset: Pubkey, vault: Pubkey) -> Self {
        Self {
            chain,
            wrapped_asset,
            vault,
        }
    }

    pub fn vault(&self) -> Pubkey {
        self.vault
    }
}

impl NativeWrapper for MemoryWrapper {
    fn wrapped_asset(&self) -> Pubkey {
        self.wrapped_asset
    }

    fn wrap(&self, caller: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let shortfall = self.chain.faults().wrap_shortfall;
        let mut state = self.chain.state();
        state.move_native(caller, &self.vault, amount)?;
        state.mint_tokens(&self.wrapped_asset, caller, amount.saturating_sub(shortfall))
    }

    fn unwrap(&self, caller: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let mut state = self.chain.state();
        state.burn_tokens(&self.wrapped_asset, caller, amount)?;
        state.move_native(&self.vault, caller, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_then_unwrap_is_one_to_one() {
        let chain = Arc::new(MemoryChain::new());
        let wrapper = MemoryWrapper::new(chain.clone(), Pubkey::new_unique(), Pubkey::new_unique());
        let user = Pubkey::new_unique();
        chain.airdrop_native(&user, 500).unwrap();

        wrapper.wrap(&user, 200).unwrap();
        assert_eq!(chain.native_balance(&user), 300);
        assert_eq!(chain.token_balance(&wrapper.wrapped_asset(), &user), 200);
        assert_eq!(chain.native_balance(&wrapper.vault()), 200);

        wrapper.unwrap(&user, 150).unwrap();
        assert_eq!(chain.native_balance(&user), 450);
        assert_eq!(chain.token_balance(&wrapper.wrapped_asset(), &user), 50);
    }

    #[test]
    fn send_reports_rejection() {
        let chain = Arc::new(MemoryChain::new());
        let bank = MemoryNativeBank::new(chain.clone());
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        chain.airdrop_native(&from, 10).unwrap();

        chain.faults().rejected_payees.insert(to);
        assert!(!bank.send(&from, &to, 5));
        assert_eq!(bank.balance_of(&from), 10);

        chain.faults().rejected_payees.clear();
        assert!(bank.send(&from, &to, 5));
        assert_eq!(bank.balance_of(&to), 5);
        assert!(!bank.send(&from, &to, 50));
    }
}
