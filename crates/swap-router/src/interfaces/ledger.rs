use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u64, approved: u64 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("balance overflow")]
    Overflow,
}

/// 单一资产的余额账本（ERC20 风格）。
///
/// 转账类方法返回 `Ok(false)` 表示账本拒绝但未报错，调用方必须检查返回值。
pub trait TokenLedger: Send + Sync {
    /// 资产标识（mint）
    fn asset(&self) -> Pubkey;

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<bool, LedgerError>;

    /// `spender` 代表 `owner` 转出，消耗 `owner` 给 `spender` 的授权
    fn transfer_from(&self, spender: &Pubkey, owner: &Pubkey, to: &Pubkey, amount: u64) -> Result<bool, LedgerError>;

    fn approve(&self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<bool, LedgerError>;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64;

    fn balance_of(&self, owner: &Pubkey) -> u64;
}
