//! 路由器可能返回的错误。
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::interfaces::exchange::ExchangeError;
use crate::interfaces::ledger::LedgerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// 输入数量为零或参数无效
    #[error("InvalidInput: {0}")]
    InvalidInput(String),

    /// 卖出前用户未授权足够额度
    #[error("Insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u64, approved: u64 },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// 超过期望的滑点限制
    #[error("Exceeds desired slippage limit: minimum {minimum}, actual {actual}")]
    SlippageExceeded { minimum: u64, actual: u64 },

    #[error("Wrap did not credit the expected amount: expected {expected}, credited {credited}")]
    WrapFailure { expected: u64, credited: u64 },

    #[error("Unwrap did not release the expected amount: expected {expected}, released {released}")]
    UnwrapFailure { expected: u64, released: u64 },

    #[error("External swap failed: {0}")]
    ExternalSwapFailure(#[from] ExchangeError),

    #[error("Native payout of {amount} to {recipient} failed")]
    PayoutFailure { recipient: Pubkey, amount: u64 },

    #[error("Token transfer of {amount} to {to} was not accepted by the ledger")]
    TransferFailed { to: Pubkey, amount: u64 },

    #[error("Approval for {0} was not accepted by the ledger")]
    ApprovalFailed(Pubkey),

    #[error("Trading is paused")]
    Paused,

    #[error("Reentrant call rejected")]
    Reentrancy,

    #[error("Caller {0} is not the owner")]
    Unauthorized(Pubkey),

    #[error("Math overflow")]
    MathOverflow,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<LedgerError> for RouterError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientAllowance { required, approved } => {
                RouterError::InsufficientAllowance { required, approved }
            }
            LedgerError::InsufficientBalance { required, available } => {
                RouterError::InsufficientBalance { required, available }
            }
            LedgerError::Overflow => RouterError::MathOverflow,
        }
    }
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, RouterError>;
