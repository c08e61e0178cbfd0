use solana_sdk::pubkey::Pubkey;

use super::ledger::LedgerError;

/// 原生资产的转账通道
pub trait NativeBank: Send + Sync {
    fn balance_of(&self, owner: &Pubkey) -> u64;

    /// 随可支付调用附带的原生资产，从 `from` 记入 `to`
    fn collect(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError>;

    /// 返回值是传输层的成功信号，`false` 也必须视为失败
    fn send(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> bool;
}

/// 原生资产与其可交易包装形式之间的 1:1 转换
pub trait NativeWrapper: Send + Sync {
    /// 包装资产的 mint
    fn wrapped_asset(&self) -> Pubkey;

    /// 消耗 `caller` 的原生余额，记入等量包装资产
    fn wrap(&self, caller: &Pubkey, amount: u64) -> Result<(), LedgerError>;

    /// 销毁 `caller` 的包装资产，释放等量原生余额
    fn unwrap(&self, caller: &Pubkey, amount: u64) -> Result<(), LedgerError>;
}
