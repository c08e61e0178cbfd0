use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("pool not found for {0} / {1}")]
    PoolNotFound(Pubkey, Pubkey),

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("too little received: minimum {minimum}, quoted {quoted}")]
    TooLittleReceived { minimum: u64, quoted: u64 },

    #[error("input transfer rejected: {0}")]
    InputTransfer(String),

    #[error("{0}")]
    Rejected(String),
}

/// 精确输入的单池交换参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactInputSingleParams {
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    /// 池子费率档位，以百分之bip(10^-6)为单位
    pub fee: u32,
    pub recipient: Pubkey,
    /// 付款方，交易所通过其授权额度拉取输入
    pub payer: Pubkey,
    pub amount_in: u64,
    pub amount_out_minimum: u64,
    /// `None` 表示不设价格限制
    pub sqrt_price_limit_x64: Option<u128>,
}

/// 外部AMM交易所
pub trait Exchange: Send + Sync {
    /// 交易所自身的标识，作为授权对象
    fn id(&self) -> Pubkey;

    /// 执行精确输入交换，返回实际输出数量。
    /// 输出低于 `amount_out_minimum` 时必须失败，不能少付。
    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<u64, ExchangeError>;

    /// 池子不存在时返回 `None`
    fn pool_liquidity(&self, pool: &Pubkey) -> Option<u128>;
}
