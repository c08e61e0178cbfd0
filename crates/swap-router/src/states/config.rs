use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::error::{Result, RouterError};
use crate::states::events::pubkey_string;

/// 默认池子费率档位 0.3%（百分之bip）
pub const DEFAULT_POOL_FEE_TIER: u32 = 3_000;

/// 构造时固定、此后不再修改的地址配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouterConfig {
    /// 路由器自身的地址，交易所输出的接收方
    #[serde(with = "pubkey_string")]
    pub router: Pubkey,
    /// 管理员
    #[serde(with = "pubkey_string")]
    pub owner: Pubkey,
    /// 被交易的代币
    #[serde(with = "pubkey_string")]
    pub token_mint: Pubkey,
    /// 原生资产的包装形式
    #[serde(with = "pubkey_string")]
    pub wrapped_native_mint: Pubkey,
    #[serde(with = "pubkey_string")]
    pub exchange: Pubkey,
    #[serde(with = "pubkey_string")]
    pub pool: Pubkey,
    /// 销毁地址，余额永久不可花费
    #[serde(with = "pubkey_string")]
    pub burn_address: Pubkey,
    pub pool_fee_tier: u32,
}

impl RouterConfig {
    /// 从字符串形式的地址构建配置
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        router: &str,
        owner: &str,
        token_mint: &str,
        wrapped_native_mint: &str,
        exchange: &str,
        pool: &str,
        burn_address: &str,
        pool_fee_tier: u32,
    ) -> Result<Self> {
        let config = Self {
            router: parse_pubkey("router", router)?,
            owner: parse_pubkey("owner", owner)?,
            token_mint: parse_pubkey("token_mint", token_mint)?,
            wrapped_native_mint: parse_pubkey("wrapped_native_mint", wrapped_native_mint)?,
            exchange: parse_pubkey("exchange", exchange)?,
            pool: parse_pubkey("pool", pool)?,
            burn_address: parse_pubkey("burn_address", burn_address)?,
            pool_fee_tier,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_mint == self.wrapped_native_mint {
            return Err(RouterError::InvalidConfig(
                "token mint and wrapped native mint must differ".to_string(),
            ));
        }
        if self.router == Pubkey::default() || self.owner == Pubkey::default() {
            return Err(RouterError::InvalidConfig("router and owner must be set".to_string()));
        }
        Ok(())
    }
}

pub fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|e| RouterError::InvalidConfig(format!("{}: {} ({})", field, value, e)))
}
