//! 销毁费与创建者费的拆分计算，纯函数，无 I/O

use serde::Serialize;

use crate::error::{Result, RouterError};
use crate::utils::math::{CheckedCeilDiv, DownCast};

/// 销毁费率（bps）
pub const BURN_FEE_RATE_BPS: u64 = 25;
/// 创建者费率（bps）
pub const CREATOR_FEE_RATE_BPS: u64 = 25;
pub const FEE_RATE_DENOMINATOR_BPS: u64 = 10_000;

/// 进程内固定的费率配置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeeRates {
    burn_rate_bps: u64,
    creator_rate_bps: u64,
    denominator_bps: u64,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl FeeRates {
    pub const STANDARD: FeeRates = FeeRates {
        burn_rate_bps: BURN_FEE_RATE_BPS,
        creator_rate_bps: CREATOR_FEE_RATE_BPS,
        denominator_bps: FEE_RATE_DENOMINATOR_BPS,
    };

    /// 要求 `burn + creator < denominator`
    pub fn new(burn_rate_bps: u64, creator_rate_bps: u64, denominator_bps: u64) -> Result<Self> {
        let rates = Self {
            burn_rate_bps,
            creator_rate_bps,
            denominator_bps,
        };
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> Result<()> {
        let total = self
            .burn_rate_bps
            .checked_add(self.creator_rate_bps)
            .ok_or(RouterError::MathOverflow)?;
        if self.denominator_bps == 0 || total >= self.denominator_bps {
            return Err(RouterError::InvalidConfig(format!(
                "fee rates {}+{} must stay below denominator {}",
                self.burn_rate_bps, self.creator_rate_bps, self.denominator_bps
            )));
        }
        Ok(())
    }

    pub fn burn_rate_bps(&self) -> u64 {
        self.burn_rate_bps
    }

    pub fn creator_rate_bps(&self) -> u64 {
        self.creator_rate_bps
    }

    pub fn denominator_bps(&self) -> u64 {
        self.denominator_bps
    }

    pub fn total_rate_bps(&self) -> u64 {
        self.burn_rate_bps + self.creator_rate_bps
    }
}

/// 一次拆分的结果。
/// `burn_amount + creator_amount + net_amount == gross`，
/// `total_fee_amount == burn_amount + creator_amount`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub burn_amount: u64,
    pub creator_amount: u64,
    pub net_amount: u64,
    pub total_fee_amount: u64,
}

pub struct Fees {}

fn ceil_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount.checked_mul(numerator)?.checked_ceil_div(denominator)
}

impl Fees {
    /// 费用一律向下取整，永不向上。
    pub fn split(gross_amount: u64, rates: &FeeRates) -> FeeBreakdown {
        let gross = u128::from(gross_amount);
        let denominator = u128::from(rates.denominator_bps);
        // rate < denominator，结果不超过 gross，乘积在 u128 内
        let burn_amount = (gross * u128::from(rates.burn_rate_bps) / denominator) as u64;
        let creator_amount = (gross * u128::from(rates.creator_rate_bps) / denominator) as u64;
        let total_fee_amount = burn_amount + creator_amount;

        FeeBreakdown {
            burn_amount,
            creator_amount,
            net_amount: gross_amount - total_fee_amount,
            total_fee_amount,
        }
    }

    /// 买入方向：用户要求净额至少 `min_net` 时，交易所至少要返回的毛额。
    /// 向上取整，保证拆分后 `net >= min_net`；`min_net == 0` 时不设下限。
    pub fn min_gross_for_net(min_net: u64, rates: &FeeRates) -> Result<u64> {
        if min_net == 0 {
            return Ok(0);
        }
        let denominator = u128::from(rates.denominator_bps);
        let kept = denominator
            .checked_sub(u128::from(rates.total_rate_bps()))
            .ok_or(RouterError::MathOverflow)?;

        ceil_div(u128::from(min_net), denominator, kept)
            .and_then(|gross| gross.to_u64())
            .ok_or(RouterError::MathOverflow)
    }
}
