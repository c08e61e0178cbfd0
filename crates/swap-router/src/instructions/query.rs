//! 只读查询，不修改暂停或重入状态

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::curve::{FeeBreakdown, Fees};
use crate::error::Result;
use crate::router::SwapRouter;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolStateReport {
    pub pool_exists: bool,
    /// 池子不存在时为 0
    pub pool_liquidity: u128,
    pub exchange_allowance_for_wrapped: u64,
    pub exchange_allowance_for_token: u64,
    pub own_wrapped_balance: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserApprovalReport {
    /// 用户给路由器的代币授权
    pub allowance: u64,
    pub balance: u64,
}

impl SwapRouter {
    pub fn paused(&self) -> bool {
        self.state.pause_gate.is_paused()
    }

    pub fn creator_wallet(&self) -> Pubkey {
        self.state.creator_wallet()
    }

    pub fn check_pool_state(&self) -> PoolStateReport {
        let router = self.config.router;
        let exchange = self.config.exchange;
        let liquidity = self.exchange.pool_liquidity(&self.config.pool);

        PoolStateReport {
            pool_exists: liquidity.is_some(),
            pool_liquidity: liquidity.unwrap_or_default(),
            exchange_allowance_for_wrapped: self.wrapped_ledger.allowance(&router, &exchange),
            exchange_allowance_for_token: self.token_ledger.allowance(&router, &exchange),
            own_wrapped_balance: self.wrapped_ledger.balance_of(&router),
        }
    }

    pub fn check_user_approval(&self, user: &Pubkey) -> UserApprovalReport {
        UserApprovalReport {
            allowance: self.token_ledger.allowance(user, &self.config.router),
            balance: self.token_ledger.balance_of(user),
        }
    }

    /// 按交易所返回的毛额估算买入费用
    pub fn estimate_buy_fees(&self, gross_estimate: u64) -> FeeBreakdown {
        Fees::split(gross_estimate, &self.rates)
    }

    /// 卖出时 `net_amount` 即实际交给交易所的数量
    pub fn estimate_sell_fees(&self, input_amount: u64) -> FeeBreakdown {
        Fees::split(input_amount, &self.rates)
    }

    /// 买入时净额下限对应的交易所毛额下限
    pub fn quote_min_gross(&self, min_net: u64) -> Result<u64> {
        Fees::min_gross_for_net(min_net, &self.rates)
    }
}
