pub mod admin;
pub mod buy;
pub mod query;
pub mod sell;

pub use query::*;

use solana_sdk::pubkey::Pubkey;

use crate::error::{Result, RouterError};
use crate::interfaces::{ExactInputSingleParams, ExchangeError, TokenLedger};
use crate::router::SwapRouter;
use crate::states::*;
use crate::utils::transfer_from_router;

impl SwapRouter {
    /// 执行一次交易方向上的请求
    pub fn execute(&self, request: TradeRequest) -> Result<u64> {
        match request.direction {
            TradeDirection::NativeToToken => self.buy(request.initiator, request.input_amount, request.min_output),
            TradeDirection::TokenToNative => self.sell(request.initiator, request.input_amount, request.min_output),
        }
    }

    fn ledger_for(&self, asset: &Pubkey) -> &dyn TokenLedger {
        if *asset == self.config.token_mint {
            self.token_ledger.as_ref()
        } else {
            self.wrapped_ledger.as_ref()
        }
    }

    /// 精确输入交换，接收方为路由器自身，不设价格限制。
    /// 以路由器余额的实际增量核对交易所的返回值
    pub(crate) fn swap_exact_input(
        &self,
        token_in: Pubkey,
        token_out: Pubkey,
        amount_in: u64,
        amount_out_minimum: u64,
    ) -> Result<u64> {
        let router = self.config.router;
        let output_ledger = self.ledger_for(&token_out);
        let before = output_ledger.balance_of(&router);

        let amount_out = self.exchange.exact_input_single(ExactInputSingleParams {
            token_in,
            token_out,
            fee: self.config.pool_fee_tier,
            recipient: router,
            payer: router,
            amount_in,
            amount_out_minimum,
            sqrt_price_limit_x64: None,
        })?;

        let received = output_ledger.balance_of(&router).saturating_sub(before);
        if received < amount_out {
            return Err(RouterError::ExternalSwapFailure(ExchangeError::Rejected(format!(
                "reported {} but delivered {}",
                amount_out, received
            ))));
        }
        Ok(amount_out)
    }

    /// 先销毁费、再创建者费
    pub(crate) fn distribute_fees(
        &self,
        asset: Pubkey,
        burn_amount: u64,
        creator_amount: u64,
        events: &mut Vec<RouterEvent>,
    ) -> Result<()> {
        let router = self.config.router;
        let ledger = self.ledger_for(&asset);
        let creator_wallet = self.state.creator_wallet();

        transfer_from_router(ledger, &router, &self.config.burn_address, burn_amount)?;
        events.push(RouterEvent::FeeSinkCredited {
            sink: FeeSink::Burn,
            recipient: self.config.burn_address,
            asset,
            amount: burn_amount,
        });

        transfer_from_router(ledger, &router, &creator_wallet, creator_amount)?;
        events.push(RouterEvent::FeeSinkCredited {
            sink: FeeSink::Creator,
            recipient: creator_wallet,
            asset,
            amount: creator_amount,
        });
        Ok(())
    }
}
