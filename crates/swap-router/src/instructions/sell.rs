use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::curve::Fees;
use crate::error::{Result, RouterError};
use crate::router::SwapRouter;
use crate::states::*;
use crate::utils::transfer_from_user_to_router;

impl SwapRouter {
    /// 卖出代币换回原生资产，返回付给用户的原生资产数量
    ///
    /// 费用在交换之前从输入中扣除，交易所只交换扣费后的净额。
    ///
    /// # 参数
    ///
    /// * `initiator` - 卖出方，需事先授权路由器至少 `input_amount`
    /// * `input_amount` - 卖出的代币数量（含费用）
    /// * `min_output` - 最少换回的原生资产，原样作为交易所的下限，0 表示不限制
    ///
    pub fn sell(&self, initiator: Pubkey, input_amount: u64, min_output: u64) -> Result<u64> {
        self.state.pause_gate.ensure_active()?;
        let _guard = self.gate.acquire()?;
        if input_amount == 0 {
            return Err(RouterError::InvalidInput("input amount must be greater than zero".to_string()));
        }

        let mut progress = TradeProgress::start(TradeDirection::TokenToNative);
        let result = self.atomically(|events| self.sell_inner(&mut progress, initiator, input_amount, min_output, events));
        match &result {
            Ok(paid) => {
                progress.finish();
                info!("🟢 sell by {}: {} token -> {} native", initiator, input_amount, paid);
            }
            Err(e) => progress.revert(e),
        }
        result
    }

    fn sell_inner(
        &self,
        progress: &mut TradeProgress,
        initiator: Pubkey,
        input_amount: u64,
        min_output: u64,
        events: &mut Vec<RouterEvent>,
    ) -> Result<u64> {
        progress.enter(SwapStage::WrappingOrReceiving);
        transfer_from_user_to_router(self.token_ledger.as_ref(), &self.config.router, &initiator, input_amount)?;

        progress.enter(SwapStage::Distributing);
        let breakdown = Fees::split(input_amount, &self.rates);
        let swap_amount = breakdown.net_amount;
        self.distribute_fees(self.config.token_mint, breakdown.burn_amount, breakdown.creator_amount, events)?;

        progress.enter(SwapStage::Exchanging);
        let amount_out = self.swap_exact_input(
            self.config.token_mint,
            self.config.wrapped_native_mint,
            swap_amount,
            min_output,
        )?;
        // 与交易所下限同一个整数比较，不存在舍入差
        if min_output > 0 && amount_out < min_output {
            return Err(RouterError::SlippageExceeded {
                minimum: min_output,
                actual: amount_out,
            });
        }

        progress.enter(SwapStage::PayingOut);
        self.wrap_adapter.unwrap_out(amount_out)?;
        self.wrap_adapter.pay_out(&initiator, amount_out)?;

        events.push(RouterEvent::TradeCompleted(TradeRecord {
            initiator,
            input_asset: self.config.token_mint,
            output_asset: self.config.wrapped_native_mint,
            input_amount,
            output_amount: amount_out,
            burn_amount: breakdown.burn_amount,
            creator_amount: breakdown.creator_amount,
        }));
        Ok(amount_out)
    }
}
