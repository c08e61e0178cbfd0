use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::curve::Fees;
use crate::error::{Result, RouterError};
use crate::router::SwapRouter;
use crate::states::*;
use crate::utils::transfer_from_router;

impl SwapRouter {
    /// 用原生资产买入代币，返回扣费后付给用户的代币数量
    ///
    /// # 参数
    ///
    /// * `initiator` - 付款并接收代币的用户
    /// * `native_value` - 随调用附带的原生资产数量
    /// * `min_output` - 用户最少要拿到的代币净额，0 表示不限制
    ///
    pub fn buy(&self, initiator: Pubkey, native_value: u64, min_output: u64) -> Result<u64> {
        self.state.pause_gate.ensure_active()?;
        let _guard = self.gate.acquire()?;
        if native_value == 0 {
            return Err(RouterError::InvalidInput("native value must be greater than zero".to_string()));
        }

        let mut progress = TradeProgress::start(TradeDirection::NativeToToken);
        let result = self.atomically(|events| self.buy_inner(&mut progress, initiator, native_value, min_output, events));
        match &result {
            Ok(net) => {
                progress.finish();
                info!("🟢 buy by {}: {} native -> {} token", initiator, native_value, net);
            }
            Err(e) => progress.revert(e),
        }
        result
    }

    fn buy_inner(
        &self,
        progress: &mut TradeProgress,
        initiator: Pubkey,
        native_value: u64,
        min_output: u64,
        events: &mut Vec<RouterEvent>,
    ) -> Result<u64> {
        let router = self.config.router;

        // 交易所的下限按扣费前的毛额换算，向上取整；超出 u64 的下限不可能被满足
        let min_gross = Fees::min_gross_for_net(min_output, &self.rates).map_err(|_| RouterError::SlippageExceeded {
            minimum: min_output,
            actual: 0,
        })?;

        progress.enter(SwapStage::WrappingOrReceiving);
        self.native.collect(&initiator, &router, native_value)?;
        self.wrap_adapter.wrap_in(native_value)?;

        progress.enter(SwapStage::Exchanging);
        let gross = self.swap_exact_input(
            self.config.wrapped_native_mint,
            self.config.token_mint,
            native_value,
            min_gross,
        )?;

        progress.enter(SwapStage::Distributing);
        let breakdown = Fees::split(gross, &self.rates);
        if min_output > 0 && breakdown.net_amount < min_output {
            return Err(RouterError::SlippageExceeded {
                minimum: min_output,
                actual: breakdown.net_amount,
            });
        }
        self.distribute_fees(self.config.token_mint, breakdown.burn_amount, breakdown.creator_amount, events)?;

        progress.enter(SwapStage::PayingOut);
        transfer_from_router(self.token_ledger.as_ref(), &router, &initiator, breakdown.net_amount)?;

        events.push(RouterEvent::TradeCompleted(TradeRecord {
            initiator,
            input_asset: self.config.wrapped_native_mint,
            output_asset: self.config.token_mint,
            input_amount: native_value,
            output_amount: breakdown.net_amount,
            burn_amount: breakdown.burn_amount,
            creator_amount: breakdown.creator_amount,
        }));
        Ok(breakdown.net_amount)
    }
}
