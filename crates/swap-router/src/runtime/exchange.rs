use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::debug;

use super::chain::{ChainState, MemoryChain};
use crate::curve::constant_product::ConstantProductCurve;
use crate::interfaces::{ExactInputSingleParams, Exchange, ExchangeError, LedgerError};
use crate::utils::math::DownCast;

/// 恒定乘积交易所，储备即池子地址在账本上的余额
#[derive(Clone, Debug)]
pub struct ConstantProductExchange {
    chain: Arc<MemoryChain>,
    id: Pubkey,
}

impl ConstantProductExchange {
    pub fn new(chain: Arc<MemoryChain>, id: Pubkey) -> Self {
        Self { chain, id }
    }

    /// 不改变状态的报价
    pub fn quote(&self, token_in: &Pubkey, token_out: &Pubkey, fee: u32, amount_in: u64) -> Result<u64, ExchangeError> {
        let state = self.chain.state();
        let pool = find_pool(&state, token_in, token_out, fee)?;
        quote_in_pool(&state, &pool, token_in, token_out, fee, amount_in)
    }

    fn pull_input(&self, state: &mut ChainState, params: &ExactInputSingleParams, pool: &Pubkey) -> Result<(), LedgerError> {
        let approved = state.allowance(&params.token_in, &params.payer, &self.id);
        if approved < params.amount_in {
            return Err(LedgerError::InsufficientAllowance {
                required: params.amount_in,
                approved,
            });
        }
        state.move_tokens(&params.token_in, &params.payer, pool, params.amount_in)?;
        if approved != u64::MAX {
            state
                .allowances
                .insert((params.token_in, params.payer, self.id), approved - params.amount_in);
        }
        Ok(())
    }
}

fn find_pool(state: &ChainState, token_in: &Pubkey, token_out: &Pubkey, fee: u32) -> Result<Pubkey, ExchangeError> {
    state
        .pools
        .iter()
        .find(|(_, info)| info.matches(token_in, token_out, fee))
        .map(|(pool, _)| *pool)
        .ok_or(ExchangeError::PoolNotFound(*token_in, *token_out))
}

fn quote_in_pool(
    state: &ChainState,
    pool: &Pubkey,
    token_in: &Pubkey,
    token_out: &Pubkey,
    fee: u32,
    amount_in: u64,
) -> Result<u64, ExchangeError> {
    let reserve_in = state.token_balance(token_in, pool);
    let reserve_out = state.token_balance(token_out, pool);
    let amount_out = ConstantProductCurve::swap_base_input(
        u128::from(amount_in),
        u128::from(reserve_in),
        u128::from(reserve_out),
        u64::from(fee),
    )
    .and_then(|out| out.to_u64())
    .ok_or(ExchangeError::InsufficientLiquidity)?;

    if amount_out == 0 || amount_out >= reserve_out {
        return Err(ExchangeError::InsufficientLiquidity);
    }
    Ok(amount_out)
}

/// 整数平方根
fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

impl Exchange for ConstantProductExchange {
    fn id(&self) -> Pubkey {
        self.id
    }

    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<u64, ExchangeError> {
        if let Some(reason) = self.chain.faults().swap_failure.clone() {
            return Err(ExchangeError::Rejected(reason));
        }

        let mut state = self.chain.state();
        let pool = find_pool(&state, &params.token_in, &params.token_out, params.fee)?;
        let amount_out = quote_in_pool(
            &state,
            &pool,
            &params.token_in,
            &params.token_out,
            params.fee,
            params.amount_in,
        )?;
        if amount_out < params.amount_out_minimum {
            return Err(ExchangeError::TooLittleReceived {
                minimum: params.amount_out_minimum,
                quoted: amount_out,
            });
        }

        self.pull_input(&mut state, &params, &pool)
            .map_err(|e| ExchangeError::InputTransfer(e.to_string()))?;
        state
            .move_tokens(&params.token_out, &pool, &params.recipient, amount_out)
            .map_err(|_| ExchangeError::InsufficientLiquidity)?;

        debug!(
            "pool {}: {} {} -> {} {}",
            pool, params.amount_in, params.token_in, amount_out, params.token_out
        );
        Ok(amount_out)
    }

    fn pool_liquidity(&self, pool: &Pubkey) -> Option<u128> {
        let state = self.chain.state();
        let info = state.pools.get(pool)?;
        let reserve_a = u128::from(state.token_balance(&info.token_a, pool));
        let reserve_b = u128::from(state.token_balance(&info.token_b, pool));
        Some(isqrt(reserve_a * reserve_b))
    }
}
