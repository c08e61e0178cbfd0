use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use tracing::{debug, warn};

/// 交易方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    /// 原生资产买入代币
    NativeToToken,
    /// 代币卖出为原生资产
    TokenToNative,
}

/// 单次调用构造的交易请求，不持久化
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRequest {
    pub direction: TradeDirection,
    pub input_amount: u64,
    /// 0 表示不设下限
    pub min_output: u64,
    pub initiator: Pubkey,
}

impl TradeRequest {
    pub fn buy(initiator: Pubkey, native_value: u64, min_output: u64) -> Self {
        Self {
            direction: TradeDirection::NativeToToken,
            input_amount: native_value,
            min_output,
            initiator,
        }
    }

    pub fn sell(initiator: Pubkey, input_amount: u64, min_output: u64) -> Self {
        Self {
            direction: TradeDirection::TokenToNative,
            input_amount,
            min_output,
            initiator,
        }
    }
}

/// 交易状态机
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapStage {
    Idle,
    WrappingOrReceiving,
    Exchanging,
    Distributing,
    PayingOut,
    Reverted,
}

impl fmt::Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapStage::Idle => "idle",
            SwapStage::WrappingOrReceiving => "wrapping_or_receiving",
            SwapStage::Exchanging => "exchanging",
            SwapStage::Distributing => "distributing",
            SwapStage::PayingOut => "paying_out",
            SwapStage::Reverted => "reverted",
        };
        f.write_str(name)
    }
}

/// 记录一次交易所处的阶段，失败时从当前阶段转入 Reverted
#[derive(Debug)]
pub struct TradeProgress {
    direction: TradeDirection,
    stage: SwapStage,
}

impl TradeProgress {
    pub fn start(direction: TradeDirection) -> Self {
        Self {
            direction,
            stage: SwapStage::Idle,
        }
    }

    pub fn stage(&self) -> SwapStage {
        self.stage
    }

    pub fn enter(&mut self, next: SwapStage) {
        debug!("{:?}: {} -> {}", self.direction, self.stage, next);
        self.stage = next;
    }

    pub fn revert(&mut self, reason: &dyn fmt::Display) {
        warn!("🔴 {:?} reverted at {}: {}", self.direction, self.stage, reason);
        self.stage = SwapStage::Reverted;
    }

    pub fn finish(&mut self) {
        self.enter(SwapStage::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_walks_the_stages() {
        let mut progress = TradeProgress::start(TradeDirection::NativeToToken);
        assert_eq!(progress.stage(), SwapStage::Idle);
        for stage in [
            SwapStage::WrappingOrReceiving,
            SwapStage::Exchanging,
            SwapStage::Distributing,
            SwapStage::PayingOut,
        ] {
            progress.enter(stage);
            assert_eq!(progress.stage(), stage);
        }
        progress.finish();
        assert_eq!(progress.stage(), SwapStage::Idle);
    }

    #[test]
    fn revert_is_terminal() {
        let mut progress = TradeProgress::start(TradeDirection::TokenToNative);
        progress.enter(SwapStage::Exchanging);
        progress.revert(&"pool drained");
        assert_eq!(progress.stage(), SwapStage::Reverted);
    }
}
