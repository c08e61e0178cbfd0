use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

/// Pubkey 以 base58 字符串序列化
pub mod pubkey_string {
    use serde::Serializer;
    use solana_sdk::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }
}

/// 费用接收方
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeSink {
    Burn,
    Creator,
}

/// Emitted when a trade completes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradeRecord {
    #[serde(with = "pubkey_string")]
    pub initiator: Pubkey,
    /// 买入时为包装原生资产，卖出时为代币
    #[serde(with = "pubkey_string")]
    pub input_asset: Pubkey,
    #[serde(with = "pubkey_string")]
    pub output_asset: Pubkey,
    pub input_amount: u64,
    /// amount delivered to the initiator, after fees
    pub output_amount: u64,
    pub burn_amount: u64,
    pub creator_amount: u64,
}

/// 路由器对外发布的全部事件，只追加
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    TradeCompleted(TradeRecord),
    FeeSinkCredited {
        sink: FeeSink,
        #[serde(with = "pubkey_string")]
        recipient: Pubkey,
        #[serde(with = "pubkey_string")]
        asset: Pubkey,
        amount: u64,
    },
    CreatorWalletChanged {
        #[serde(with = "pubkey_string")]
        old: Pubkey,
        #[serde(with = "pubkey_string")]
        new: Pubkey,
    },
    Paused {
        #[serde(with = "pubkey_string")]
        by: Pubkey,
    },
    Unpaused {
        #[serde(with = "pubkey_string")]
        by: Pubkey,
    },
    ApprovalsRecovered {
        #[serde(with = "pubkey_string")]
        spender: Pubkey,
    },
}

impl RouterEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RouterEvent::TradeCompleted(_) => "trade_completed",
            RouterEvent::FeeSinkCredited { .. } => "fee_sink_credited",
            RouterEvent::CreatorWalletChanged { .. } => "creator_wallet_changed",
            RouterEvent::Paused { .. } => "paused",
            RouterEvent::Unpaused { .. } => "unpaused",
            RouterEvent::ApprovalsRecovered { .. } => "approvals_recovered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_tag_and_base58_keys() {
        let initiator = Pubkey::new_unique();
        let event = RouterEvent::TradeCompleted(TradeRecord {
            initiator,
            input_asset: Pubkey::new_unique(),
            output_asset: Pubkey::new_unique(),
            input_amount: 10,
            output_amount: 9,
            burn_amount: 0,
            creator_amount: 0,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "trade_completed");
        assert_eq!(json["initiator"], initiator.to_string());
        assert_eq!(json["output_amount"], 9);
        assert_eq!(event.name(), "trade_completed");
    }

    #[test]
    fn fee_sink_event_names_the_sink() {
        let event = RouterEvent::FeeSinkCredited {
            sink: FeeSink::Burn,
            recipient: Pubkey::new_unique(),
            asset: Pubkey::new_unique(),
            amount: 5,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sink"], "burn");
    }
}
