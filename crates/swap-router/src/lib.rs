//! 原生资产与代币之间的兑换路由：每笔交易抽取销毁费和创建者费，
//! 通过外部AMM的精确输入交换完成，整笔操作要么全部生效要么全部回滚。

pub mod curve;
pub mod error;
pub mod instructions;
pub mod interfaces;
pub mod observer;
pub mod router;
pub mod runtime;
pub mod states;
pub mod utils;

pub use curve::{FeeBreakdown, FeeRates, Fees};
pub use error::{Result, RouterError};
pub use instructions::{PoolStateReport, UserApprovalReport};
pub use observer::{BroadcastEventSink, EventBus, EventSink, MemoryEventLog, TracingEventSink};
pub use router::{RouterDeps, SwapRouter};
pub use states::{RouterConfig, RouterEvent, TradeDirection, TradeRecord, TradeRequest};
