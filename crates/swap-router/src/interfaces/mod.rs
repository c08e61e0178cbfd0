//! 路由器依赖的外部协作方接口
pub mod exchange;
pub mod journal;
pub mod ledger;
pub mod native;

pub use exchange::*;
pub use journal::*;
pub use ledger::*;
pub use native::*;
