use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::info;

use crate::curve::FeeRates;
use crate::error::{Result, RouterError};
use crate::interfaces::{Checkpoint, Exchange, Journal, NativeBank, NativeWrapper, TokenLedger};
use crate::observer::EventBus;
use crate::states::{MutableState, RouterConfig, RouterEvent};
use crate::utils::{approve_max, ReentrancyGate, WrapAdapter};

/// 路由器依赖的外部协作方
#[derive(Clone)]
pub struct RouterDeps {
    pub token_ledger: Arc<dyn TokenLedger>,
    pub wrapped_ledger: Arc<dyn TokenLedger>,
    pub wrapper: Arc<dyn NativeWrapper>,
    pub native: Arc<dyn NativeBank>,
    pub exchange: Arc<dyn Exchange>,
    pub journal: Arc<dyn Journal>,
    pub events: EventBus,
}

/// 带销毁费/创建者费的原生资产 <-> 代币兑换路由
pub struct SwapRouter {
    pub(crate) config: RouterConfig,
    pub(crate) rates: FeeRates,
    pub(crate) state: MutableState,
    pub(crate) gate: ReentrancyGate,
    pub(crate) token_ledger: Arc<dyn TokenLedger>,
    pub(crate) wrapped_ledger: Arc<dyn TokenLedger>,
    pub(crate) native: Arc<dyn NativeBank>,
    pub(crate) exchange: Arc<dyn Exchange>,
    pub(crate) wrap_adapter: WrapAdapter,
    journal: Arc<dyn Journal>,
    events: EventBus,
}

impl SwapRouter {
    /// 校验配置与依赖是否对应，并给交易所建立两种资产的最大授权
    pub fn new(config: RouterConfig, creator_wallet: Pubkey, deps: RouterDeps) -> Result<Self> {
        config.validate()?;
        let rates = FeeRates::STANDARD;
        rates.validate()?;

        if creator_wallet == Pubkey::default() {
            return Err(RouterError::InvalidConfig("creator wallet must be set".to_string()));
        }
        if deps.token_ledger.asset() != config.token_mint {
            return Err(RouterError::InvalidConfig("token ledger does not match token mint".to_string()));
        }
        if deps.wrapped_ledger.asset() != config.wrapped_native_mint
            || deps.wrapper.wrapped_asset() != config.wrapped_native_mint
        {
            return Err(RouterError::InvalidConfig(
                "wrapped ledger/wrapper do not match wrapped native mint".to_string(),
            ));
        }
        if deps.exchange.id() != config.exchange {
            return Err(RouterError::InvalidConfig("exchange id mismatch".to_string()));
        }

        let wrap_adapter = WrapAdapter::new(
            config.router,
            deps.wrapper.clone(),
            deps.wrapped_ledger.clone(),
            deps.native.clone(),
        );

        let router = Self {
            config,
            rates,
            state: MutableState::new(creator_wallet),
            gate: ReentrancyGate::default(),
            token_ledger: deps.token_ledger,
            wrapped_ledger: deps.wrapped_ledger,
            native: deps.native,
            exchange: deps.exchange,
            wrap_adapter,
            journal: deps.journal,
            events: deps.events,
        };

        router.atomically(|_| router.ensure_approvals())?;
        info!(
            "✅ router {} ready: token={}, wrapped={}, pool={}",
            router.config.router, router.config.token_mint, router.config.wrapped_native_mint, router.config.pool
        );
        Ok(router)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn rates(&self) -> &FeeRates {
        &self.rates
    }

    /// 幂等：给交易所两种资产的最大授权
    pub(crate) fn ensure_approvals(&self) -> Result<()> {
        let router = self.config.router;
        let spender = self.config.exchange;
        approve_max(self.wrapped_ledger.as_ref(), &router, &spender)?;
        approve_max(self.token_ledger.as_ref(), &router, &spender)?;
        Ok(())
    }

    /// 在一个事务检查点内执行 `op`，成功提交并发布缓冲的事件，失败整体回滚
    pub(crate) fn atomically<T>(&self, op: impl FnOnce(&mut Vec<RouterEvent>) -> Result<T>) -> Result<T> {
        let mut tx = Transaction::begin(self.journal.as_ref());
        let mut pending = Vec::new();
        let value = op(&mut pending)?;
        tx.commit();
        self.events.publish_all(&pending);
        Ok(value)
    }

    pub(crate) fn publish(&self, event: RouterEvent) {
        self.events.publish(&event);
    }
}

/// 未提交即被丢弃时回滚，覆盖错误返回与 panic
struct Transaction<'a> {
    journal: &'a dyn Journal,
    checkpoint: Checkpoint,
    committed: bool,
}

impl<'a> Transaction<'a> {
    fn begin(journal: &'a dyn Journal) -> Self {
        Self {
            checkpoint: journal.begin(),
            journal,
            committed: false,
        }
    }

    fn commit(&mut self) {
        self.journal.commit(self.checkpoint);
        self.committed = true;
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.journal.rollback(self.checkpoint);
        }
    }
}
