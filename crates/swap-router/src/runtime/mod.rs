//! 确定性的内存运行环境，实现全部外部接口，供命令行与测试使用

pub mod chain;
pub mod exchange;
pub mod ledger;
pub mod native;

pub use chain::*;
pub use exchange::*;
pub use ledger::*;
pub use native::*;

use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::error::Result;
use crate::interfaces::{Exchange, TokenLedger};
use crate::observer::{EventBus, MemoryEventLog};
use crate::router::{RouterDeps, SwapRouter};
use crate::states::RouterConfig;

/// 模拟环境的初始资金
#[derive(Clone, Debug)]
pub struct SimulationSeed {
    /// 池子中的包装原生资产储备
    pub pool_native_reserve: u64,
    pub pool_token_reserve: u64,
    pub user_native: u64,
    pub user_token: u64,
}

impl Default for SimulationSeed {
    fn default() -> Self {
        Self {
            pool_native_reserve: 1_000_000_000_000,
            pool_token_reserve: 1_000_000_000_000,
            user_native: 10_000_000_000,
            user_token: 10_000_000_000,
        }
    }
}

/// 一个装配好的路由器及其独占的内存链
pub struct Simulation {
    pub chain: Arc<MemoryChain>,
    pub token: Arc<MemoryLedger>,
    pub wrapped: Arc<MemoryLedger>,
    pub native: Arc<MemoryNativeBank>,
    pub wrapper: Arc<MemoryWrapper>,
    pub exchange: Arc<ConstantProductExchange>,
    pub router: Arc<SwapRouter>,
    pub events: Arc<MemoryEventLog>,
    pub user: Pubkey,
}

impl Simulation {
    /// 随机地址的默认环境
    pub fn standard() -> Result<Self> {
        let config = RouterConfig {
            router: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            wrapped_native_mint: Pubkey::new_unique(),
            exchange: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            burn_address: Pubkey::new_unique(),
            pool_fee_tier: crate::states::DEFAULT_POOL_FEE_TIER,
        };
        Self::build(config, Pubkey::new_unique(), SimulationSeed::default(), EventBus::new())
    }

    pub fn build(config: RouterConfig, creator_wallet: Pubkey, seed: SimulationSeed, events: EventBus) -> Result<Self> {
        let exchange_id = config.exchange;
        Self::build_with_exchange(config, creator_wallet, seed, events, |chain| {
            Arc::new(ConstantProductExchange::new(chain, exchange_id))
        })
    }

    /// `make_exchange` 可以包一层自定义交易所，测试用来注入行为
    pub fn build_with_exchange<E>(
        config: RouterConfig,
        creator_wallet: Pubkey,
        seed: SimulationSeed,
        events: EventBus,
        make_exchange: impl FnOnce(Arc<MemoryChain>) -> Arc<E>,
    ) -> Result<Self>
    where
        E: Exchange + 'static,
    {
        let chain = Arc::new(MemoryChain::new());
        let token = Arc::new(MemoryLedger::new(chain.clone(), config.token_mint));
        let wrapped = Arc::new(MemoryLedger::new(chain.clone(), config.wrapped_native_mint));
        let native = Arc::new(MemoryNativeBank::new(chain.clone()));
        let wrapper = Arc::new(MemoryWrapper::new(chain.clone(), config.wrapped_native_mint, Pubkey::new_unique()));
        let exchange = Arc::new(ConstantProductExchange::new(chain.clone(), config.exchange));
        let user = Pubkey::new_unique();

        chain.create_pool(
            config.pool,
            PoolInfo {
                token_a: config.wrapped_native_mint,
                token_b: config.token_mint,
                fee: config.pool_fee_tier,
            },
            seed.pool_native_reserve,
            seed.pool_token_reserve,
        )?;
        // 池子里的包装资产由金库中的原生资产足额支撑
        chain.airdrop_native(&wrapper.vault(), seed.pool_native_reserve)?;
        chain.airdrop_native(&user, seed.user_native)?;
        chain.mint_tokens(&config.token_mint, &user, seed.user_token)?;

        let log = Arc::new(MemoryEventLog::new());
        let deps = RouterDeps {
            token_ledger: token.clone(),
            wrapped_ledger: wrapped.clone(),
            wrapper: wrapper.clone(),
            native: native.clone(),
            exchange: make_exchange(chain.clone()),
            journal: chain.clone(),
            events: events.with_sink(log.clone()),
        };
        let router = Arc::new(SwapRouter::new(config, creator_wallet, deps)?);

        Ok(Self {
            chain,
            token,
            wrapped,
            native,
            wrapper,
            exchange,
            router,
            events: log,
            user,
        })
    }

    /// 用户给路由器授权卖出额度
    pub fn approve_router(&self, user: &Pubkey, amount: u64) -> Result<()> {
        self.token.approve(user, &self.router.config().router, amount)?;
        Ok(())
    }
}
