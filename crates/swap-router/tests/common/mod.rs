#![allow(dead_code)]

use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};

use swap_router::interfaces::{ExactInputSingleParams, Exchange, ExchangeError};
use swap_router::runtime::{ConstantProductExchange, MemoryChain, Simulation, SimulationSeed};
use swap_router::states::DEFAULT_POOL_FEE_TIER;
use swap_router::{EventBus, RouterConfig, RouterError, SwapRouter};

pub fn test_config() -> RouterConfig {
    RouterConfig {
        router: Pubkey::new_unique(),
        owner: Pubkey::new_unique(),
        token_mint: Pubkey::new_unique(),
        wrapped_native_mint: Pubkey::new_unique(),
        exchange: Pubkey::new_unique(),
        pool: Pubkey::new_unique(),
        burn_address: Pubkey::new_unique(),
        pool_fee_tier: DEFAULT_POOL_FEE_TIER,
    }
}

/// 按固定数量成交的交易所，输出直接铸给接收方
pub struct FixedOutputExchange {
    chain: Arc<MemoryChain>,
    id: Pubkey,
    output: AtomicU64,
    /// 少交付的数量，返回值仍按 `output` 报告
    shortchange: AtomicU64,
    honor_minimum: bool,
    calls: AtomicUsize,
    last_params: Mutex<Option<ExactInputSingleParams>>,
}

impl FixedOutputExchange {
    pub fn new(chain: Arc<MemoryChain>, id: Pubkey, output: u64, honor_minimum: bool) -> Self {
        Self {
            chain,
            id,
            output: AtomicU64::new(output),
            shortchange: AtomicU64::new(0),
            honor_minimum,
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<ExactInputSingleParams> {
        self.last_params.lock().unwrap().clone()
    }

    pub fn shortchange(&self, amount: u64) {
        self.shortchange.store(amount, Ordering::SeqCst);
    }
}

impl Exchange for FixedOutputExchange {
    fn id(&self) -> Pubkey {
        self.id
    }

    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<u64, ExchangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());

        let output = self.output.load(Ordering::SeqCst);
        if self.honor_minimum && output < params.amount_out_minimum {
            return Err(ExchangeError::TooLittleReceived {
                minimum: params.amount_out_minimum,
                quoted: output,
            });
        }

        let mut state = self.chain.state();
        state
            .move_tokens(&params.token_in, &params.payer, &self.id, params.amount_in)
            .map_err(|e| ExchangeError::InputTransfer(e.to_string()))?;
        let delivered = output.saturating_sub(self.shortchange.load(Ordering::SeqCst));
        state
            .mint_tokens(&params.token_out, &params.recipient, delivered)
            .map_err(|_| ExchangeError::InsufficientLiquidity)?;
        Ok(output)
    }

    fn pool_liquidity(&self, _pool: &Pubkey) -> Option<u128> {
        Some(u128::from(self.output.load(Ordering::SeqCst)))
    }
}

/// 交换途中回调路由器，模拟恶意代币/交易所的重入
pub struct ReentrantExchange {
    inner: ConstantProductExchange,
    router: OnceLock<Weak<SwapRouter>>,
    attacker: Pubkey,
    attempts: Mutex<Vec<Result<u64, RouterError>>>,
    admin_attempts: Mutex<Vec<Result<(), RouterError>>>,
}

impl ReentrantExchange {
    pub fn new(chain: Arc<MemoryChain>, id: Pubkey, attacker: Pubkey) -> Self {
        Self {
            inner: ConstantProductExchange::new(chain, id),
            router: OnceLock::new(),
            attacker,
            attempts: Mutex::new(Vec::new()),
            admin_attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn arm(&self, router: &Arc<SwapRouter>) {
        let _ = self.router.set(Arc::downgrade(router));
    }

    pub fn attempts(&self) -> Vec<Result<u64, RouterError>> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn admin_attempts(&self) -> Vec<Result<(), RouterError>> {
        self.admin_attempts.lock().unwrap().clone()
    }
}

impl Exchange for ReentrantExchange {
    fn id(&self) -> Pubkey {
        self.inner.id()
    }

    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<u64, ExchangeError> {
        if let Some(router) = self.router.get().and_then(Weak::upgrade) {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(router.buy(self.attacker, 1_000, 0));
            attempts.push(router.sell(self.attacker, 1_000, 0));
            let owner = router.config().owner;
            let mut admin_attempts = self.admin_attempts.lock().unwrap();
            admin_attempts.push(router.pause(&owner));
            admin_attempts.push(router.set_creator_wallet(&owner, Pubkey::new_unique()));
        }
        self.inner.exact_input_single(params)
    }

    fn pool_liquidity(&self, pool: &Pubkey) -> Option<u128> {
        self.inner.pool_liquidity(pool)
    }
}

/// 组装使用固定输出交易所的模拟环境，并给包装合约金库注入原生资产以便解包
pub fn fixed_output_simulation(output: u64, honor_minimum: bool, events: EventBus) -> (Simulation, Arc<FixedOutputExchange>) {
    let config = test_config();
    let exchange_id = config.exchange;
    let mut handle = None;
    let sim = Simulation::build_with_exchange(config, Pubkey::new_unique(), SimulationSeed::default(), events, |chain| {
        let exchange = Arc::new(FixedOutputExchange::new(chain, exchange_id, output, honor_minimum));
        handle = Some(exchange.clone());
        exchange
    })
    .unwrap();
    sim.chain.airdrop_native(&sim.wrapper.vault(), 1_000_000_000_000).unwrap();
    (sim, handle.unwrap())
}

/// 组装会在交换途中重入的模拟环境
pub fn reentrant_simulation() -> (Simulation, Arc<ReentrantExchange>) {
    let config = test_config();
    let exchange_id = config.exchange;
    let attacker = Pubkey::new_unique();
    let mut handle = None;
    let sim = Simulation::build_with_exchange(
        config,
        Pubkey::new_unique(),
        SimulationSeed::default(),
        EventBus::new(),
        |chain| {
            let exchange = Arc::new(ReentrantExchange::new(chain, exchange_id, attacker));
            handle = Some(exchange.clone());
            exchange
        },
    )
    .unwrap();
    sim.chain.airdrop_native(&attacker, 1_000_000).unwrap();
    let exchange = handle.unwrap();
    exchange.arm(&sim.router);
    (sim, exchange)
}

/// 关心的余额快照，用于比较回滚前后
#[derive(Debug, PartialEq, Eq)]
pub struct Balances {
    pub user_native: u64,
    pub user_token: u64,
    pub burn_token: u64,
    pub creator_token: u64,
    pub router_token: u64,
    pub router_wrapped: u64,
    pub router_native: u64,
    pub pool_token: u64,
    pub pool_wrapped: u64,
}

pub fn balances(sim: &Simulation) -> Balances {
    let config = sim.router.config();
    let creator = sim.router.creator_wallet();
    Balances {
        user_native: sim.chain.native_balance(&sim.user),
        user_token: sim.chain.token_balance(&config.token_mint, &sim.user),
        burn_token: sim.chain.token_balance(&config.token_mint, &config.burn_address),
        creator_token: sim.chain.token_balance(&config.token_mint, &creator),
        router_token: sim.chain.token_balance(&config.token_mint, &config.router),
        router_wrapped: sim.chain.token_balance(&config.wrapped_native_mint, &config.router),
        router_native: sim.chain.native_balance(&config.router),
        pool_token: sim.chain.token_balance(&config.token_mint, &config.pool),
        pool_wrapped: sim.chain.token_balance(&config.wrapped_native_mint, &config.pool),
    }
}
