use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use swap_router::runtime::{Simulation, SimulationSeed};
use swap_router::{BroadcastEventSink, EventBus, RouterConfig, RouterError, TracingEventSink};
use tokio::sync::broadcast::error::RecvError;
use tokio::{signal, task::JoinSet};
use tracing::{info, warn};
use utils::{AppConfig, Logger};

#[derive(Parser, Debug)]
#[command(name = "burnswap", version, about = "带销毁费/创建者费的原生资产 <-> 代币兑换路由（内存模拟）")]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// 按交易所毛额估算买入费用
    QuoteBuy {
        #[arg(long)]
        gross: u64,
    },
    /// 估算卖出费用以及交易所对净额的报价
    QuoteSell {
        #[arg(long)]
        amount: u64,
    },
    /// 用原生资产买入代币
    Buy {
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "0")]
        min_output: u64,
    },
    /// 卖出代币换回原生资产
    Sell {
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "0")]
        min_output: u64,
    },
    /// 池子与授权状态
    PoolState,
    /// 买入、卖出、暂停/恢复、管理操作走一遍
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 根据 CARGO_ENV 加载对应的环境配置文件
    utils::EnvLoader::load_env_file().ok();
    let cli = Cli::parse();
    let _guard = Logger::from_config(&cli.config);

    let burnswap = Burnswap::new(Arc::new(cli.config)).context("🔴 Failed to build simulation")?;
    burnswap.run(cli.command).await
}

struct Burnswap {
    config: Arc<AppConfig>,
    simulation: Simulation,
    broadcast: Arc<BroadcastEventSink>,
}

impl Burnswap {
    fn new(config: Arc<AppConfig>) -> Result<Self> {
        let (router_config, creator_wallet) = Burnswap::with_router_config(&config)?;
        let broadcast = Arc::new(BroadcastEventSink::new(256));
        let events = EventBus::new()
            .with_sink(Arc::new(TracingEventSink))
            .with_sink(broadcast.clone());

        let seed = SimulationSeed {
            pool_native_reserve: config.sim_pool_native_reserve,
            pool_token_reserve: config.sim_pool_token_reserve,
            user_native: config.sim_user_native,
            user_token: config.sim_user_token,
        };
        let simulation = Simulation::build(router_config, creator_wallet, seed, events)?;

        Ok(Self {
            config,
            simulation,
            broadcast,
        })
    }

    /// 未配置的地址随机生成
    fn with_router_config(config: &AppConfig) -> Result<(RouterConfig, Pubkey)> {
        let or_random = |value: &Option<String>| value.clone().unwrap_or_else(|| Pubkey::new_unique().to_string());

        let router_config = RouterConfig::parse(
            &or_random(&config.router_id),
            &or_random(&config.owner),
            &or_random(&config.token_mint),
            &config.wrapped_native_mint,
            &or_random(&config.exchange_id),
            &or_random(&config.pool_id),
            &config.burn_address,
            config.pool_fee_tier,
        )
        .context("invalid router configuration")?;
        let creator_wallet = swap_router::states::parse_pubkey("creator_wallet", &or_random(&config.creator_wallet))
            .context("invalid creator wallet")?;

        Ok((router_config, creator_wallet))
    }

    async fn run(self, command: Command) -> Result<()> {
        let mut set = JoinSet::new();
        let mut receiver = self.broadcast.subscribe();

        // 事件逐行输出为 JSON
        set.spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("⚠️ failed to encode {}: {}", event.name(), e),
                    },
                    Err(RecvError::Lagged(skipped)) => warn!("⚠️ event listener lagged, {} events dropped", skipped),
                    Err(RecvError::Closed) => break,
                }
            }
        });

        info!("🚀 burnswap {:?} (env={:?})", command, self.config.cargo_env);
        let outcome = self.execute(command);

        // 释放路由器后广播通道关闭，监听任务随之结束
        let Burnswap { simulation, broadcast, .. } = self;
        drop(simulation);
        drop(broadcast);

        tokio::select! {
            _ = async {
                while let Some(joined) = set.join_next().await {
                    if let Err(e) = joined {
                        warn!("🔴 event listener failed: {}", e);
                    }
                }
            } => {},
            _ = signal::ctrl_c() => {
                warn!("❌ Signal received, dropping pending events");
                set.abort_all();
            },
        }

        outcome
    }

    fn execute(&self, command: Command) -> Result<()> {
        let sim = &self.simulation;
        let router = &sim.router;
        let config = router.config();

        match command {
            Command::QuoteBuy { gross } => {
                let breakdown = router.estimate_buy_fees(gross);
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            }
            Command::QuoteSell { amount } => {
                let breakdown = router.estimate_sell_fees(amount);
                let quoted = sim
                    .exchange
                    .quote(&config.token_mint, &config.wrapped_native_mint, config.pool_fee_tier, breakdown.net_amount)
                    .map_err(RouterError::from)
                    .context("exchange quote failed")?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "fees": breakdown,
                        "expected_native_output": quoted,
                    }))?
                );
            }
            Command::Buy { amount, min_output } => {
                let net = router.buy(sim.user, amount, min_output).context("buy failed")?;
                info!("✅ bought {} tokens for {} native", net, amount);
            }
            Command::Sell { amount, min_output } => {
                sim.approve_router(&sim.user, amount)?;
                let paid = router.sell(sim.user, amount, min_output).context("sell failed")?;
                info!("✅ sold {} tokens for {} native", amount, paid);
            }
            Command::PoolState => self.print_state()?,
            Command::Demo => self.demo()?,
        }
        Ok(())
    }

    fn print_state(&self) -> Result<()> {
        let router = &self.simulation.router;
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "paused": router.paused(),
                "creator_wallet": router.creator_wallet().to_string(),
                "pool": router.check_pool_state(),
                "user": router.check_user_approval(&self.simulation.user),
            }))?
        );
        Ok(())
    }

    fn demo(&self) -> Result<()> {
        let sim = &self.simulation;
        let router = &sim.router;
        let owner = router.config().owner;
        let native_in = self.config.sim_user_native / 10;

        let bought = router.buy(sim.user, native_in, 0).context("demo buy failed")?;
        info!("✅ demo buy: {} native -> {} tokens", native_in, bought);

        let to_sell = bought / 2;
        sim.approve_router(&sim.user, to_sell)?;
        let paid = router.sell(sim.user, to_sell, 0).context("demo sell failed")?;
        info!("✅ demo sell: {} tokens -> {} native", to_sell, paid);

        router.pause(&owner)?;
        match router.buy(sim.user, native_in, 0) {
            Err(RouterError::Paused) => info!("⏸️ trade rejected while paused"),
            other => warn!("⚠️ unexpected outcome while paused: {:?}", other),
        }
        router.unpause(&owner)?;

        router.set_creator_wallet(&owner, Pubkey::new_unique())?;
        router.recover_approvals(&owner)?;

        self.print_state()
    }
}
