use clap::Parser;
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[clap(rename_all = "lowercase")]
pub enum CargoEnv {
    Development,
    Production,
}

/// 环境配置加载器
pub struct EnvLoader;

impl EnvLoader {
    /// 根据 CARGO_ENV 加载对应的环境配置文件
    pub fn load_env_file() -> Result<(), dotenvy::Error> {
        let cargo_env = std::env::var("CARGO_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = Self::env_file_for(&cargo_env);

        if !std::path::Path::new(env_file).exists() {
            eprintln!("⚠️  配置文件 {} 不存在，尝试加载默认的 .env 文件", env_file);
            if std::path::Path::new(".env").exists() {
                dotenvy::from_filename(".env")?;
                println!("✅ 已加载默认配置文件: .env");
            } else {
                eprintln!("❌ 未找到任何配置文件，使用默认配置");
            }
            return Ok(());
        }

        dotenvy::from_filename(env_file)?;
        println!("✅ 已加载环境配置文件: {} (CARGO_ENV={})", env_file, cargo_env);
        Ok(())
    }

    pub fn env_file_for(cargo_env: &str) -> &'static str {
        match cargo_env {
            "production" | "Production" | "prod" => ".env.production",
            "development" | "Development" | "dev" => ".env.development",
            "test" | "Test" => ".env.test",
            _ => {
                eprintln!("⚠️  未知的 CARGO_ENV: {}，使用默认的 .env.development", cargo_env);
                ".env.development"
            }
        }
    }
}

/// 路由器与模拟环境的配置，每一项都可以用命令行参数或同名环境变量给出
///
/// 地址类参数留空时由模拟环境随机生成。
#[derive(clap::Parser, Clone, Debug)]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "info")]
    pub rust_log: String,

    /// 生产环境的日志目录，默认可执行文件旁的 logs/
    #[clap(long, env)]
    pub log_dir: Option<PathBuf>,

    /// 被交易的代币
    #[clap(long, env)]
    pub token_mint: Option<String>,

    /// 包装原生资产（wSOL）
    #[clap(long, env, default_value = "So11111111111111111111111111111111111111112")]
    pub wrapped_native_mint: String,

    #[clap(long, env)]
    pub exchange_id: Option<String>,

    #[clap(long, env)]
    pub pool_id: Option<String>,

    /// 销毁费接收地址
    #[clap(long, env, default_value = "1nc1nerator11111111111111111111111111111111")]
    pub burn_address: String,

    /// 路由器自身的地址
    #[clap(long, env)]
    pub router_id: Option<String>,

    /// 管理员
    #[clap(long, env)]
    pub owner: Option<String>,

    #[clap(long, env)]
    pub creator_wallet: Option<String>,

    /// 池子费率档位，单位百万分之一
    #[clap(long, env, default_value = "3000")]
    pub pool_fee_tier: u32,

    #[clap(long, env, default_value = "1000000000000")]
    pub sim_pool_native_reserve: u64,

    #[clap(long, env, default_value = "1000000000000")]
    pub sim_pool_token_reserve: u64,

    #[clap(long, env, default_value = "10000000000")]
    pub sim_user_native: u64,

    #[clap(long, env, default_value = "10000000000")]
    pub sim_user_token: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        EnvLoader::load_env_file().ok();
        AppConfig::parse()
    }
}

impl AppConfig {
    /// 手动创建配置实例（用于测试）
    pub fn new_for_test() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            rust_log: "debug".to_string(),
            log_dir: None,
            token_mint: None,
            wrapped_native_mint: "So11111111111111111111111111111111111111112".to_string(),
            exchange_id: None,
            pool_id: None,
            burn_address: "1nc1nerator11111111111111111111111111111111".to_string(),
            router_id: None,
            owner: None,
            creator_wallet: None,
            pool_fee_tier: 3_000,
            sim_pool_native_reserve: 1_000_000_000_000,
            sim_pool_token_reserve: 1_000_000_000_000,
            sim_user_native: 10_000_000_000,
            sim_user_token: 10_000_000_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.cargo_env == CargoEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_for() {
        assert_eq!(EnvLoader::env_file_for("prod"), ".env.production");
        assert_eq!(EnvLoader::env_file_for("Development"), ".env.development");
        assert_eq!(EnvLoader::env_file_for("test"), ".env.test");
        assert_eq!(EnvLoader::env_file_for("staging"), ".env.development");
    }

    #[test]
    fn test_new_for_test_is_development() {
        let config = AppConfig::new_for_test();
        assert!(!config.is_production());
        assert_eq!(config.pool_fee_tier, 3_000);
        assert!(config.owner.is_none());
    }
}
