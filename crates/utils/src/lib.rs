pub mod config;
pub mod logger;

pub use config::EnvLoader;
pub use config::*;
pub use logger::*;
