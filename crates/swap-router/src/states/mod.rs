pub mod config;
pub mod events;
pub mod router_state;
pub mod trade;

pub use config::*;
pub use events::*;
pub use router_state::*;
pub use trade::*;
