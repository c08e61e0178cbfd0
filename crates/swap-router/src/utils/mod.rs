pub mod guard;
pub mod math;
pub mod token;
pub mod wrap;

pub use guard::*;
pub use math::*;
pub use token::*;
pub use wrap::*;
