pub mod accounts;
pub mod removal;
pub mod trade;

pub use accounts::{AccountService, FarmUpdate};
pub use removal::RemovalService;
pub use trade::TradeService;
