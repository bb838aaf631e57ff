// ============================================================================
// Barnyard Library
// ============================================================================

//! Farm economy engine: owners buy and sell animals, animals age out and
//! periodically produce sellable goods. Two background loops (the lifecycle
//! sweep and the production scheduler) run concurrently with the synchronous
//! trade operations against one shared entity store; every race is resolved
//! by the store's row-level conditional updates, not by application locks.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use barnyard::{AccountService, Ledger, MemoryStore, SystemClock, TemplateCatalog, TradeService};
//!
//! #[tokio::main]
//! async fn main() -> barnyard::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let clock = Arc::new(SystemClock);
//!     let catalog = Arc::new(TemplateCatalog::with_defaults());
//!     let ledger = Ledger::new(store.clone(), clock.clone());
//!     let accounts = AccountService::new(store.clone(), ledger.clone(), clock.clone(), 1_000_00);
//!     let trade = TradeService::new(store.clone(), catalog, ledger, clock);
//!
//!     let owner = accounts.register_owner("mara").await?;
//!     let farm = accounts.create_farm(owner.id, "North Barn", None, None).await?;
//!     let hen = trade.buy_animal("Chicken", farm.id).await?;
//!     trade.sell_animal(hen.id).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod ledger;
pub mod monitor;
pub mod ops;
pub mod store;

// Re-export main types for convenience
pub use crate::core::{BarnError, Clock, ManualClock, Money, Result, SystemClock};
pub use catalog::TemplateCatalog;
pub use config::EngineConfig;
pub use ledger::Ledger;
pub use monitor::{LifecycleMonitor, ProductionScheduler, Shutdown};
pub use ops::{AccountService, FarmUpdate, RemovalService, TradeService};
pub use store::{CascadeCounts, MemoryStore};
