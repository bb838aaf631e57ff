pub mod lifecycle;
pub mod production;
pub mod report;
pub mod runner;

pub use lifecycle::{LifecycleMonitor, SweepReport};
pub use production::{ProductionReport, ProductionScheduler, DEFAULT_BATCH_SIZE};
pub use runner::{run_every, Shutdown};
