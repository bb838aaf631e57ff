//! Lifecycle monitor: the periodic expiry sweep.

use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use super::report;
use super::runner::run_every;
use crate::core::{Clock, Result};
use crate::store::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub expired: usize,
    pub duration_ms: u64,
}

/// Flips `is_active` off for every animal whose death time has passed.
///
/// The whole sweep is one bulk conditional update: a single predicate-and-set
/// lock section, no read-then-write per row. Running it twice with no time
/// change affects zero additional rows. Balances are never touched.
#[derive(Clone)]
pub struct LifecycleMonitor {
    store: Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
}

impl LifecycleMonitor {
    pub fn new(store: Arc<MemoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn tick(&self) -> Result<SweepReport> {
        let started = Instant::now();
        let now = self.clock.now();

        let expired = self
            .store
            .animals
            .update_where(
                |a| a.is_active && a.expired(now),
                |a| a.is_active = false,
            )
            .await;

        if expired > 0 {
            info!("lifecycle sweep: marked {expired} animals inactive");
        } else {
            debug!("lifecycle sweep: nothing expired at {now}");
        }

        let tick_report = SweepReport {
            expired,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        report::emit("lifecycle_sweep", &tick_report);
        Ok(tick_report)
    }

    pub async fn run(&self, interval: Duration, shutdown: watch::Receiver<bool>) {
        let monitor = self.clone();
        run_every("lifecycle-monitor", interval, shutdown, move || {
            let monitor = monitor.clone();
            async move { monitor.tick().await.map(|_| ()) }
        })
        .await;
    }
}
