//! Production scheduler: periodic per-animal output generation.

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use super::report;
use super::runner::run_every;
use crate::catalog::TemplateCatalog;
use crate::core::{BarnError, Clock, Result};
use crate::domain::{Animal, Product};
use crate::store::{MemoryStore, StagedProduction};

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductionReport {
    /// Animals found due, before the batch cap.
    pub due: usize,
    pub produced: usize,
    /// Animals skipped because their template chain does not resolve.
    pub skipped: usize,
    /// Staged entries dropped at commit because the animal was sold,
    /// expired, or deleted between scan and commit.
    pub dropped: usize,
    pub duration_ms: u64,
}

/// Each tick: select due animals oldest-due-first up to the batch cap,
/// resolve what each produces, then commit every product row together with
/// its animal's `last_production_time` advance in one atomic section.
///
/// A resolution failure skips that animal only; it stays due and is retried
/// next tick. Nothing a tick does can take the loop down.
#[derive(Clone)]
pub struct ProductionScheduler {
    store: Arc<MemoryStore>,
    catalog: Arc<TemplateCatalog>,
    clock: Arc<dyn Clock>,
    batch_size: usize,
}

impl ProductionScheduler {
    pub fn new(
        store: Arc<MemoryStore>,
        catalog: Arc<TemplateCatalog>,
        clock: Arc<dyn Clock>,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
            batch_size,
        }
    }

    pub async fn tick(&self) -> Result<ProductionReport> {
        let started = Instant::now();
        let now = self.clock.now();

        let mut due = self.store.animals.scan(|a| a.production_due(now)).await;
        let due_total = due.len();
        // Oldest due first, so a backlog larger than the batch cap drains
        // fairly across ticks.
        due.sort_by_key(Animal::due_time);
        due.truncate(self.batch_size);

        let mut staged = Vec::with_capacity(due.len());
        let mut skipped = 0usize;
        for animal in &due {
            match self.stage(animal, now) {
                Ok(entry) => staged.push(entry),
                Err(err) => {
                    skipped += 1;
                    warn!(
                        "production: skipping animal {} ('{}'): {err}",
                        animal.id, animal.template
                    );
                }
            }
        }

        let commit = self.store.commit_production(staged, now).await;
        if commit.committed > 0 {
            info!("production tick: created {} products", commit.committed);
        } else {
            debug!("production tick: nothing due at {now}");
        }

        let tick_report = ProductionReport {
            due: due_total,
            produced: commit.committed,
            skipped,
            dropped: commit.dropped,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        report::emit("production", &tick_report);
        Ok(tick_report)
    }

    fn stage(&self, animal: &Animal, now: chrono::DateTime<chrono::Utc>) -> Result<StagedProduction> {
        let template = self
            .catalog
            .find_animal_template(&animal.template)
            .ok_or_else(|| {
                BarnError::NotFound(format!("animal template '{}'", animal.template))
            })?;
        let product_template = self
            .catalog
            .find_product_template(&template.product)
            .ok_or_else(|| {
                BarnError::NotFound(format!("product template '{}'", template.product))
            })?;
        Ok(StagedProduction {
            animal_id: animal.id,
            product: Product::from_template(product_template, animal.id, now),
        })
    }

    pub async fn run(&self, interval: Duration, shutdown: watch::Receiver<bool>) {
        let scheduler = self.clone();
        run_every("production-scheduler", interval, shutdown, move || {
            let scheduler = scheduler.clone();
            async move { scheduler.tick().await.map(|_| ()) }
        })
        .await;
    }
}
