//! Shared test harness: one store, a manual clock, and every service wired
//! against them.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use barnyard::{
    AccountService, Ledger, LifecycleMonitor, ManualClock, MemoryStore, Money,
    ProductionScheduler, RemovalService, TemplateCatalog, TradeService,
};
use barnyard::domain::{Farm, Owner};

pub const STARTING_BALANCE: Money = 1_000_00;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub catalog: Arc<TemplateCatalog>,
    pub ledger: Ledger,
    pub accounts: AccountService,
    pub trade: TradeService,
    pub removal: RemovalService,
    pub lifecycle: LifecycleMonitor,
    pub production: ProductionScheduler,
}

pub fn harness() -> Harness {
    harness_with_batch(100)
}

pub fn harness_with_batch(batch_size: usize) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::starting_at(epoch()));
    let catalog = Arc::new(TemplateCatalog::with_defaults());
    let ledger = Ledger::new(store.clone(), clock.clone());
    let accounts = AccountService::new(
        store.clone(),
        ledger.clone(),
        clock.clone(),
        STARTING_BALANCE,
    );
    let trade = TradeService::new(store.clone(), catalog.clone(), ledger.clone(), clock.clone());
    let removal = RemovalService::new(store.clone());
    let lifecycle = LifecycleMonitor::new(store.clone(), clock.clone());
    let production = ProductionScheduler::new(
        store.clone(),
        catalog.clone(),
        clock.clone(),
        batch_size,
    );

    Harness {
        store,
        clock,
        catalog,
        ledger,
        accounts,
        trade,
        removal,
        lifecycle,
        production,
    }
}

impl Harness {
    pub async fn owner_with_farm(&self, name: &str) -> (Owner, Farm) {
        let owner = self.accounts.register_owner(name).await.unwrap();
        let farm = self
            .accounts
            .create_farm(owner.id, &format!("{name}'s farm"), None, None)
            .await
            .unwrap();
        (owner, farm)
    }

    pub async fn balance(&self, owner_id: uuid::Uuid) -> Money {
        self.accounts.get_owner(owner_id).await.unwrap().balance
    }
}
