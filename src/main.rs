use anyhow::Result;
use log::info;
use std::sync::Arc;

use barnyard::{
    AccountService, Clock, EngineConfig, Ledger, LifecycleMonitor, MemoryStore,
    ProductionScheduler, Shutdown, SystemClock, TemplateCatalog, TradeService,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let config = EngineConfig::from_env()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(TemplateCatalog::with_defaults());
    let ledger = Ledger::new(store.clone(), clock.clone());
    let accounts = AccountService::new(
        store.clone(),
        ledger.clone(),
        clock.clone(),
        config.starting_balance,
    );
    let trade = TradeService::new(store.clone(), catalog.clone(), ledger, clock.clone());

    // Seed a demo holding so a fresh process has something to tend.
    let owner = accounts.register_owner("demo").await?;
    let farm = accounts
        .create_farm(owner.id, "Home Farm", None, None)
        .await?;
    for template in ["Chicken", "Chicken", "Duck"] {
        trade.buy_animal(template, farm.id).await?;
    }
    let seeded = accounts.get_owner(owner.id).await?;
    info!(
        "seeded owner {} (balance {}) with farm {}",
        seeded.id, seeded.balance, farm.id
    );

    let shutdown = Shutdown::new();
    let lifecycle = LifecycleMonitor::new(store.clone(), clock.clone());
    let production = ProductionScheduler::new(
        store.clone(),
        catalog,
        clock,
        config.production_batch_size,
    );

    let interval = config.sweep_interval;
    let sweep_rx = shutdown.subscribe();
    let production_rx = shutdown.subscribe();
    let lifecycle_task = tokio::spawn(async move { lifecycle.run(interval, sweep_rx).await });
    let production_task = tokio::spawn(async move { production.run(interval, production_rx).await });

    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, shutting down");
    shutdown.trigger();
    let _ = tokio::join!(lifecycle_task, production_task);
    info!("all loops stopped");
    Ok(())
}
