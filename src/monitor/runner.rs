//! Shared loop driver: run a tick, sleep the interval, repeat until the
//! shutdown signal fires. Ticks are atomic store sections, so stopping
//! between ticks never leaves a half-applied batch.

use log::{error, info};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::core::Result;

/// Shutdown broadcast. Every loop holds a receiver; `trigger` interrupts
/// all interval sleeps immediately.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive `tick` every `interval` until `shutdown` fires.
///
/// A tick error is logged and the loop proceeds to its next scheduled run;
/// nothing a tick does can stop the loop. That is a correctness requirement,
/// not a convenience: a silently dead sweep loop would let expired animals
/// keep producing.
pub async fn run_every<T, F>(
    name: &'static str,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut tick: T,
) where
    T: FnMut() -> F,
    F: Future<Output = Result<()>>,
{
    if *shutdown.borrow() {
        return;
    }
    info!("{name}: loop started, interval {interval:?}");
    loop {
        if let Err(err) = tick().await {
            error!("{name}: tick failed: {err}; retrying next tick");
        }
        tokio::select! {
            _ = sleep(interval) => {}
            _ = shutdown.changed() => {
                info!("{name}: shutdown signal received, stopping");
                break;
            }
        }
    }
}
