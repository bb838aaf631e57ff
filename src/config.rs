//! Engine configuration, environment-driven with sane defaults.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::core::{BarnError, Money, Result};
use crate::monitor::DEFAULT_BATCH_SIZE;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval both background loops tick on.
    pub sweep_interval: Duration,
    /// Maximum animals handled per production tick.
    pub production_batch_size: usize,
    /// Balance a newly registered owner starts with, in cents.
    pub starting_balance: Money,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(20),
            production_batch_size: DEFAULT_BATCH_SIZE,
            starting_balance: 1_000_00,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            sweep_interval: Duration::from_secs(read_var(
                "BARNYARD_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval.as_secs(),
            )?),
            production_batch_size: read_var(
                "BARNYARD_PRODUCTION_BATCH_SIZE",
                defaults.production_batch_size,
            )?,
            starting_balance: read_var("BARNYARD_STARTING_BALANCE", defaults.starting_balance)?,
        })
    }
}

fn read_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| BarnError::Validation(format!("{key}: {err}"))),
        Err(_) => Ok(default),
    }
}
