use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Money;

/// Account holding the balance every purchase and sale settles against.
///
/// `balance` is mutated only through the ledger; it never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owner {
    pub fn new(name: impl Into<String>, balance: Money, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }
}
