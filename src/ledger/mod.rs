//! Economic ledger: the one place balances change.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::{BarnError, Clock, Money, Result};
use crate::domain::Owner;
use crate::store::{ConditionalUpdate, MemoryStore};

#[derive(Clone)]
pub struct Ledger {
    store: Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new(store: Arc<MemoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Apply `delta` (positive credit, negative debit) to an owner's
    /// balance. The non-negative floor is checked and the delta applied
    /// inside one row write-lock section, so concurrent debits against the
    /// same owner cannot both pass a stale check.
    pub async fn adjust_balance(&self, owner_id: Uuid, delta: Money) -> Result<Owner> {
        let now = self.clock.now();
        let outcome = self
            .store
            .owners
            .update_if(
                owner_id,
                |owner| {
                    owner
                        .balance
                        .checked_add(delta)
                        .is_some_and(|next| next >= 0)
                },
                |owner| {
                    owner.balance += delta;
                    owner.updated_at = now;
                },
            )
            .await;

        match outcome {
            ConditionalUpdate::Updated(owner) => Ok(owner),
            ConditionalUpdate::Rejected(owner) => Err(BarnError::InsufficientFunds {
                balance: owner.balance,
                amount: -delta,
            }),
            ConditionalUpdate::Missing => Err(BarnError::NotFound(format!("owner {owner_id}"))),
        }
    }
}
