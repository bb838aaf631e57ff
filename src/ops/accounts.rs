//! Account and holding management: owners, farms, and the read paths
//! external collaborators list entities through. Credential issuance and
//! authentication live outside this crate.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::{BarnError, Clock, Money, Result};
use crate::domain::{Animal, Farm, Owner, Product};
use crate::ledger::Ledger;
use crate::store::{AnimalQuery, MemoryStore, ProductQuery};

/// Partial farm update; `None` keeps the existing value.
#[derive(Debug, Clone, Default)]
pub struct FarmUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<MemoryStore>,
    ledger: Ledger,
    clock: Arc<dyn Clock>,
    starting_balance: Money,
}

impl AccountService {
    pub fn new(
        store: Arc<MemoryStore>,
        ledger: Ledger,
        clock: Arc<dyn Clock>,
        starting_balance: Money,
    ) -> Self {
        Self {
            store,
            ledger,
            clock,
            starting_balance,
        }
    }

    /// Create an owner with the configured starting balance. Names are
    /// unique.
    pub async fn register_owner(&self, name: &str) -> Result<Owner> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BarnError::Validation("owner name is empty".into()));
        }
        if !self
            .store
            .owners
            .scan(|o| o.name.eq_ignore_ascii_case(name))
            .await
            .is_empty()
        {
            return Err(BarnError::Conflict(format!(
                "owner name '{name}' is already taken"
            )));
        }

        let owner = Owner::new(name, self.starting_balance, self.clock.now());
        self.store.owners.insert(owner.id, owner.clone()).await;
        Ok(owner)
    }

    pub async fn get_owner(&self, owner_id: Uuid) -> Result<Owner> {
        self.store
            .owners
            .get(owner_id)
            .await
            .ok_or_else(|| BarnError::NotFound(format!("owner {owner_id}")))
    }

    /// Administrative balance override, routed through the ledger so the
    /// non-negative invariant holds here too.
    pub async fn set_balance(&self, owner_id: Uuid, amount: Money) -> Result<Owner> {
        if amount < 0 {
            return Err(BarnError::Validation(format!(
                "balance cannot be negative: {amount}"
            )));
        }
        let current = self.get_owner(owner_id).await?;
        self.ledger
            .adjust_balance(owner_id, amount - current.balance)
            .await
    }

    pub async fn create_farm(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<String>,
        location: Option<String>,
    ) -> Result<Farm> {
        if name.trim().is_empty() {
            return Err(BarnError::Validation("farm name is empty".into()));
        }
        self.get_owner(owner_id).await?;

        let farm = Farm::new(owner_id, name.trim(), description, location, self.clock.now());
        self.store.farms.insert(farm.id, farm.clone()).await;
        Ok(farm)
    }

    pub async fn update_farm(&self, farm_id: Uuid, update: FarmUpdate) -> Result<Farm> {
        let now = self.clock.now();
        self.store
            .farms
            .update(farm_id, |farm| {
                if let Some(name) = &update.name {
                    if !name.trim().is_empty() {
                        farm.name = name.trim().to_string();
                    }
                }
                if let Some(description) = &update.description {
                    farm.description = Some(description.clone());
                }
                if let Some(location) = &update.location {
                    farm.location = Some(location.clone());
                }
                farm.updated_at = now;
            })
            .await
            .ok_or_else(|| BarnError::NotFound(format!("farm {farm_id}")))
    }

    pub async fn farms_of(&self, owner_id: Uuid) -> Vec<Farm> {
        self.store.farms.scan(|f| f.owner_id == owner_id).await
    }

    pub async fn rename_animal(&self, animal_id: Uuid, name: &str) -> Result<Animal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BarnError::Validation("animal name is empty".into()));
        }
        self.store
            .animals
            .update(animal_id, |a| a.name = name.to_string())
            .await
            .ok_or_else(|| BarnError::NotFound(format!("animal {animal_id}")))
    }

    pub async fn list_animals(&self, owner_id: Uuid, query: &AnimalQuery) -> Vec<Animal> {
        self.store.list_animals(owner_id, query).await
    }

    pub async fn list_products(&self, owner_id: Uuid, query: &ProductQuery) -> Vec<Product> {
        self.store.list_products(owner_id, query).await
    }
}
