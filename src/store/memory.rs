//! In-memory entity store.
//!
//! One `RwLock`-guarded map per entity type; row-level atomicity comes from
//! performing check-and-mutate inside a single write-lock section. There is
//! no lock shared between unrelated operations, so the two background loops
//! and the synchronous trade operations run in parallel and only contend on
//! the tables they actually touch.
//!
//! Lock order for multi-table sections: owners, farms, animals, products.
//! Every function here that takes more than one write guard acquires them
//! in that order.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::{BarnError, Result};
use crate::domain::{Animal, Farm, Owner, Product};

/// Outcome of a conditional single-row update.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalUpdate<T> {
    /// Predicate held; row mutated. Carries the updated row.
    Updated(T),
    /// Row exists but the predicate rejected it. Carries the untouched row.
    Rejected(T),
    /// No row under that id.
    Missing,
}

/// A single entity table. Rows are cloned out; mutation happens only
/// through the update methods, each a single lock section.
pub struct Table<T> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn insert(&self, id: Uuid, row: T) {
        self.rows.write().await.insert(id, row);
    }

    /// Unconditional mutate-in-place. Returns the updated row.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    /// Compare-and-set: the predicate is checked and the mutation applied
    /// under one write lock, so two racing callers can never both pass a
    /// stale check.
    pub async fn update_if<P, F>(&self, id: Uuid, predicate: P, apply: F) -> ConditionalUpdate<T>
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            None => ConditionalUpdate::Missing,
            Some(row) => {
                if predicate(row) {
                    apply(row);
                    ConditionalUpdate::Updated(row.clone())
                } else {
                    ConditionalUpdate::Rejected(row.clone())
                }
            }
        }
    }

    /// Bulk conditional update in one lock section. Re-running it when no
    /// new rows qualify is a no-op, which makes sweep ticks idempotent.
    pub async fn update_where<P, F>(&self, predicate: P, mut apply: F) -> usize
    where
        P: Fn(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut rows = self.rows.write().await;
        let mut affected = 0;
        for row in rows.values_mut() {
            if predicate(row) {
                apply(row);
                affected += 1;
            }
        }
        affected
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        self.rows.write().await.remove(&id)
    }

    pub async fn scan<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

/// Dependents removed by a cascading delete, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CascadeCounts {
    pub farms: usize,
    pub animals: usize,
    pub products: usize,
}

/// One animal's staged production: the product to create together with the
/// `last_production_time` advance it implies.
#[derive(Debug, Clone)]
pub struct StagedProduction {
    pub animal_id: Uuid,
    pub product: Product,
}

/// Outcome of a production commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductionCommit {
    /// Entries whose product row and time advance were written.
    pub committed: usize,
    /// Entries dropped whole because the animal was sold, expired, deleted,
    /// or already advanced between scan and commit.
    pub dropped: usize,
}

pub struct MemoryStore {
    pub owners: Table<Owner>,
    pub farms: Table<Farm>,
    pub animals: Table<Animal>,
    pub products: Table<Product>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            owners: Table::new(),
            farms: Table::new(),
            animals: Table::new(),
            products: Table::new(),
        }
    }

    /// Delete an owner and every farm, animal, and product under it, as one
    /// lock section over all four tables.
    pub async fn delete_owner_cascade(&self, owner_id: Uuid) -> Result<CascadeCounts> {
        let mut owners = self.owners.rows.write().await;
        let mut farms = self.farms.rows.write().await;
        let mut animals = self.animals.rows.write().await;
        let mut products = self.products.rows.write().await;

        if owners.remove(&owner_id).is_none() {
            return Err(BarnError::NotFound(format!("owner {owner_id}")));
        }

        let farm_ids: HashSet<Uuid> = farms
            .values()
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.id)
            .collect();
        farms.retain(|_, f| f.owner_id != owner_id);

        let counts = remove_animals_of_farms(&mut animals, &mut products, &farm_ids);
        Ok(CascadeCounts {
            farms: farm_ids.len(),
            ..counts
        })
    }

    /// Delete a farm with its animals and their products.
    pub async fn delete_farm_cascade(&self, farm_id: Uuid) -> Result<CascadeCounts> {
        let mut farms = self.farms.rows.write().await;
        let mut animals = self.animals.rows.write().await;
        let mut products = self.products.rows.write().await;

        if farms.remove(&farm_id).is_none() {
            return Err(BarnError::NotFound(format!("farm {farm_id}")));
        }

        let farm_ids = HashSet::from([farm_id]);
        Ok(remove_animals_of_farms(
            &mut animals,
            &mut products,
            &farm_ids,
        ))
    }

    /// Delete an animal with its products.
    pub async fn delete_animal_cascade(&self, animal_id: Uuid) -> Result<CascadeCounts> {
        let mut animals = self.animals.rows.write().await;
        let mut products = self.products.rows.write().await;

        if animals.remove(&animal_id).is_none() {
            return Err(BarnError::NotFound(format!("animal {animal_id}")));
        }

        let before = products.len();
        products.retain(|_, p| p.animal_id != animal_id);
        Ok(CascadeCounts {
            farms: 0,
            animals: 1,
            products: before - products.len(),
        })
    }

    /// Commit one production tick: for every staged entry whose animal is
    /// still present, active, and due, insert the product row and advance
    /// `last_production_time` together, under one lock section. An entry
    /// whose animal no longer qualifies is dropped whole: no orphan product,
    /// no stale advance, and no double production on the next tick.
    pub async fn commit_production(
        &self,
        staged: Vec<StagedProduction>,
        now: DateTime<Utc>,
    ) -> ProductionCommit {
        let mut animals = self.animals.rows.write().await;
        let mut products = self.products.rows.write().await;

        let mut outcome = ProductionCommit::default();
        for entry in staged {
            match animals.get_mut(&entry.animal_id) {
                Some(animal) if animal.is_active && animal.due_time() <= now => {
                    animal.last_production_time = Some(now);
                    products.insert(entry.product.id, entry.product);
                    outcome.committed += 1;
                }
                _ => outcome.dropped += 1,
            }
        }
        outcome
    }
}

fn remove_animals_of_farms(
    animals: &mut HashMap<Uuid, Animal>,
    products: &mut HashMap<Uuid, Product>,
    farm_ids: &HashSet<Uuid>,
) -> CascadeCounts {
    let animal_ids: HashSet<Uuid> = animals
        .values()
        .filter(|a| farm_ids.contains(&a.farm_id))
        .map(|a| a.id)
        .collect();
    animals.retain(|_, a| !farm_ids.contains(&a.farm_id));

    let products_before = products.len();
    products.retain(|_, p| !animal_ids.contains(&p.animal_id));

    CascadeCounts {
        farms: 0,
        animals: animal_ids.len(),
        products: products_before - products.len(),
    }
}
