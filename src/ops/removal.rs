//! Cascading deletion. Each call removes the target and all dependents in
//! one atomic store section and reports how many of each kind went with it.

use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::Result;
use crate::store::{CascadeCounts, MemoryStore};

#[derive(Clone)]
pub struct RemovalService {
    store: Arc<MemoryStore>,
}

impl RemovalService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Delete an owner with every farm, animal, and product under it.
    pub async fn delete_owner(&self, owner_id: Uuid) -> Result<CascadeCounts> {
        let counts = self.store.delete_owner_cascade(owner_id).await?;
        info!(
            "deleted owner {owner_id}: {} farms, {} animals, {} products",
            counts.farms, counts.animals, counts.products
        );
        Ok(counts)
    }

    /// Delete a farm with its animals and their products.
    pub async fn delete_farm(&self, farm_id: Uuid) -> Result<CascadeCounts> {
        let counts = self.store.delete_farm_cascade(farm_id).await?;
        info!(
            "deleted farm {farm_id}: {} animals, {} products",
            counts.animals, counts.products
        );
        Ok(counts)
    }

    /// Delete an animal with its products.
    pub async fn delete_animal(&self, animal_id: Uuid) -> Result<CascadeCounts> {
        let counts = self.store.delete_animal_cascade(animal_id).await?;
        info!("deleted animal {animal_id}: {} products", counts.products);
        Ok(counts)
    }
}
