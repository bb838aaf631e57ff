//! Purchase and sale operations. Synchronous: called once per external
//! request, racing freely against the background loops. Every guard here
//! goes through the store's row CAS so a race resolves to exactly one
//! winner.

use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::TemplateCatalog;
use crate::core::{BarnError, Clock, Result};
use crate::domain::{Animal, Product};
use crate::ledger::Ledger;
use crate::store::{ConditionalUpdate, MemoryStore};

#[derive(Clone)]
pub struct TradeService {
    store: Arc<MemoryStore>,
    catalog: Arc<TemplateCatalog>,
    ledger: Ledger,
    clock: Arc<dyn Clock>,
}

impl TradeService {
    pub fn new(
        store: Arc<MemoryStore>,
        catalog: Arc<TemplateCatalog>,
        ledger: Ledger,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            catalog,
            ledger,
            clock,
        }
    }

    /// Buy an animal from a catalog template into a farm. The owner is
    /// debited the purchase price before the row is created; on any failure
    /// no row exists and no money has moved.
    pub async fn buy_animal(&self, template_name: &str, farm_id: Uuid) -> Result<Animal> {
        if template_name.trim().is_empty() {
            return Err(BarnError::Validation("template name is empty".into()));
        }
        let template = self
            .catalog
            .find_animal_template(template_name)
            .ok_or_else(|| BarnError::NotFound(format!("animal template '{template_name}'")))?;
        let farm = self
            .store
            .farms
            .get(farm_id)
            .await
            .ok_or_else(|| BarnError::NotFound(format!("farm {farm_id}")))?;

        self.ledger
            .adjust_balance(farm.owner_id, -template.purchase_price)
            .await?;

        let animal = Animal::from_template(template, farm_id, self.clock.now());
        self.store.animals.insert(animal.id, animal.clone()).await;
        info!(
            "bought {} {} into farm {} for {}",
            template.name, animal.id, farm_id, template.purchase_price
        );
        Ok(animal)
    }

    /// Sell an animal. The active check and the sold flip happen in one
    /// conditional update, so an animal that already expired or sold (even a
    /// heartbeat ago on another task) fails with `Conflict` and credits
    /// nothing.
    pub async fn sell_animal(&self, animal_id: Uuid) -> Result<Animal> {
        let now = self.clock.now();
        let sold = match self
            .store
            .animals
            .update_if(
                animal_id,
                |a| a.is_active,
                |a| {
                    a.is_active = false;
                    a.sold_at = Some(now);
                },
            )
            .await
        {
            ConditionalUpdate::Updated(animal) => animal,
            ConditionalUpdate::Rejected(_) => {
                return Err(BarnError::Conflict(format!(
                    "animal {animal_id} is already sold or expired"
                )));
            }
            ConditionalUpdate::Missing => {
                return Err(BarnError::NotFound(format!("animal {animal_id}")));
            }
        };

        // The flip succeeded, so the animal existed a moment ago; a missing
        // farm or owner here means a concurrent cascade delete won the race.
        let farm = self.store.farms.get(sold.farm_id).await.ok_or_else(|| {
            BarnError::unexpected(format!("farm {} vanished during sale", sold.farm_id))
        })?;
        let owner = self
            .ledger
            .adjust_balance(farm.owner_id, sold.sell_price)
            .await?;
        info!(
            "sold animal {} for {}; owner {} balance {}",
            sold.id, sold.sell_price, owner.id, owner.balance
        );
        Ok(sold)
    }

    /// Sell a product. Symmetric to `sell_animal`, guarded on `sold_at`.
    pub async fn sell_product(&self, product_id: Uuid) -> Result<Product> {
        let now = self.clock.now();
        let sold = match self
            .store
            .products
            .update_if(
                product_id,
                |p| !p.is_sold(),
                |p| p.sold_at = Some(now),
            )
            .await
        {
            ConditionalUpdate::Updated(product) => product,
            ConditionalUpdate::Rejected(_) => {
                return Err(BarnError::Conflict(format!(
                    "product {product_id} is already sold"
                )));
            }
            ConditionalUpdate::Missing => {
                return Err(BarnError::NotFound(format!("product {product_id}")));
            }
        };

        let animal = self.store.animals.get(sold.animal_id).await.ok_or_else(|| {
            BarnError::unexpected(format!("animal {} vanished during sale", sold.animal_id))
        })?;
        let farm = self.store.farms.get(animal.farm_id).await.ok_or_else(|| {
            BarnError::unexpected(format!("farm {} vanished during sale", animal.farm_id))
        })?;
        let owner = self.ledger.adjust_balance(farm.owner_id, sold.price).await?;
        info!(
            "sold product {} for {}; owner {} balance {}",
            sold.id, sold.price, owner.id, owner.balance
        );
        Ok(sold)
    }
}
