use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ProductTemplate;
use crate::core::Money;

/// Output produced by one animal. Created by the production scheduler,
/// mutated only by a sale, removed only by a cascading delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub name: String,
    pub price: Money,
    pub created_at: DateTime<Utc>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn from_template(template: &ProductTemplate, animal_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            animal_id,
            name: template.name.clone(),
            price: template.price,
            created_at: now,
            sold_at: None,
        }
    }

    /// Sold state is derived from `sold_at`; there is no separate flag to
    /// drift out of sync.
    pub fn is_sold(&self) -> bool {
        self.sold_at.is_some()
    }
}
