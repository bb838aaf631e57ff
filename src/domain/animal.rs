use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::AnimalTemplate;
use crate::core::Money;

/// Livestock row. Created by a purchase, flipped inactive by the lifecycle
/// sweep or a sale, advanced by the production scheduler, removed only by a
/// cascading delete.
///
/// `death_time` is always `created_at + lifetime_minutes`; it is recomputed
/// whenever either input changes and never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,
    pub farm_id: Uuid,
    /// Catalog key of the template this animal was bought from.
    pub template: String,
    pub name: String,
    pub purchase_price: Money,
    pub sell_price: Money,
    pub lifetime_minutes: i64,
    pub production_interval_minutes: i64,
    pub created_at: DateTime<Utc>,
    pub last_production_time: Option<DateTime<Utc>>,
    pub death_time: DateTime<Utc>,
    pub is_active: bool,
    pub sold_at: Option<DateTime<Utc>>,
}

impl Animal {
    pub fn from_template(template: &AnimalTemplate, farm_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            farm_id,
            template: template.name.clone(),
            name: template.name.clone(),
            purchase_price: template.purchase_price,
            sell_price: template.sell_price,
            lifetime_minutes: template.lifetime_minutes,
            production_interval_minutes: template.production_interval_minutes,
            created_at: now,
            last_production_time: None,
            death_time: now + Duration::minutes(template.lifetime_minutes),
            is_active: true,
            sold_at: None,
        }
    }

    /// Change the lifetime and recompute `death_time` from it.
    pub fn set_lifetime_minutes(&mut self, lifetime_minutes: i64) {
        self.lifetime_minutes = lifetime_minutes;
        self.death_time = self.created_at + Duration::minutes(lifetime_minutes);
    }

    /// Instant at which the next production run becomes due.
    pub fn due_time(&self) -> DateTime<Utc> {
        self.last_production_time.unwrap_or(self.created_at)
            + Duration::minutes(self.production_interval_minutes)
    }

    pub fn production_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.due_time() <= now
    }

    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        self.death_time <= now
    }
}
