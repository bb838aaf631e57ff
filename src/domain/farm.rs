use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enclosure belonging to exactly one owner. Deleting it cascades to its
/// animals and their products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farm {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        description: Option<String>,
        location: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            description,
            location,
            created_at: now,
            updated_at: now,
        }
    }
}
