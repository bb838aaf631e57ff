//! Immutable reference catalogs: what can be bought, what it produces, and
//! the default economics of both. Read-only once constructed; lookups are
//! case-insensitive by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::Money;

/// Template an animal purchase is resolved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalTemplate {
    pub name: String,
    pub lifetime_minutes: i64,
    pub production_interval_minutes: i64,
    pub purchase_price: Money,
    pub sell_price: Money,
    /// Name of the product template this animal produces.
    pub product: String,
}

/// Template a produced good is priced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub name: String,
    pub price: Money,
}

pub struct TemplateCatalog {
    animals: HashMap<String, AnimalTemplate>,
    products: HashMap<String, ProductTemplate>,
}

impl TemplateCatalog {
    pub fn new(animals: Vec<AnimalTemplate>, products: Vec<ProductTemplate>) -> Self {
        Self {
            animals: animals
                .into_iter()
                .map(|t| (t.name.to_lowercase(), t))
                .collect(),
            products: products
                .into_iter()
                .map(|t| (t.name.to_lowercase(), t))
                .collect(),
        }
    }

    /// Catalog seeded with the stock templates.
    pub fn with_defaults() -> Self {
        let minutes = |hours: i64| hours * 60;
        let animals = vec![
            animal("Chicken", minutes(24 * 2), minutes(6), 10_00, 8_00, "Egg"),
            animal("Cow", minutes(24 * 10), minutes(12), 100_00, 90_00, "Milk"),
            animal("Sheep", minutes(24 * 7), minutes(24), 60_00, 50_00, "Wool"),
            animal("Goat", minutes(24 * 8), minutes(12), 70_00, 60_00, "Goat Milk"),
            animal("Duck", minutes(24 * 3), minutes(8), 15_00, 12_00, "Duck Egg"),
            animal("Unknown", minutes(24), minutes(24), 0, 0, ""),
        ];
        let products = vec![
            product("Egg", 1_00),
            product("Milk", 3_00),
            product("Wool", 4_00),
            product("Goat Milk", 2_00),
            product("Duck Egg", 2_00),
        ];
        Self::new(animals, products)
    }

    pub fn find_animal_template(&self, name: &str) -> Option<&AnimalTemplate> {
        self.animals.get(&name.to_lowercase())
    }

    pub fn find_product_template(&self, name: &str) -> Option<&ProductTemplate> {
        self.products.get(&name.to_lowercase())
    }

    pub fn animal_template_names(&self) -> Vec<&str> {
        self.animals.values().map(|t| t.name.as_str()).collect()
    }
}

fn animal(
    name: &str,
    lifetime_minutes: i64,
    production_interval_minutes: i64,
    purchase_price: Money,
    sell_price: Money,
    product: &str,
) -> AnimalTemplate {
    AnimalTemplate {
        name: name.to_string(),
        lifetime_minutes,
        production_interval_minutes,
        purchase_price,
        sell_price,
        product: product.to_string(),
    }
}

fn product(name: &str, price: Money) -> ProductTemplate {
    ProductTemplate {
        name: name.to_string(),
        price,
    }
}
