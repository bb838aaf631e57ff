//! Filtered, sorted, paged list queries: the read paths external
//! collaborators use. All of them are scoped to one owner and walk the
//! ownership chain (owner -> farms -> animals -> products).

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::memory::MemoryStore;
use crate::domain::{Animal, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 1000,
        }
    }
}

impl Page {
    fn clamp(self) -> Self {
        Self {
            number: self.number.max(1),
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimalFilter {
    Farm(Uuid),
    Active(bool),
    NameContains(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalSort {
    Name,
    CreatedAt,
    LastProduction,
}

/// Query over an owner's animals. With no explicit filter only active
/// animals are returned.
#[derive(Debug, Clone, Default)]
pub struct AnimalQuery {
    pub filter: Option<AnimalFilter>,
    pub sort: Option<(AnimalSort, SortDirection)>,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    Farm(Uuid),
    Animal(Uuid),
    Sold(bool),
    NameContains(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Name,
    CreatedAt,
}

/// Query over an owner's products. With no explicit filter only unsold
/// products are returned.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub filter: Option<ProductFilter>,
    pub sort: Option<(ProductSort, SortDirection)>,
    pub page: Page,
}

impl MemoryStore {
    pub async fn list_animals(&self, owner_id: Uuid, query: &AnimalQuery) -> Vec<Animal> {
        let farm_ids: HashSet<Uuid> = self
            .farms
            .scan(|f| f.owner_id == owner_id)
            .await
            .into_iter()
            .map(|f| f.id)
            .collect();

        let mut animals = self
            .animals
            .scan(|a| {
                if !farm_ids.contains(&a.farm_id) {
                    return false;
                }
                match &query.filter {
                    None => a.is_active,
                    Some(AnimalFilter::Farm(farm_id)) => a.farm_id == *farm_id,
                    Some(AnimalFilter::Active(active)) => a.is_active == *active,
                    Some(AnimalFilter::NameContains(needle)) => contains_ci(&a.name, needle),
                }
            })
            .await;

        if let Some((sort, direction)) = query.sort {
            match sort {
                AnimalSort::Name => animals.sort_by(|a, b| a.name.cmp(&b.name)),
                AnimalSort::CreatedAt => animals.sort_by_key(|a| a.created_at),
                AnimalSort::LastProduction => animals.sort_by_key(|a| a.last_production_time),
            }
            if direction == SortDirection::Descending {
                animals.reverse();
            }
        }

        paginate(animals, query.page)
    }

    pub async fn list_products(&self, owner_id: Uuid, query: &ProductQuery) -> Vec<Product> {
        let farm_ids: HashSet<Uuid> = self
            .farms
            .scan(|f| f.owner_id == owner_id)
            .await
            .into_iter()
            .map(|f| f.id)
            .collect();

        // animal id -> farm id, for ownership scoping and the farm filter
        let farm_of_animal: HashMap<Uuid, Uuid> = self
            .animals
            .scan(|a| farm_ids.contains(&a.farm_id))
            .await
            .into_iter()
            .map(|a| (a.id, a.farm_id))
            .collect();

        let mut products = self
            .products
            .scan(|p| {
                let Some(farm_id) = farm_of_animal.get(&p.animal_id) else {
                    return false;
                };
                match &query.filter {
                    None => !p.is_sold(),
                    Some(ProductFilter::Farm(wanted)) => farm_id == wanted,
                    Some(ProductFilter::Animal(animal_id)) => p.animal_id == *animal_id,
                    Some(ProductFilter::Sold(sold)) => p.is_sold() == *sold,
                    Some(ProductFilter::NameContains(needle)) => contains_ci(&p.name, needle),
                }
            })
            .await;

        if let Some((sort, direction)) = query.sort {
            match sort {
                ProductSort::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
                ProductSort::CreatedAt => products.sort_by_key(|p| p.created_at),
            }
            if direction == SortDirection::Descending {
                products.reverse();
            }
        }

        paginate(products, query.page)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(rows: Vec<T>, page: Page) -> Vec<T> {
    let page = page.clamp();
    rows.into_iter()
        .skip((page.number - 1) * page.size)
        .take(page.size)
        .collect()
}
