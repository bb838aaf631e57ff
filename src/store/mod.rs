pub mod memory;
pub mod query;

pub use memory::{
    CascadeCounts, ConditionalUpdate, MemoryStore, ProductionCommit, StagedProduction, Table,
};
pub use query::{AnimalFilter, AnimalQuery, AnimalSort, Page, ProductFilter, ProductQuery, ProductSort, SortDirection};
