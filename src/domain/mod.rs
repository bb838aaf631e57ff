pub mod animal;
pub mod farm;
pub mod owner;
pub mod product;

pub use animal::Animal;
pub use farm::Farm;
pub use owner::Owner;
pub use product::Product;
