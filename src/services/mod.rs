// Service exports
pub mod normalize;
pub mod postgres;

pub use normalize::{normalize_product, normalize_products, ProductRow};
pub use postgres::{CatalogQuery, CatalogRepository, RepositoryError};
