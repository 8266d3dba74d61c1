//! Convenience re-exports for common catalog usage

pub use crate::core::Catalog;
pub use crate::errors::CatalogError;
pub use crate::guard::{DeleteCheck, Referent};
pub use crate::models::{
    Category, CategoryId, Directory, Item, ItemId, Seller, SellerId,
};
pub use crate::routes::router;
pub use crate::seed::SeedSummary;
pub use crate::views::Page;

pub use config::{AppConfig, DatabaseConfig, StoreBackend};

pub use store_object::prelude::*;
