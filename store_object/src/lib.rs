//! Store Object - entity store layer for the catalog
//!
//! This crate provides the foundational types and traits for record storage:
//! typed identifiers, table metadata, the `StoreObject` contract, a query
//! builder, and PostgreSQL and in-memory stores implementing that contract.

#[macro_use]
mod macros;

pub mod errors;
pub mod generic_store;
pub mod id_type;
pub mod memory_store;
pub mod prelude;
pub mod query_builder;
pub mod traits;
pub mod validation;

pub use errors::StoreError;
pub use generic_store::GenericStore;
pub use id_type::RecordId;
pub use memory_store::MemoryStore;
pub use query_builder::{QueryBuilder, QueryFilter, SortOrder};
pub use traits::table_metadata;
pub use traits::{Column, Projection, Record, RecordQuery, StoreObject};
pub use validation::{ValidatedFieldName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
