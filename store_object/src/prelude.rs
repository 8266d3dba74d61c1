//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{Column, Projection, Record, RecordQuery, StoreObject};

// Error types
pub use crate::errors::StoreError;

// Stores
pub use crate::generic_store::GenericStore;
pub use crate::memory_store::MemoryStore;

// Identifiers
pub use crate::id_type::RecordId;

// Query building
pub use crate::query_builder::{QueryBuilder, QueryFilter, SortOrder};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, PgPool};
pub use uuid::Uuid;
