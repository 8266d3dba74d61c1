//! Trait definitions
//!
//! This module defines the store contract shared by every backend.

use crate::id_type::RecordId;
use crate::query_builder::QueryBuilder;
use crate::traits::table_metadata::Record;
use crate::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A projected row: field name to value, for the fields a query selected
pub type Projection = Map<String, Value>;

/// Persistence operations for one record kind.
///
/// Every call is atomic for the single record it touches; there are no
/// transactions spanning calls.
#[async_trait]
pub trait StoreObject: Send + Sync + Debug {
    /// The record type this store persists
    type Model: Record;

    /// Persist a new record under a freshly assigned id, ignoring the id it carries
    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Get a record by its id
    async fn find_by_id(
        &self,
        id: &RecordId<Self::Model>,
    ) -> Result<Option<Self::Model>, StoreError>;

    /// Get a record by the textual form of its id.
    ///
    /// Fails with `InvalidIdentifier` before touching storage if `raw` is malformed.
    async fn find_by_key(&self, raw: &str) -> Result<Option<Self::Model>, StoreError> {
        let id = RecordId::parse(raw)?;
        self.find_by_id(&id).await
    }

    /// Records matching every filter in `query`, in its order (creation order by default)
    async fn find_many(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError>;

    /// Like `find_many`, but only the fields named by `query.select(..)`
    async fn find_projected(&self, query: QueryBuilder) -> Result<Vec<Projection>, StoreError>;

    /// Replace every field except the id; `None` if no record has that id
    async fn update_by_id(
        &self,
        id: &RecordId<Self::Model>,
        data: Self::Model,
    ) -> Result<Option<Self::Model>, StoreError>;

    /// Delete a record; `false` if no record has that id
    async fn delete_by_id(&self, id: &RecordId<Self::Model>) -> Result<bool, StoreError>;

    /// Count total records of this type
    async fn count(&self) -> Result<i64, StoreError>;
}
