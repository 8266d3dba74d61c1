//! In-process store
//!
//! A `StoreObject` kept in a sharded concurrent map. Records are evaluated
//! against queries through their serialized form, so filters, sorts and
//! projections behave the same as the SQL backend for plain fields.

use crate::errors::StoreError;
use crate::id_type::RecordId;
use crate::query_builder::QueryBuilder;
use crate::table_metadata::Record;
use crate::traits::{Projection, StoreObject};
use crate::validation::ValidatedFieldName;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stored record plus its insertion sequence, which stands in for creation time
#[derive(Debug, Clone)]
struct Slot<T> {
    sequence: u64,
    record: T,
}

#[derive(Debug)]
pub struct MemoryStore<T: Record> {
    records: DashMap<RecordId<T>, Slot<T>>,
    sequence: AtomicU64,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matching records in query order, each with its serialized form
    fn select(&self, query: &QueryBuilder) -> Result<Vec<(T, Value)>, StoreError> {
        for condition in query.conditions() {
            ValidatedFieldName::new(&condition.field)?;
        }
        for (field, _) in query.ordering() {
            ValidatedFieldName::new(field)?;
        }

        let mut matched = Vec::new();
        for entry in self.records.iter() {
            let slot = entry.value();
            let serialized = serde_json::to_value(&slot.record)?;
            if query.conditions().iter().all(|c| c.matches(&serialized)) {
                matched.push((slot.sequence, slot.record.clone(), serialized));
            }
        }

        matched.sort_by_key(|(sequence, _, _)| *sequence);
        if !query.ordering().is_empty() {
            matched.sort_by(|(_, _, a), (_, _, b)| {
                query
                    .ordering()
                    .iter()
                    .map(|(field, order)| order.compare(a.get(field), b.get(field)))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        Ok(matched
            .into_iter()
            .map(|(_, record, serialized)| (record, serialized))
            .collect())
    }
}

#[async_trait]
impl<T: Record> StoreObject for MemoryStore<T> {
    type Model = T;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        let id = RecordId::generate();
        let record = data.with_id(id);
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        self.records.insert(
            id,
            Slot {
                sequence,
                record: record.clone(),
            },
        );
        tracing::debug!(table = T::table_name(), id = %id, "record created");
        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: &RecordId<Self::Model>,
    ) -> Result<Option<Self::Model>, StoreError> {
        Ok(self.records.get(id).map(|slot| slot.record.clone()))
    }

    async fn find_many(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError> {
        Ok(self
            .select(&query)?
            .into_iter()
            .map(|(record, _)| record)
            .collect())
    }

    async fn find_projected(&self, query: QueryBuilder) -> Result<Vec<Projection>, StoreError> {
        for field in query.projection() {
            ValidatedFieldName::new(field)?;
        }

        self.select(&query)?
            .into_iter()
            .map(|(_, serialized)| {
                let mut row: Projection = serde_json::from_value(serialized)?;
                if !query.projection().is_empty() {
                    row.retain(|field, _| query.projection().contains(field));
                }
                Ok(row)
            })
            .collect()
    }

    async fn update_by_id(
        &self,
        id: &RecordId<Self::Model>,
        data: Self::Model,
    ) -> Result<Option<Self::Model>, StoreError> {
        Ok(self.records.get_mut(id).map(|mut slot| {
            slot.record = data.with_id(*id);
            slot.record.clone()
        }))
    }

    async fn delete_by_id(&self, id: &RecordId<Self::Model>) -> Result<bool, StoreError> {
        Ok(self.records.remove(id).is_some())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.records.len() as i64)
    }
}
