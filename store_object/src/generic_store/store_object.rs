//! Generic store implementations
//!
//! PostgreSQL implementation of the `StoreObject` contract.

use super::core::GenericStore;
use crate::errors::StoreError;
use crate::id_type::RecordId;
use crate::query_builder::QueryBuilder;
use crate::table_metadata::Record;
use crate::traits::{Projection, StoreObject};
use async_trait::async_trait;

#[async_trait]
impl<T> StoreObject for GenericStore<T>
where
    T: Record,
{
    type Model = T;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        let record = data.with_id(RecordId::generate());
        let sql = T::insert_sql();

        let query = sqlx::query_as::<_, T>(&sql).bind(record.id());
        let created = record
            .bind_columns(query)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "create", e))?;

        tracing::debug!(table = T::table_name(), id = %created.id(), "record created");
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: &RecordId<Self::Model>,
    ) -> Result<Option<Self::Model>, StoreError> {
        let sql = T::get_by_id_sql();
        sqlx::query_as::<_, T>(&sql)
            .bind(*id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "find_by_id", e))
    }

    async fn find_many(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError> {
        let (sql, params) = query.build_select(T::table_name(), &T::default_order())?;
        tracing::debug!(table = T::table_name(), sql = %sql, "find_many");

        let mut sqlx_query = sqlx::query_as::<_, T>(&sql);
        for (condition, param) in query.conditions().iter().zip(params) {
            sqlx_query = bind_json_param!(sqlx_query, param, T::is_uuid_column(&condition.field));
        }

        sqlx_query
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "find_many", e))
    }

    async fn find_projected(&self, query: QueryBuilder) -> Result<Vec<Projection>, StoreError> {
        let (sql, params) = query.build_projected_select(T::table_name(), &T::default_order())?;
        tracing::debug!(table = T::table_name(), sql = %sql, "find_projected");

        let mut sqlx_query = sqlx::query_scalar::<_, serde_json::Value>(&sql);
        for (condition, param) in query.conditions().iter().zip(params) {
            sqlx_query = bind_json_param!(sqlx_query, param, T::is_uuid_column(&condition.field));
        }

        let rows = sqlx_query
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "find_projected", e))?;

        rows.into_iter()
            .map(|row| serde_json::from_value::<Projection>(row).map_err(StoreError::from))
            .collect()
    }

    async fn update_by_id(
        &self,
        id: &RecordId<Self::Model>,
        data: Self::Model,
    ) -> Result<Option<Self::Model>, StoreError> {
        let record = data.with_id(*id);
        let sql = T::update_sql();

        let query = sqlx::query_as::<_, T>(&sql).bind(*id);
        let updated = record
            .bind_columns(query)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "update_by_id", e))?;

        if updated.is_some() {
            tracing::debug!(table = T::table_name(), id = %id, "record updated");
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &RecordId<Self::Model>) -> Result<bool, StoreError> {
        let sql = T::delete_by_id_sql();
        let result = sqlx::query(&sql)
            .bind(*id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "delete_by_id", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let sql = T::count_all_sql();
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "count", e))
    }
}
