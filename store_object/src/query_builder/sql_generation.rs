//! Query builder utilities
//!
//! SQL generation for PostgreSQL. Values never appear in the SQL text; they are
//! returned alongside it in placeholder order.

use crate::errors::StoreError;
use crate::query_builder::builder::QueryBuilder;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;
use crate::validation::ValidatedFieldName;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from conditions
    pub fn build_where_clause(
        conditions: &[QueryFilter],
    ) -> Result<(String, Vec<Value>), StoreError> {
        if conditions.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut values = Vec::with_capacity(conditions.len());
        let mut parts = Vec::with_capacity(conditions.len());

        for (i, condition) in conditions.iter().enumerate() {
            let field = ValidatedFieldName::new(&condition.field)?;
            parts.push(format!("{} = ${}", field.quoted(), i + 1));
            values.push(condition.value.clone());
        }

        Ok((format!("WHERE {}", parts.join(" AND ")), values))
    }

    /// Build ORDER BY clause from ordering
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> Result<String, StoreError> {
        if order_by.is_empty() {
            return Ok(String::new());
        }

        let parts = order_by
            .iter()
            .map(|(field, order)| {
                ValidatedFieldName::new(field)
                    .map(|field| format!("{} {}", field.quoted(), order.to_sql()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    /// Build the column list for a projected select.
    ///
    /// An empty projection returns the whole row.
    pub fn build_projection(table: &str, projection: &[String]) -> Result<String, StoreError> {
        if projection.is_empty() {
            return Ok(format!("row_to_json({})", table));
        }

        let pairs = projection
            .iter()
            .map(|field| {
                ValidatedFieldName::new(field)
                    .map(|field| format!("'{}', {}", field.as_str(), field.quoted()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("json_build_object({})", pairs.join(", ")))
    }

    pub fn build_select(
        query: &QueryBuilder,
        table: &str,
        default_order: &str,
    ) -> Result<(String, Vec<Value>), StoreError> {
        Self::assemble(query, format!("SELECT * FROM {}", table), default_order)
    }

    pub fn build_projected_select(
        query: &QueryBuilder,
        table: &str,
        default_order: &str,
    ) -> Result<(String, Vec<Value>), StoreError> {
        let projection = Self::build_projection(table, &query.projection)?;
        Self::assemble(
            query,
            format!("SELECT {} AS projection FROM {}", projection, table),
            default_order,
        )
    }

    fn assemble(
        query: &QueryBuilder,
        base: String,
        default_order: &str,
    ) -> Result<(String, Vec<Value>), StoreError> {
        let (where_clause, values) = Self::build_where_clause(&query.conditions)?;
        let order_clause = Self::build_order_clause(&query.order_by)?;

        let mut sql = String::with_capacity(base.len() + where_clause.len() + order_clause.len() + 16);
        sql.push_str(&base);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        if !order_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&order_clause);
        } else if !default_order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(default_order);
        }

        Ok((sql, values))
    }
}
