//! Query builder utilities
//!
//! This module provides the query value passed to `find_many`/`find_projected`.

use crate::errors::StoreError;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::sql_generation::SqlGenerator;
use serde_json::Value;

/// Query builder for constructing store queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) projection: Vec<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Shorthand for `filter(QueryFilter::eq(field, value))`
    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(QueryFilter::eq(field, value))
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), order));
        self
    }

    /// Restrict the fields returned by `find_projected`
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.projection = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn conditions(&self) -> &[QueryFilter] {
        &self.conditions
    }

    pub fn ordering(&self) -> &[(String, SortOrder)] {
        &self.order_by
    }

    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    /// Build WHERE clause
    pub fn build_where_clause(&self) -> Result<(String, Vec<Value>), StoreError> {
        SqlGenerator::build_where_clause(&self.conditions)
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(&self) -> Result<String, StoreError> {
        SqlGenerator::build_order_clause(&self.order_by)
    }

    /// Build the complete SELECT statement against `table`
    pub fn build_select(
        &self,
        table: &str,
        default_order: &str,
    ) -> Result<(String, Vec<Value>), StoreError> {
        SqlGenerator::build_select(self, table, default_order)
    }

    /// Build a SELECT that returns each row as a JSON object of the projected fields
    pub fn build_projected_select(
        &self,
        table: &str,
        default_order: &str,
    ) -> Result<(String, Vec<Value>), StoreError> {
        SqlGenerator::build_projected_select(self, table, default_order)
    }
}
