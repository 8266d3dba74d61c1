use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error on {table} during {operation}: {source}")]
    DatabaseError {
        table: &'static str,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid field in query: {0}")]
    InvalidField(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StoreError {
    pub fn database_operation(
        table: &'static str,
        operation: &'static str,
        source: sqlx::Error,
    ) -> Self {
        Self::DatabaseError {
            table,
            operation,
            source,
        }
    }
}
