//! Trait definitions
//!
//! Table metadata for persisted record types.

use crate::id_type::RecordId;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::Postgres;
use std::fmt::Debug;

/// Name of the system column recording insertion time
pub const CREATED_AT_COLUMN: &str = "__created_at__";

/// Name of the system column recording the last update
pub const UPDATED_AT_COLUMN: &str = "__updated_at__";

/// A data column of a record table, excluding the `id` primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// PostgreSQL type and constraints, e.g. `TEXT NOT NULL`
    pub definition: &'static str,
    /// Whether an index is created for lookups on this column
    pub indexed: bool,
}

impl Column {
    pub const fn new(name: &'static str, definition: &'static str) -> Self {
        Self {
            name,
            definition,
            indexed: false,
        }
    }

    pub const fn indexed(name: &'static str, definition: &'static str) -> Self {
        Self {
            name,
            definition,
            indexed: true,
        }
    }
}

/// Metadata about a record type and its table.
///
/// Implementations list their data columns in the same order `bind_columns`
/// binds them; the SQL statements below are derived from that list.
///
/// ```ignore
/// impl Record for Category {
///     fn table_name() -> &'static str { "categories" }
///     fn id(&self) -> RecordId<Self> { self.id }
///     fn with_id(self, id: RecordId<Self>) -> Self { Self { id, ..self } }
///     fn columns() -> &'static [Column] { &CATEGORY_COLUMNS }
///     fn bind_columns<'q>(&'q self, q: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
///         q.bind(&self.name).bind(&self.description)
///     }
/// }
/// ```
pub trait Record:
    Clone + Send + Sync + Debug + Serialize + Unpin + for<'r> sqlx::FromRow<'r, PgRow> + 'static
{
    /// The table name in the database
    fn table_name() -> &'static str;

    /// The primary key of this record
    fn id(&self) -> RecordId<Self>;

    /// The same record carrying a different id
    fn with_id(self, id: RecordId<Self>) -> Self;

    /// Data columns, in bind order
    fn columns() -> &'static [Column];

    /// Bind every data column, in `columns()` order, after whatever is already bound
    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self>;

    /// Whether `field` is stored as a PostgreSQL `UUID`
    fn is_uuid_column(field: &str) -> bool {
        field == "id"
            || Self::columns()
                .iter()
                .any(|c| c.name == field && c.definition.starts_with("UUID"))
    }

    /// Ordering used when a query asks for none
    fn default_order() -> String {
        format!("\"{}\" ASC", CREATED_AT_COLUMN)
    }

    /// `INSERT ... RETURNING *`, with the id bound as `$1`
    fn insert_sql() -> String {
        let columns = Self::columns();
        let names = columns
            .iter()
            .map(|c| format!("\"{}\"", c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (2..=columns.len() + 1)
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} (\"id\", {}) VALUES ($1, {}) RETURNING *",
            Self::table_name(),
            names,
            placeholders
        )
    }

    /// `UPDATE ... RETURNING *`, with the id bound as `$1`
    fn update_sql() -> String {
        let assignments = Self::columns()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("\"{}\" = ${}", c.name, i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {}, \"{}\" = NOW() WHERE \"id\" = $1 RETURNING *",
            Self::table_name(),
            assignments,
            UPDATED_AT_COLUMN
        )
    }

    fn get_by_id_sql() -> String {
        format!("SELECT * FROM {} WHERE \"id\" = $1", Self::table_name())
    }

    fn delete_by_id_sql() -> String {
        format!("DELETE FROM {} WHERE \"id\" = $1", Self::table_name())
    }

    fn count_all_sql() -> String {
        format!("SELECT COUNT(*) AS total FROM {}", Self::table_name())
    }

    /// Generate CREATE TABLE SQL statement
    fn create_table_sql() -> String {
        let mut definitions = vec!["\"id\" UUID PRIMARY KEY".to_string()];
        definitions.extend(
            Self::columns()
                .iter()
                .map(|c| format!("\"{}\" {}", c.name, c.definition)),
        );
        definitions.push(format!(
            "\"{}\" TIMESTAMPTZ NOT NULL DEFAULT NOW()",
            CREATED_AT_COLUMN
        ));
        definitions.push(format!(
            "\"{}\" TIMESTAMPTZ NOT NULL DEFAULT NOW()",
            UPDATED_AT_COLUMN
        ));

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            Self::table_name(),
            definitions.join(", ")
        )
    }

    /// Generate DROP TABLE SQL statement
    fn drop_table_sql() -> String {
        format!("DROP TABLE IF EXISTS {}", Self::table_name())
    }

    /// Generate CREATE INDEX SQL statements
    fn create_indexes_sql() -> Vec<String> {
        let table = Self::table_name();
        let mut indexes: Vec<String> = Self::columns()
            .iter()
            .filter(|c| c.indexed)
            .map(|c| {
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {} (\"{}\")",
                    table, c.name, table, c.name
                )
            })
            .collect();
        indexes.push(format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_created_at ON {} (\"{}\")",
            table, table, CREATED_AT_COLUMN
        ));
        indexes
    }
}

/// A `query_as` statement decoding into record `T`
pub type RecordQuery<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;
