//! Table creation for the PostgreSQL backend
//!
//! Tables and indexes are derived from each record's column list. The
//! in-memory backend has no schema and migrating it is a no-op.

use sqlx::PgPool;
use store_object::Record;

use crate::core::Catalog;
use crate::errors::CatalogError;
use crate::models::{Category, Item, Seller};

impl Catalog {
    /// Create every catalog table and its indexes.
    /// If `recreate` is true, existing tables are dropped first.
    pub async fn auto_migrate(&self, recreate: bool) -> Result<(), CatalogError> {
        let Some(pool) = self.pool() else {
            tracing::info!("in-memory backend, nothing to migrate");
            return Ok(());
        };

        if recreate {
            // items first: it is the table holding references
            drop_table::<Item>(pool).await?;
            drop_table::<Category>(pool).await?;
            drop_table::<Seller>(pool).await?;
        }

        ensure_updated_at_function(pool).await?;
        migrate_table::<Category>(pool).await?;
        migrate_table::<Seller>(pool).await?;
        migrate_table::<Item>(pool).await?;

        Ok(())
    }
}

async fn run(pool: &PgPool, sql: &str) -> Result<(), CatalogError> {
    trace_log!("Executing migration SQL: {}", sql);
    sqlx::query(sql)
        .execute(pool)
        .await
        .map_err(CatalogError::Connection)?;
    Ok(())
}

async fn drop_table<T: Record>(pool: &PgPool) -> Result<(), CatalogError> {
    tracing::info!(table = T::table_name(), "dropping table");
    run(pool, &T::drop_table_sql()).await
}

async fn ensure_updated_at_function(pool: &PgPool) -> Result<(), CatalogError> {
    run(
        pool,
        r#"
        CREATE OR REPLACE FUNCTION update_updated_at_column()
        RETURNS TRIGGER AS $$
        BEGIN
            NEW.__updated_at__ = NOW();
            RETURN NEW;
        END;
        $$ language 'plpgsql';
        "#,
    )
    .await
}

async fn migrate_table<T: Record>(pool: &PgPool) -> Result<(), CatalogError> {
    let table_name = T::table_name();
    tracing::info!(table = table_name, "creating table");
    run(pool, &T::create_table_sql()).await?;

    let trigger_sql = format!(
        "CREATE TRIGGER update_{0}_updated_at BEFORE UPDATE ON {0} \
         FOR EACH ROW EXECUTE FUNCTION update_updated_at_column()",
        table_name
    );
    let trigger_check_sql = format!(
        "DO $$
         BEGIN
             IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = 'update_{}_updated_at') THEN
                 EXECUTE '{}';
             END IF;
         END $$",
        table_name, trigger_sql
    );
    run(pool, &trigger_check_sql).await?;

    for index_sql in T::create_indexes_sql() {
        run(pool, &index_sql).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_catalog_migrates_trivially() {
        let catalog = Catalog::in_memory();
        catalog.auto_migrate(true).await.unwrap();
    }
}
