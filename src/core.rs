//! Core catalog functionality
//!
//! The `Catalog` owns one store per record kind. It is built once at startup,
//! shared by every request, and closed at shutdown.

use std::sync::Arc;
use std::time::Duration;

use config::{AppConfig, DatabaseConfig, StoreBackend};
use sqlx::PgPool;
use store_object::{GenericStore, MemoryStore, StoreObject};

use crate::errors::CatalogError;
use crate::models::{Category, Item, Seller};

pub struct Catalog {
    pool: Option<PgPool>,
    categories: Arc<dyn StoreObject<Model = Category>>,
    sellers: Arc<dyn StoreObject<Model = Seller>>,
    items: Arc<dyn StoreObject<Model = Item>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("backend", &self.backend())
            .finish()
    }
}

impl Catalog {
    /// Build the catalog for the configured backend
    pub async fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        match (config.store.backend, &config.database) {
            (StoreBackend::Memory, _) => Ok(Self::in_memory()),
            (StoreBackend::Postgres, Some(database)) => Self::connect(database).await,
            (StoreBackend::Postgres, None) => Err(CatalogError::Config(
                config::ConfigError::Invalid("postgres backend without [database]".to_string()),
            )),
        }
    }

    /// Create a catalog backed by PostgreSQL
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, CatalogError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options
            .connect(&connection_string)
            .await
            .map_err(CatalogError::Connection)?;
        tracing::info!(host = %config.host, database = %config.database, "connected to PostgreSQL");

        Ok(Self::from_pool(pool))
    }

    /// Create a catalog over an already connected pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            categories: Arc::new(GenericStore::<Category>::new(pool.clone())),
            sellers: Arc::new(GenericStore::<Seller>::new(pool.clone())),
            items: Arc::new(GenericStore::<Item>::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a catalog whose stores live in process memory
    pub fn in_memory() -> Self {
        Self {
            pool: None,
            categories: Arc::new(MemoryStore::<Category>::new()),
            sellers: Arc::new(MemoryStore::<Seller>::new()),
            items: Arc::new(MemoryStore::<Item>::new()),
        }
    }

    pub fn backend(&self) -> StoreBackend {
        if self.pool.is_some() {
            StoreBackend::Postgres
        } else {
            StoreBackend::Memory
        }
    }

    /// Database pool, when backed by PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn categories(&self) -> &Arc<dyn StoreObject<Model = Category>> {
        &self.categories
    }

    pub fn sellers(&self) -> &Arc<dyn StoreObject<Model = Seller>> {
        &self.sellers
    }

    pub fn items(&self) -> &Arc<dyn StoreObject<Model = Item>> {
        &self.items
    }

    /// Check store connectivity
    pub async fn health_check(&self) -> Result<(), CatalogError> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .map_err(CatalogError::Connection)?;
        }
        Ok(())
    }

    /// Close the database pool; in-memory catalogs have nothing to release
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("database pool closed");
        }
    }
}
