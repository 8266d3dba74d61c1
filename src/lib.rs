//! # Catalog
//!
//! A server-rendered catalog of categories, sellers and items. Items reference
//! one category and one seller; a category or seller cannot be deleted while
//! any item still references it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::in_memory();
//!     catalog.seed().await?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router(Arc::new(catalog))).await?;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod guard;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod prelude;
pub mod routes;
pub mod seed;
pub mod validation;
pub mod views;

// Re-export the main public types for convenience
pub use self::core::Catalog;
pub use errors::CatalogError;
pub use routes::router;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, StoreBackend};

pub use store_object;
