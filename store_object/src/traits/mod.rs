//! Trait definitions
//!
//! This module defines core traits for store operations.

pub mod core;
pub mod table_metadata;

pub use self::core::{Projection, StoreObject};
pub use table_metadata::{Column, Record, RecordQuery};
