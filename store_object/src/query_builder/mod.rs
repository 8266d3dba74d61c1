//! Query builder utilities
//!
//! This module provides query construction for `find_many`: equality filters,
//! ordering and field projection.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod sql_generation;


pub use builder::QueryBuilder;
pub use filter::QueryFilter;
pub use ordering::SortOrder;
