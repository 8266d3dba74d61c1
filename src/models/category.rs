use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use store_object::RecordId;

use super::directory_record;

pub type CategoryId = RecordId<Category>;

/// A grouping of items, e.g. "Books"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

directory_record!(
    Category,
    table = "categories",
    kind = "category",
    collection = "categories",
    label = "Category",
    store = categories,
    referent = Category
);
