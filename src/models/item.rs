use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use store_object::{Column, Record, RecordId, RecordQuery};

use super::{CategoryId, SellerId};

pub type ItemId = RecordId<Item>;

/// A stocked product. `category` and `seller` hold ids only; nothing at the
/// storage layer guarantees they still resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: CategoryId,
    pub seller: SellerId,
    pub price: f64,
    pub number_in_stock: i64,
}

static COLUMNS: [Column; 6] = [
    Column::new("name", "TEXT NOT NULL"),
    Column::new("description", "TEXT NOT NULL"),
    Column::indexed("category", "UUID NOT NULL"),
    Column::indexed("seller", "UUID NOT NULL"),
    Column::new("price", "DOUBLE PRECISION NOT NULL CHECK (price >= 0)"),
    Column::new("number_in_stock", "BIGINT NOT NULL CHECK (number_in_stock >= 0)"),
];

impl Item {
    pub fn url(&self) -> String {
        format!("/item/{}", self.id)
    }
}

impl Record for Item {
    fn table_name() -> &'static str {
        "items"
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn with_id(self, id: ItemId) -> Self {
        Self { id, ..self }
    }

    fn columns() -> &'static [Column] {
        &COLUMNS
    }

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
        query
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.category)
            .bind(self.seller)
            .bind(self.price)
            .bind(self.number_in_stock)
    }
}
