use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use store_object::RecordId;

use super::directory_record;

pub type SellerId = RecordId<Seller>;

/// The party offering an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub description: String,
}

directory_record!(
    Seller,
    table = "sellers",
    kind = "seller",
    collection = "sellers",
    label = "Seller",
    store = sellers,
    referent = Seller
);
