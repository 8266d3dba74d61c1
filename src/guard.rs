//! Referential-integrity guard for deletions
//!
//! A category or seller may be deleted only while no item references it. The
//! check is a plain read: nothing stops an item from being attached to the
//! target between the check and the delete.

use serde::Serialize;
use serde_json::Value;
use store_object::{QueryBuilder, StoreError};

use crate::core::Catalog;
use crate::models::{CategoryId, Item, SellerId};

/// A record that items can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referent {
    Category(CategoryId),
    Seller(SellerId),
}

impl Referent {
    /// The item field holding references of this kind
    pub fn item_field(&self) -> &'static str {
        match self {
            Referent::Category(_) => "category",
            Referent::Seller(_) => "seller",
        }
    }

    fn id_value(&self) -> Value {
        match self {
            Referent::Category(id) => id.to_value(),
            Referent::Seller(id) => id.to_value(),
        }
    }
}

/// Outcome of a deletion check
#[derive(Debug, Clone, Serialize)]
pub struct DeleteCheck {
    pub allowed: bool,
    /// Items still referencing the target
    pub blocking_items: Vec<Item>,
}

impl Catalog {
    /// Items that reference `target`
    pub async fn referencing_items(&self, target: Referent) -> Result<Vec<Item>, StoreError> {
        self.items()
            .find_many(QueryBuilder::new().eq(target.item_field(), target.id_value()))
            .await
    }

    /// Whether `target` can be deleted right now
    pub async fn can_delete(&self, target: Referent) -> Result<DeleteCheck, StoreError> {
        let blocking_items = self.referencing_items(target).await?;
        if !blocking_items.is_empty() {
            tracing::warn!(
                referent = ?target,
                blocking = blocking_items.len(),
                "deletion blocked by referencing items"
            );
        }

        Ok(DeleteCheck {
            allowed: blocking_items.is_empty(),
            blocking_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Directory, ItemId, Seller};

    async fn seeded() -> (Catalog, Category, Seller) {
        let catalog = Catalog::in_memory();
        let category = catalog
            .categories()
            .create(Category::new(CategoryId::generate(), "Books".into(), "Books of various genres".into()))
            .await
            .unwrap();
        let seller = catalog
            .sellers()
            .create(Seller::new(SellerId::generate(), "Universal Libraire".into(), "Books from everywhere".into()))
            .await
            .unwrap();
        (catalog, category, seller)
    }

    fn item(category: CategoryId, seller: SellerId) -> Item {
        Item {
            id: ItemId::generate(),
            name: "The Hitchhiker's Guide to the Galaxy".into(),
            description: "A classic science fiction comedy".into(),
            category,
            seller,
            price: 15.99,
            number_in_stock: 80,
        }
    }

    #[tokio::test]
    async fn test_unreferenced_target_can_be_deleted() {
        let (catalog, category, seller) = seeded().await;

        let check = catalog.can_delete(Referent::Category(category.id)).await.unwrap();
        assert!(check.allowed);
        assert!(check.blocking_items.is_empty());

        let check = catalog.can_delete(Referent::Seller(seller.id)).await.unwrap();
        assert!(check.allowed);
    }

    #[tokio::test]
    async fn test_referencing_items_block_deletion() {
        let (catalog, category, seller) = seeded().await;
        let created = catalog.items().create(item(category.id, seller.id)).await.unwrap();

        let check = catalog.can_delete(Referent::Category(category.id)).await.unwrap();
        assert!(!check.allowed);
        assert_eq!(check.blocking_items, vec![created.clone()]);

        let check = catalog.can_delete(Referent::Seller(seller.id)).await.unwrap();
        assert!(!check.allowed);

        catalog.items().delete_by_id(&created.id).await.unwrap();
        let check = catalog.can_delete(Referent::Category(category.id)).await.unwrap();
        assert!(check.allowed);
    }

    #[tokio::test]
    async fn test_only_the_matching_field_is_considered() {
        let (catalog, category, seller) = seeded().await;
        let other = catalog
            .categories()
            .create(Category::new(CategoryId::generate(), "Technology".into(), "Gadgets".into()))
            .await
            .unwrap();
        catalog.items().create(item(category.id, seller.id)).await.unwrap();

        let check = catalog.can_delete(Referent::Category(other.id)).await.unwrap();
        assert!(check.allowed);
    }

    #[tokio::test]
    async fn test_check_is_not_atomic_with_the_delete() {
        // The guard reads, then the caller acts. An item created in between is
        // not seen, and ends up referencing a deleted category.
        let (catalog, category, seller) = seeded().await;

        let check = catalog.can_delete(Referent::Category(category.id)).await.unwrap();
        assert!(check.allowed);

        let racing = catalog.items().create(item(category.id, seller.id)).await.unwrap();
        assert!(catalog.categories().delete_by_id(&category.id).await.unwrap());

        let dangling = catalog.items().find_by_id(&racing.id).await.unwrap().unwrap();
        assert!(catalog.categories().find_by_id(&dangling.category).await.unwrap().is_none());
    }
}
