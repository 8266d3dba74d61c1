//! Catalog records
//!
//! Categories and sellers share one shape (a name and a description) and are
//! both referenced by items; the `Directory` trait captures what the handlers
//! need from either of them.

mod category;
mod item;
mod seller;

pub use category::{Category, CategoryId};
pub use item::{Item, ItemId};
pub use seller::{Seller, SellerId};

use serde::Serialize;
use std::sync::Arc;
use store_object::{Record, RecordId, StoreObject};

use crate::core::Catalog;
use crate::guard::Referent;

/// A record kind that items reference and that is deleted only through the integrity guard
pub trait Directory: Record {
    /// Singular path segment and template prefix, e.g. `category`
    const KIND: &'static str;
    /// Plural path segment for the list view, e.g. `categories`
    const COLLECTION: &'static str;
    /// Human-readable name, e.g. `Category`
    const LABEL: &'static str;

    fn new(id: RecordId<Self>, name: String, description: String) -> Self;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// The guard target for a record of this kind
    fn referent(id: RecordId<Self>) -> Referent;

    fn store(catalog: &Catalog) -> &Arc<dyn StoreObject<Model = Self>>;

    fn url(&self) -> String {
        format!("/{}/{}", Self::KIND, self.id())
    }

    fn list_url() -> String {
        format!("/{}", Self::COLLECTION)
    }
}

/// A record serialized together with the links a view needs for it
#[derive(Debug, Clone, Serialize)]
pub struct Linked<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    pub url: String,
    pub update_url: String,
    pub delete_url: String,
}

impl<T: Serialize> Linked<T> {
    pub fn new(record: T, url: String) -> Self {
        Self {
            update_url: format!("{}/update", url),
            delete_url: format!("{}/delete", url),
            record,
            url,
        }
    }
}

/// Link a directory record for rendering
pub fn link<D: Directory>(record: D) -> Linked<D> {
    let url = record.url();
    Linked::new(record, url)
}

/// Link a batch of items for rendering
pub fn link_items(items: Vec<Item>) -> Vec<Linked<Item>> {
    items
        .into_iter()
        .map(|item| {
            let url = item.url();
            Linked::new(item, url)
        })
        .collect()
}

/// Implements `Record` and `Directory` for a name/description record.
macro_rules! directory_record {
    ($ty:ident, table = $table:literal, kind = $kind:literal, collection = $collection:literal, label = $label:literal, store = $store:ident, referent = $referent:ident) => {
        static COLUMNS: [store_object::Column; 2] = [
            store_object::Column::new("name", "TEXT NOT NULL"),
            store_object::Column::new("description", "TEXT NOT NULL"),
        ];

        impl store_object::Record for $ty {
            fn table_name() -> &'static str {
                $table
            }

            fn id(&self) -> store_object::RecordId<Self> {
                self.id
            }

            fn with_id(self, id: store_object::RecordId<Self>) -> Self {
                Self { id, ..self }
            }

            fn columns() -> &'static [store_object::Column] {
                &COLUMNS
            }

            fn bind_columns<'q>(
                &'q self,
                query: store_object::RecordQuery<'q, Self>,
            ) -> store_object::RecordQuery<'q, Self> {
                query.bind(&self.name).bind(&self.description)
            }
        }

        impl $crate::models::Directory for $ty {
            const KIND: &'static str = $kind;
            const COLLECTION: &'static str = $collection;
            const LABEL: &'static str = $label;

            fn new(id: store_object::RecordId<Self>, name: String, description: String) -> Self {
                Self {
                    id,
                    name,
                    description,
                }
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn referent(id: store_object::RecordId<Self>) -> $crate::guard::Referent {
                $crate::guard::Referent::$referent(id)
            }

            fn store(
                catalog: &$crate::core::Catalog,
            ) -> &std::sync::Arc<dyn store_object::StoreObject<Model = Self>> {
                catalog.$store()
            }
        }
    };
}

pub(crate) use directory_record;
