//! Sample data for a fresh catalog

use crate::core::Catalog;
use crate::errors::CatalogError;
use crate::models::{Category, CategoryId, Directory, Item, ItemId, Seller, SellerId};
use crate::validation::escape;

const CATEGORIES: [(&str, &str); 5] = [
    ("Food & Groceries", "Foods and grocery items"),
    ("Technology", "Gadgets and electronics"),
    ("Books", "Books of various genres"),
    ("Entertainment", "Various movies, shows, and video games"),
    ("Beauty and health", "Beauty and health products"),
];

const SELLERS: [(&str, &str); 5] = [
    (
        "Creation Corp.",
        "Technocrats and producers of industry leading tech.",
    ),
    (
        "Monsieur Boulangerie Inc.",
        "World's finest bakers and makers of your favorite pastries.",
    ),
    (
        "Universal Libraire",
        "We're a company that sells books from all over the world. From superhero comic, to ancient greek literature, find your book today!",
    ),
    (
        "Artist Entertainment",
        "Come stream your favorite shows or movies!",
    ),
    (
        "Crema & Sol",
        "The best producers of beauty products! Come get your shampoo, makeup, eyeliner, and other essentials.",
    ),
];

/// (name, description, category index, seller index, price, number in stock)
const ITEMS: [(&str, &str, usize, usize, f64, i64); 5] = [
    (
        "Milky Way Cookies",
        "Cosmic cookies that taste like cosmic dust itself.",
        0,
        1,
        12.99,
        120,
    ),
    (
        "iPhone 15",
        "The latest flagship smartphone from Creation Corp.",
        1,
        0,
        999.99,
        50,
    ),
    (
        "The Hitchhiker's Guide to the Galaxy",
        "A classic science fiction comedy by Douglas Adams.",
        2,
        2,
        15.99,
        80,
    ),
    (
        "Nintendo Switch",
        "A versatile gaming console for home and on-the-go entertainment.",
        3,
        3,
        299.99,
        30,
    ),
    (
        "Organic Lavender Shampoo",
        "Gentle shampoo infused with organic lavender extracts.",
        4,
        4,
        9.99,
        100,
    ),
];

/// Counts of the records a seed run created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub sellers: usize,
    pub items: usize,
}

impl Catalog {
    /// Insert the sample categories, sellers and items, escaped like form input
    pub async fn seed(&self) -> Result<SeedSummary, CatalogError> {
        let mut categories = Vec::with_capacity(CATEGORIES.len());
        for (name, description) in CATEGORIES {
            let category = Category::new(CategoryId::generate(), escape(name), escape(description));
            let created = self.categories().create(category).await?;
            tracing::info!(name, "added category");
            categories.push(created.id);
        }

        let mut sellers = Vec::with_capacity(SELLERS.len());
        for (name, description) in SELLERS {
            let seller = Seller::new(SellerId::generate(), escape(name), escape(description));
            let created = self.sellers().create(seller).await?;
            tracing::info!(name, "added seller");
            sellers.push(created.id);
        }

        for (name, description, category, seller, price, number_in_stock) in ITEMS {
            let item = Item {
                id: ItemId::generate(),
                name: escape(name),
                description: escape(description),
                category: categories[category],
                seller: sellers[seller],
                price,
                number_in_stock,
            };
            self.items().create(item).await?;
            tracing::info!(name, "added item");
        }

        Ok(SeedSummary {
            categories: categories.len(),
            sellers: sellers.len(),
            items: ITEMS.len(),
        })
    }
}
