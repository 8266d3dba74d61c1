//! Item handlers
//!
//! Items reference a category and a seller, so their forms carry both option
//! lists and their submits check that the chosen references exist.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use store_object::{Projection, QueryBuilder, RecordId, SortOrder, StoreError};

use super::{parse_id, see_other, AppState, FormInput};
use crate::errors::CatalogError;
use crate::models::{link, link_items, CategoryId, Item, ItemId, Linked, SellerId};
use crate::validation::{unescape, validate, Submission, ITEM_RULES};
use crate::views::Page;

const KIND: &str = "item";

/// Category and seller choices for the item form
struct Options {
    categories: Vec<Projection>,
    sellers: Vec<Projection>,
}

impl Options {
    async fn load(catalog: &AppState) -> Result<Self, StoreError> {
        let by_name = || {
            QueryBuilder::new()
                .select(&["id", "name"])
                .order_by("name", SortOrder::Asc)
        };
        let (categories, sellers) = tokio::try_join!(
            catalog.categories().find_projected(by_name()),
            catalog.sellers().find_projected(by_name()),
        )?;
        Ok(Self {
            categories,
            sellers,
        })
    }

    fn is_complete(&self) -> bool {
        !self.categories.is_empty() && !self.sellers.is_empty()
    }
}

fn form_page(title: &str, action: String, options: Options, submission: &Submission) -> Page {
    Page::new(
        "item_form",
        title,
        json!({
            "action": action,
            "categories": options.categories,
            "sellers": options.sellers,
            "values": submission.values,
            "errors": submission.violations,
        }),
    )
}

fn linked(item: Item) -> Linked<Item> {
    let url = item.url();
    Linked::new(item, url)
}

fn prefilled(item: &Item) -> Submission {
    Submission {
        values: BTreeMap::from([
            ("name", unescape(&item.name)),
            ("description", unescape(&item.description)),
            ("category", item.category.to_string()),
            ("seller", item.seller.to_string()),
            ("price", item.price.to_string()),
            ("number_in_stock", item.number_in_stock.to_string()),
        ]),
        violations: Vec::new(),
    }
}

/// Check that the chosen category and seller exist, recording a violation for each that does not
async fn resolve_references(
    catalog: &AppState,
    submission: &mut Submission,
) -> Result<Option<(CategoryId, SellerId)>, StoreError> {
    let mut category = None;
    if !submission.has_violation("category") {
        if let Ok(id) = CategoryId::parse(submission.value("category")) {
            if catalog.categories().find_by_id(&id).await?.is_some() {
                category = Some(id);
            }
        }
        if category.is_none() {
            submission.reject("category", "Category must be an existing category");
        }
    }

    let mut seller = None;
    if !submission.has_violation("seller") {
        if let Ok(id) = SellerId::parse(submission.value("seller")) {
            if catalog.sellers().find_by_id(&id).await?.is_some() {
                seller = Some(id);
            }
        }
        if seller.is_none() {
            submission.reject("seller", "Seller must be an existing seller");
        }
    }

    Ok(category.zip(seller))
}

/// Validate an item form; the typed record is built only when every rule passes
async fn candidate(
    catalog: &AppState,
    id: ItemId,
    input: &HashMap<String, String>,
) -> Result<(Submission, Option<Item>), StoreError> {
    let mut submission = validate(&ITEM_RULES, input);
    let references = resolve_references(catalog, &mut submission).await?;

    let item = match (references, submission.number("price"), submission.integer("number_in_stock")) {
        (Some((category, seller)), Some(price), Some(number_in_stock)) if submission.is_valid() => {
            Some(Item {
                id,
                name: submission.value("name").to_string(),
                description: submission.value("description").to_string(),
                category,
                seller,
                price,
                number_in_stock,
            })
        }
        _ => None,
    };

    Ok((submission, item))
}

pub async fn list(State(catalog): State<AppState>) -> Result<Page, CatalogError> {
    let items = catalog.items().find_many(QueryBuilder::new()).await?;

    Ok(Page::new(
        "item_list",
        "Item List",
        json!({ "items": link_items(items) }),
    ))
}

pub async fn details(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<Item>(KIND, &raw)?;
    let item = catalog
        .items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| CatalogError::not_found(KIND))?;

    let (category, seller) = tokio::try_join!(
        catalog.categories().find_by_id(&item.category),
        catalog.sellers().find_by_id(&item.seller),
    )?;
    if category.is_none() || seller.is_none() {
        tracing::warn!(
            item = %item.id,
            category = %item.category,
            seller = %item.seller,
            category_found = category.is_some(),
            seller_found = seller.is_some(),
            "item has a dangling reference"
        );
    }

    Ok(Page::new(
        "item_details",
        format!("Item: {}", item.name),
        json!({
            "item": linked(item),
            "category": category.map(link),
            "seller": seller.map(link),
        }),
    ))
}

pub async fn create_form(State(catalog): State<AppState>) -> Result<Page, CatalogError> {
    let options = Options::load(&catalog).await?;
    if !options.is_complete() {
        return Ok(Page::new(
            "item_create_alert",
            "Create Item",
            json!({
                "has_categories": !options.categories.is_empty(),
                "has_sellers": !options.sellers.is_empty(),
            }),
        ));
    }

    Ok(form_page(
        "Create Item",
        "/item/create".to_string(),
        options,
        &Submission::default(),
    ))
}

pub async fn create_submit(
    State(catalog): State<AppState>,
    FormInput(input): FormInput,
) -> Result<Response, CatalogError> {
    let (submission, item) = candidate(&catalog, RecordId::generate(), &input).await?;

    let Some(item) = item else {
        debug_log!("item create rejected: {} violations", submission.violations.len());
        let options = Options::load(&catalog).await?;
        return Ok(form_page("Create Item", "/item/create".to_string(), options, &submission)
            .into_response());
    };

    let created = catalog.items().create(item).await?;
    tracing::info!(kind = KIND, id = %created.id, "record created");

    Ok(see_other(&created.url()))
}

pub async fn update_form(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<Item>(KIND, &raw)?;

    let (item, options) = tokio::try_join!(catalog.items().find_by_id(&id), Options::load(&catalog))?;
    let item = item.ok_or_else(|| CatalogError::not_found(KIND))?;

    Ok(form_page(
        "Update Item",
        format!("{}/update", item.url()),
        options,
        &prefilled(&item),
    ))
}

pub async fn update_submit(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
    FormInput(input): FormInput,
) -> Result<Response, CatalogError> {
    let id = parse_id::<Item>(KIND, &raw)?;
    let (submission, item) = candidate(&catalog, id, &input).await?;

    let Some(item) = item else {
        let options = Options::load(&catalog).await?;
        return Ok(form_page(
            "Update Item",
            format!("/item/{}/update", id),
            options,
            &submission,
        )
        .into_response());
    };

    let updated = catalog
        .items()
        .update_by_id(&id, item)
        .await?
        .ok_or_else(|| CatalogError::not_found(KIND))?;
    tracing::info!(kind = KIND, id = %id, "record updated");

    Ok(see_other(&updated.url()))
}

pub async fn delete_form(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<Item>(KIND, &raw)?;
    let item = catalog
        .items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| CatalogError::not_found(KIND))?;

    Ok(Page::new(
        "item_delete",
        format!("Delete Item: {}", item.name),
        json!({ "item": linked(item) }),
    ))
}

pub async fn delete_submit(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, CatalogError> {
    let id = parse_id::<Item>(KIND, &raw)?;

    if !catalog.items().delete_by_id(&id).await? {
        return Err(CatalogError::not_found(KIND));
    }
    tracing::info!(kind = KIND, id = %id, "record deleted");

    Ok(see_other("/items"))
}
