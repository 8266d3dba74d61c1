use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::AppState;
use crate::errors::CatalogError;
use crate::views::Page;

/// Home page: how many records of each kind exist
pub async fn index(State(catalog): State<AppState>) -> Result<Page, CatalogError> {
    let (num_categories, num_items, num_sellers) = tokio::try_join!(
        catalog.categories().count(),
        catalog.items().count(),
        catalog.sellers().count(),
    )?;

    Ok(Page::new(
        "index",
        "Home",
        json!({
            "num_categories": num_categories,
            "num_items": num_items,
            "num_sellers": num_sellers,
        }),
    ))
}

pub async fn health(State(catalog): State<AppState>) -> Result<Json<Value>, CatalogError> {
    catalog.health_check().await?;
    Ok(Json(json!({ "status": "ok", "backend": catalog.backend() })))
}
