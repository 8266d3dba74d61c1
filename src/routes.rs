//! Route table
//!
//! Maps every HTTP path onto its handler. Categories and sellers share one
//! generic handler set and are mounted through `directory_routes`.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{dashboard, directory, item, AppState};
use crate::models::{Category, Directory, Seller};

/// Build the application router around a shared catalog
pub fn router(catalog: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/health", get(dashboard::health))
        .merge(directory_routes::<Category>())
        .merge(directory_routes::<Seller>())
        .route("/items", get(item::list))
        .route("/item/create", get(item::create_form).post(item::create_submit))
        .route("/item/{id}", get(item::details))
        .route(
            "/item/{id}/update",
            get(item::update_form).post(item::update_submit),
        )
        .route(
            "/item/{id}/delete",
            get(item::delete_form).post(item::delete_submit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

fn directory_routes<D: Directory>() -> Router<AppState> {
    let record = format!("/{}/{{id}}", D::KIND);

    Router::new()
        .route(&D::list_url(), get(directory::list::<D>))
        .route(
            &format!("/{}/create", D::KIND),
            get(directory::create_form::<D>).post(directory::create_submit::<D>),
        )
        .route(&record, get(directory::details::<D>))
        .route(
            &format!("{}/update", record),
            get(directory::update_form::<D>).post(directory::update_submit::<D>),
        )
        .route(
            &format!("{}/delete", record),
            get(directory::delete_form::<D>).post(directory::delete_submit::<D>),
        )
}
