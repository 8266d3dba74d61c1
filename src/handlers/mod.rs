//! Request handlers
//!
//! Each handler maps one route to a store workflow and answers with a `Page`,
//! a redirect, or a `CatalogError`.

pub mod dashboard;
pub mod directory;
pub mod item;

use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use std::collections::HashMap;
use std::sync::Arc;
use store_object::RecordId;

use crate::core::Catalog;
use crate::errors::CatalogError;

/// Shared handler state: the catalog built at startup
pub type AppState = Arc<Catalog>;

/// Raw submitted form fields.
///
/// Rejections (wrong content type, undecodable body) end the request with the
/// error page rather than axum's plain-text answer.
#[derive(Debug, Clone, Default)]
pub struct FormInput(pub HashMap<String, String>);

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
        Ok(Self(fields))
    }
}

/// Parse a path id before any store access
pub(crate) fn parse_id<K>(kind: &'static str, raw: &str) -> Result<RecordId<K>, CatalogError> {
    RecordId::parse(raw).map_err(|_| CatalogError::invalid_id(kind, raw))
}

/// Send the client to `url` after a successful submit
pub(crate) fn see_other(url: &str) -> Response {
    Redirect::to(url).into_response()
}
