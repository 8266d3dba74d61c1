//! Error types for the catalog application
//!
//! Validation failures and blocked deletions are not errors here: handlers
//! answer them by re-rendering their form. Everything in `CatalogError` ends
//! the request with the error page.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use store_object::StoreError;
use thiserror::Error;

use crate::views::Page;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid ID for {kind}: {raw}")]
    InvalidIdentifier { kind: &'static str, raw: String },

    #[error("{kind} not found")]
    NotFound { kind: &'static str },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unreadable form submission: {0}")]
    Form(#[from] FormRejection),
}

impl CatalogError {
    pub fn invalid_id(kind: &'static str, raw: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            raw: raw.into(),
        }
    }

    pub fn not_found(kind: &'static str) -> Self {
        Self::NotFound { kind }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Store(StoreError::InvalidIdentifier(_)) => StatusCode::BAD_REQUEST,
            CatalogError::Form(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown on the error page; internal failures stay generic
    fn public_message(&self) -> String {
        match self {
            CatalogError::InvalidIdentifier { kind, .. } => {
                format!("Page not found: invalid ID for {}", kind)
            }
            CatalogError::NotFound { kind } => format!("Page not found: {} not found", kind),
            CatalogError::Store(StoreError::InvalidIdentifier(_)) => {
                "Page not found: invalid ID".to_string()
            }
            CatalogError::Form(rejection) => rejection.body_text(),
            _ => "Something went wrong".to_string(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Page::error(status, self.public_message())).into_response()
    }
}
