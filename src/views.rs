//! View models handed to the presentation layer
//!
//! A `Page` names the template to render and carries its context. HTML
//! rendering happens outside this crate; the page travels as JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub template: String,
    pub title: String,
    pub context: Value,
}

impl Page {
    pub fn new(template: impl Into<String>, title: impl Into<String>, context: Value) -> Self {
        Self {
            template: template.into(),
            title: title.into(),
            context,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(
            "error",
            "Error",
            json!({
                "status": status.as_u16(),
                "message": message.into(),
            }),
        )
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
