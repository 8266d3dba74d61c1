//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use catalog::prelude::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub catalog: Arc<Catalog>,
    router: Router,
}

/// A response with its body already collected
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestResponse {
    pub fn template(&self) -> &str {
        self.body["template"].as_str().unwrap_or_default()
    }

    pub fn context(&self) -> &Value {
        &self.body["context"]
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.context()["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["message"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn error_fields(&self) -> Vec<String> {
        self.context()["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let catalog = Arc::new(Catalog::in_memory());
        Self {
            router: router(catalog.clone()),
            catalog,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    /// POST a body without declaring its content type
    pub async fn post_untyped(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri).body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    /// Submit a create form and return the new record's detail URL
    pub async fn create(&self, kind: &str, fields: &[(&str, &str)]) -> String {
        let response = self.post(&format!("/{}/create", kind), fields).await;
        assert_eq!(
            response.status,
            StatusCode::SEE_OTHER,
            "create {} failed: {}",
            kind,
            response.body
        );
        response.location.unwrap()
    }

    pub async fn create_category(&self, name: &str) -> String {
        self.create("category", &[("name", name), ("description", "A category")])
            .await
    }

    pub async fn create_seller(&self, name: &str) -> String {
        self.create("seller", &[("name", name), ("description", "A seller")])
            .await
    }

    pub async fn create_item(&self, name: &str, category_url: &str, seller_url: &str) -> String {
        self.create(
            "item",
            &[
                ("name", name),
                ("description", "An item"),
                ("category", id_of(category_url)),
                ("seller", id_of(seller_url)),
                ("price", "12.99"),
                ("number_in_stock", "120"),
            ],
        )
        .await
    }
}

/// Last path segment of a detail URL
pub fn id_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
