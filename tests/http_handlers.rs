mod common;

use axum::http::StatusCode;
use catalog::prelude::*;
use common::{id_of, TestApp};

#[tokio::test]
async fn test_create_category_then_view_details() {
    let app = TestApp::new();

    let url = app
        .create(
            "category",
            &[("name", "Books"), ("description", "Books of various genres")],
        )
        .await;
    assert!(url.starts_with("/category/"));

    let details = app.get(&url).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.template(), "category_details");
    assert_eq!(details.context()["category"]["name"], "Books");
    assert_eq!(
        details.context()["category"]["description"],
        "Books of various genres"
    );
    assert_eq!(details.context()["category"]["id"], id_of(&url));
    assert_eq!(details.context()["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_created_record_reflects_sanitized_input() {
    let app = TestApp::new();

    let url = app
        .create(
            "seller",
            &[("name", "  <b>Crema & Sol</b> "), ("description", "Shampoo/makeup")],
        )
        .await;

    let details = app.get(&url).await;
    assert_eq!(
        details.context()["seller"]["name"],
        "&lt;b&gt;Crema &amp; Sol&lt;&#x2F;b&gt;"
    );
    assert_eq!(details.context()["seller"]["description"], "Shampoo&#x2F;makeup");
}

#[tokio::test]
async fn test_name_length_bound_is_inclusive() {
    let app = TestApp::new();

    let exact = "a".repeat(100);
    app.create("category", &[("name", &exact), ("description", "d")])
        .await;

    let over = "a".repeat(101);
    let rejected = app
        .post("/category/create", &[("name", &over), ("description", "d")])
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.template(), "category_form");
    assert_eq!(rejected.error_fields(), ["name"]);
    assert_eq!(rejected.context()["values"]["name"], over);

    assert_eq!(app.catalog.categories().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_blank_directory_form_lists_every_violation() {
    let app = TestApp::new();

    let rejected = app
        .post("/seller/create", &[("name", "   "), ("description", "")])
        .await;

    assert_eq!(rejected.template(), "seller_form");
    assert_eq!(
        rejected.error_messages(),
        [
            "Name can't be blank and must be at most 100 characters",
            "Description can't be blank and must be at most 300 characters",
        ]
    );
    assert_eq!(app.catalog.sellers().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_is_idempotent_and_sorted_by_name() {
    let app = TestApp::new();
    app.create_category("Technology").await;
    app.create_category("Books").await;
    app.create_category("Entertainment").await;

    let first = app.get("/categories").await;
    let second = app.get("/categories").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);

    let names: Vec<_> = first.context()["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Books", "Entertainment", "Technology"]);
}

#[tokio::test]
async fn test_item_list_keeps_creation_order() {
    let app = TestApp::new();
    let category = app.create_category("Books").await;
    let seller = app.create_seller("Universal Libraire").await;
    app.create_item("Zebra Stories", &category, &seller).await;
    app.create_item("Ant Tales", &category, &seller).await;

    let list = app.get("/items").await;
    let names: Vec<_> = list.context()["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Zebra Stories", "Ant Tales"]);
}

#[tokio::test]
async fn test_update_preserves_identity() {
    let app = TestApp::new();
    let url = app.create_category("Books").await;

    let form = app.get(&format!("{}/update", url)).await;
    assert_eq!(form.template(), "category_form");
    assert_eq!(form.context()["values"]["name"], "Books");

    let response = app
        .post(
            &format!("{}/update", url),
            &[("name", "Novels"), ("description", "Long fiction")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some(url.as_str()));

    let id = CategoryId::parse(id_of(&url)).unwrap();
    let stored = app.catalog.categories().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "Novels");
    assert_eq!(stored.description, "Long fiction");
    assert_eq!(app.catalog.categories().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_update_is_not_persisted() {
    let app = TestApp::new();
    let url = app.create_seller("Creation Corp.").await;

    let rejected = app
        .post(&format!("{}/update", url), &[("name", ""), ("description", "Tech")])
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.error_fields(), ["name"]);

    let details = app.get(&url).await;
    assert_eq!(details.context()["seller"]["name"], "Creation Corp.");
}

#[tokio::test]
async fn test_update_of_deleted_record_is_not_found() {
    let app = TestApp::new();
    let url = app.create_category("Books").await;

    let deleted = app.post(&format!("{}/delete", url), &[]).await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);

    let response = app
        .post(
            &format!("{}/update", url),
            &[("name", "Books"), ("description", "Again")],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.template(), "error");
    assert_eq!(app.catalog.categories().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_id_is_400_not_404() {
    let app = TestApp::new();

    for uri in [
        "/category/not-an-objectid",
        "/seller/not-an-objectid",
        "/item/not-an-objectid",
        "/category/not-an-objectid/update",
        "/seller/not-an-objectid/delete",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.template(), "error");
        assert_eq!(response.context()["status"], 400);
    }
}

#[tokio::test]
async fn test_absent_id_is_404() {
    let app = TestApp::new();
    let absent = CategoryId::generate();

    for uri in [
        format!("/category/{}", absent),
        format!("/seller/{}", absent),
        format!("/item/{}", absent),
        format!("/category/{}/update", absent),
        format!("/seller/{}/delete", absent),
        format!("/item/{}/delete", absent),
    ] {
        let response = app.get(&uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(
            response.context()["message"].as_str().unwrap(),
            format!("Page not found: {} not found", uri.split('/').nth(1).unwrap())
        );
    }
}

#[tokio::test]
async fn test_item_form_alerts_until_both_references_exist() {
    let app = TestApp::new();

    let alert = app.get("/item/create").await;
    assert_eq!(alert.template(), "item_create_alert");
    assert_eq!(alert.context()["has_categories"], false);

    app.create_category("Books").await;
    let alert = app.get("/item/create").await;
    assert_eq!(alert.template(), "item_create_alert");
    assert_eq!(alert.context()["has_categories"], true);
    assert_eq!(alert.context()["has_sellers"], false);

    app.create_seller("Universal Libraire").await;
    let form = app.get("/item/create").await;
    assert_eq!(form.template(), "item_form");
    assert_eq!(form.context()["categories"][0]["name"], "Books");
    assert_eq!(form.context()["sellers"][0]["name"], "Universal Libraire");
    assert!(form.context()["sellers"][0].get("description").is_none());
}

#[tokio::test]
async fn test_item_blank_references_are_reported_together() {
    let app = TestApp::new();
    app.create_category("Food & Groceries").await;
    app.create_seller("Monsieur Boulangerie Inc.").await;

    let rejected = app
        .post(
            "/item/create",
            &[
                ("name", "Milky Way Cookies"),
                ("description", "Cosmic cookies"),
                ("category", ""),
                ("seller", ""),
                ("price", "12.99"),
                ("number_in_stock", "120"),
            ],
        )
        .await;

    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.template(), "item_form");
    assert_eq!(
        rejected.error_messages(),
        ["Category can't be empty", "Seller can't be empty"]
    );
    assert_eq!(rejected.context()["values"]["name"], "Milky Way Cookies");
    assert_eq!(rejected.context()["categories"].as_array().unwrap().len(), 1);
    assert_eq!(app.catalog.items().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_item_references_must_exist() {
    let app = TestApp::new();
    let category = app.create_category("Books").await;
    app.create_seller("Universal Libraire").await;

    let missing_seller = SellerId::generate().to_string();
    let rejected = app
        .post(
            "/item/create",
            &[
                ("name", "Dune"),
                ("description", "Sand"),
                ("category", id_of(&category)),
                ("seller", &missing_seller),
                ("price", "-1"),
                ("number_in_stock", "3"),
            ],
        )
        .await;

    assert_eq!(
        rejected.error_messages(),
        [
            "Price must be a non-negative number",
            "Seller must be an existing seller",
        ]
    );
}

#[tokio::test]
async fn test_item_details_resolve_references() {
    let app = TestApp::new();
    let category = app.create_category("Books").await;
    let seller = app.create_seller("Universal Libraire").await;
    let item = app.create_item("Dune", &category, &seller).await;

    let details = app.get(&item).await;
    assert_eq!(details.template(), "item_details");
    assert_eq!(details.context()["item"]["name"], "Dune");
    assert_eq!(details.context()["item"]["price"], 12.99);
    assert_eq!(details.context()["item"]["number_in_stock"], 120);
    assert_eq!(details.context()["category"]["name"], "Books");
    assert_eq!(details.context()["category"]["url"], category.as_str());
    assert_eq!(details.context()["seller"]["name"], "Universal Libraire");
}

#[tokio::test]
async fn test_item_with_dangling_reference_still_renders() {
    let app = TestApp::new();
    let seller = app.create_seller("Universal Libraire").await;

    let orphan = app
        .catalog
        .items()
        .create(Item {
            id: ItemId::generate(),
            name: "Orphan".into(),
            description: "No category".into(),
            category: CategoryId::generate(),
            seller: SellerId::parse(id_of(&seller)).unwrap(),
            price: 1.0,
            number_in_stock: 1,
        })
        .await
        .unwrap();

    let details = app.get(&orphan.url()).await;
    assert_eq!(details.status, StatusCode::OK);
    assert!(details.context()["category"].is_null());
    assert_eq!(details.context()["seller"]["name"], "Universal Libraire");
}

#[tokio::test]
async fn test_item_update_replaces_every_field() {
    let app = TestApp::new();
    let books = app.create_category("Books").await;
    let tech = app.create_category("Technology").await;
    let seller = app.create_seller("Creation Corp.").await;
    let item = app.create_item("Reader", &books, &seller).await;

    let form = app.get(&format!("{}/update", item)).await;
    assert_eq!(form.template(), "item_form");
    assert_eq!(form.context()["values"]["category"], id_of(&books));
    assert_eq!(form.context()["values"]["number_in_stock"], "120");

    let response = app
        .post(
            &format!("{}/update", item),
            &[
                ("name", "E-Reader"),
                ("description", "Paperwhite"),
                ("category", id_of(&tech)),
                ("seller", id_of(&seller)),
                ("price", "0"),
                ("number_in_stock", "0"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some(item.as_str()));

    let id = ItemId::parse(id_of(&item)).unwrap();
    let stored = app.catalog.items().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.name, "E-Reader");
    assert_eq!(stored.category.to_string(), id_of(&tech));
    assert_eq!(stored.price, 0.0);
    assert_eq!(stored.number_in_stock, 0);
}

#[tokio::test]
async fn test_dashboard_counts_every_kind() {
    let app = TestApp::new();
    let category = app.create_category("Books").await;
    app.create_category("Technology").await;
    let seller = app.create_seller("Universal Libraire").await;
    app.create_item("Dune", &category, &seller).await;

    let index = app.get("/").await;
    assert_eq!(index.template(), "index");
    assert_eq!(index.context()["num_categories"], 2);
    assert_eq!(index.context()["num_sellers"], 1);
    assert_eq!(index.context()["num_items"], 1);
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert_eq!(health.body["backend"], "memory");
}

#[tokio::test]
async fn test_prefilled_form_resubmitted_unchanged_keeps_record() {
    let app = TestApp::new();
    let name = format!("{}&", "a".repeat(99));
    let url = app
        .create("category", &[("name", &name), ("description", "Tom & Jerry")])
        .await;
    let id = CategoryId::parse(id_of(&url)).unwrap();
    let before = app.catalog.categories().find_by_id(&id).await.unwrap().unwrap();

    let form = app.get(&format!("{}/update", url)).await;
    let values = &form.context()["values"];
    assert_eq!(values["name"], name.as_str());
    assert_eq!(values["description"], "Tom & Jerry");

    let response = app
        .post(
            &format!("{}/update", url),
            &[
                ("name", values["name"].as_str().unwrap()),
                ("description", values["description"].as_str().unwrap()),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);

    let after = app.catalog.categories().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_prefilled_item_form_resubmitted_unchanged_keeps_record() {
    let app = TestApp::new();
    let category = app.create_category("Food & Groceries").await;
    let seller = app.create_seller("Monsieur Boulangerie Inc.").await;
    let url = app
        .create(
            "item",
            &[
                ("name", "Bread <fresh>"),
                ("description", "Baker's \"best\" loaf"),
                ("category", id_of(&category)),
                ("seller", id_of(&seller)),
                ("price", "2.5"),
                ("number_in_stock", "7"),
            ],
        )
        .await;
    let id = ItemId::parse(id_of(&url)).unwrap();
    let before = app.catalog.items().find_by_id(&id).await.unwrap().unwrap();

    let form = app.get(&format!("{}/update", url)).await;
    let values = &form.context()["values"];
    let fields: Vec<(&str, &str)> = [
        "name",
        "description",
        "category",
        "seller",
        "price",
        "number_in_stock",
    ]
    .into_iter()
    .map(|field| (field, values[field].as_str().unwrap()))
    .collect();
    assert_eq!(fields[0].1, "Bread <fresh>");

    let response = app.post(&format!("{}/update", url), &fields).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);

    let after = app.catalog.items().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_form_without_content_type_renders_error_page() {
    let app = TestApp::new();

    let response = app
        .post_untyped("/category/create", "name=Books&description=Reading")
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.template(), "error");
    assert_eq!(response.context()["status"], 415);
    assert_eq!(app.catalog.categories().count().await.unwrap(), 0);
}
