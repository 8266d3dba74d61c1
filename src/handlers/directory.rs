//! Handlers shared by categories and sellers
//!
//! Every function here is generic over a `Directory` kind and is mounted once
//! per kind by the router.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::BTreeMap;
use store_object::{QueryBuilder, RecordId, SortOrder};

use super::{parse_id, see_other, AppState, FormInput};
use crate::errors::CatalogError;
use crate::guard::DeleteCheck;
use crate::models::{link, link_items, Directory};
use crate::validation::{unescape, validate, Submission, DIRECTORY_RULES};
use crate::views::Page;

fn template<D: Directory>(suffix: &str) -> String {
    format!("{}_{}", D::KIND, suffix)
}

fn form_page<D: Directory>(title: String, action: String, submission: &Submission) -> Page {
    Page::new(
        template::<D>("form"),
        title,
        json!({
            "action": action,
            "values": submission.values,
            "errors": submission.violations,
        }),
    )
}

fn delete_page<D: Directory>(record: D, check: DeleteCheck) -> Page {
    let title = format!("Delete {}: {}", D::LABEL, record.name());
    let mut context = json!({
        "allowed": check.allowed,
        "items": link_items(check.blocking_items),
    });
    context[D::KIND] = json!(link(record));

    Page::new(template::<D>("delete"), title, context)
}

/// Form values for an existing record, as the user originally typed them
fn prefilled<D: Directory>(record: &D) -> Submission {
    Submission {
        values: BTreeMap::from([
            ("name", unescape(record.name())),
            ("description", unescape(record.description())),
        ]),
        violations: Vec::new(),
    }
}

async fn fetch<D: Directory>(catalog: &AppState, id: &RecordId<D>) -> Result<D, CatalogError> {
    D::store(catalog)
        .find_by_id(id)
        .await?
        .ok_or_else(|| CatalogError::not_found(D::KIND))
}

pub async fn list<D: Directory>(State(catalog): State<AppState>) -> Result<Page, CatalogError> {
    let records = D::store(&catalog)
        .find_many(QueryBuilder::new().order_by("name", SortOrder::Asc))
        .await?;

    let linked: Vec<_> = records.into_iter().map(link).collect();
    let mut context = json!({});
    context[D::COLLECTION] = json!(linked);

    Ok(Page::new(template::<D>("list"), format!("{} List", D::LABEL), context))
}

pub async fn details<D: Directory>(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<D>(D::KIND, &raw)?;

    let (record, items) = tokio::try_join!(
        D::store(&catalog).find_by_id(&id),
        catalog.referencing_items(D::referent(id)),
    )?;
    let record = record.ok_or_else(|| CatalogError::not_found(D::KIND))?;

    let title = format!("{}: {}", D::LABEL, record.name());
    let mut context = json!({ "items": link_items(items) });
    context[D::KIND] = json!(link(record));

    Ok(Page::new(template::<D>("details"), title, context))
}

pub async fn create_form<D: Directory>() -> Page {
    form_page::<D>(
        format!("Create {}", D::LABEL),
        format!("/{}/create", D::KIND),
        &Submission::default(),
    )
}

pub async fn create_submit<D: Directory>(
    State(catalog): State<AppState>,
    FormInput(input): FormInput,
) -> Result<Response, CatalogError> {
    let submission = validate(&DIRECTORY_RULES, &input);
    if !submission.is_valid() {
        debug_log!("{} create rejected: {} violations", D::KIND, submission.violations.len());
        return Ok(form_page::<D>(
            format!("Create {}", D::LABEL),
            format!("/{}/create", D::KIND),
            &submission,
        )
        .into_response());
    }

    let candidate = D::new(
        RecordId::generate(),
        submission.value("name").to_string(),
        submission.value("description").to_string(),
    );
    let created = D::store(&catalog).create(candidate).await?;
    tracing::info!(kind = D::KIND, id = %created.id(), "record created");

    Ok(see_other(&created.url()))
}

pub async fn update_form<D: Directory>(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<D>(D::KIND, &raw)?;
    let record = fetch(&catalog, &id).await?;

    Ok(form_page::<D>(
        format!("Update {}", D::LABEL),
        format!("{}/update", record.url()),
        &prefilled(&record),
    ))
}

pub async fn update_submit<D: Directory>(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
    FormInput(input): FormInput,
) -> Result<Response, CatalogError> {
    let id = parse_id::<D>(D::KIND, &raw)?;

    let submission = validate(&DIRECTORY_RULES, &input);
    if !submission.is_valid() {
        return Ok(form_page::<D>(
            format!("Update {}", D::LABEL),
            format!("/{}/{}/update", D::KIND, id),
            &submission,
        )
        .into_response());
    }

    let candidate = D::new(
        id,
        submission.value("name").to_string(),
        submission.value("description").to_string(),
    );
    let updated = D::store(&catalog)
        .update_by_id(&id, candidate)
        .await?
        .ok_or_else(|| CatalogError::not_found(D::KIND))?;
    tracing::info!(kind = D::KIND, id = %id, "record updated");

    Ok(see_other(&updated.url()))
}

pub async fn delete_form<D: Directory>(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Page, CatalogError> {
    let id = parse_id::<D>(D::KIND, &raw)?;

    let record = fetch(&catalog, &id).await?;
    let check = catalog.can_delete(D::referent(id)).await?;

    Ok(delete_page(record, check))
}

pub async fn delete_submit<D: Directory>(
    State(catalog): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, CatalogError> {
    let id = parse_id::<D>(D::KIND, &raw)?;

    let record = fetch(&catalog, &id).await?;
    let check = catalog.can_delete(D::referent(id)).await?;
    if !check.allowed {
        return Ok(delete_page(record, check).into_response());
    }

    if !D::store(&catalog).delete_by_id(&id).await? {
        return Err(CatalogError::not_found(D::KIND));
    }
    tracing::info!(kind = D::KIND, id = %id, "record deleted");

    Ok(see_other(&D::list_url()))
}

