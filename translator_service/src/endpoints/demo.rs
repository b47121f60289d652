// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use error_translator::{FieldError, RequestFailure, Validate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::ApiError;
use crate::extract::{require_params, ParamPath, ParamQuery, ValidJson};
use crate::state::AppState;

const ADMIN_TOKEN: &str = "Bearer admin";

#[instrument(skip(headers))]
pub(crate) async fn session_endpoint(headers: HeaderMap) -> Result<Json<Session>, ApiError> {
    tracing::debug!("Request to get the current session");

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            RequestFailure::Unauthorized(
                "Full authentication is required to access this resource".to_string(),
            )
        })?;

    if token != ADMIN_TOKEN {
        return Err(RequestFailure::Forbidden("Access is denied".to_string()).into());
    }

    Ok(Json(Session {
        user: "admin".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub(crate) struct Session {
    user: String,
}

#[instrument(skip(account))]
pub(crate) async fn create_account_endpoint(
    ValidJson(account): ValidJson<NewAccount>,
) -> (StatusCode, Json<NewAccount>) {
    tracing::debug!("Request to create an account");
    (StatusCode::CREATED, Json(account))
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct NewAccount {
    email: String,
    age: i32,
}

impl Validate for NewAccount {
    fn validate(&self) -> Vec<FieldError> {
        let mut field_errors = Vec::new();
        if self.email.trim().is_empty() {
            field_errors.push(FieldError::new("email", "must not be blank"));
        }
        if self.age <= 0 {
            field_errors.push(FieldError::new("age", "must be positive"));
        }
        field_errors
    }
}

#[instrument(skip(account_id))]
pub(crate) async fn account_endpoint(
    ParamPath(account_id): ParamPath<u32>,
) -> Result<Json<Account>, ApiError> {
    tracing::debug!("Request to get account {account_id}");

    if account_id == 0 {
        return Err(RequestFailure::BadRequest("Account id must be positive".to_string()).into());
    }

    Ok(Json(Account { id: account_id }))
}

#[derive(Debug, Serialize)]
pub(crate) struct Account {
    id: u32,
}

#[instrument(skip(query))]
pub(crate) async fn events_endpoint(
    ParamQuery(query): ParamQuery<EventsQuery>,
) -> Result<Json<EventsQuery>, ApiError> {
    tracing::debug!("Request to list events");

    let since = chrono::DateTime::parse_from_rfc3339(&query.since)
        .map_err(|e| RequestFailure::date_time(query.since.as_str(), &e))?;

    Ok(Json(EventsQuery {
        since: since.to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct EventsQuery {
    since: String,
}

#[instrument]
pub(crate) async fn search_endpoint(uri: Uri) -> Result<Json<SearchResult>, ApiError> {
    tracing::debug!("Request to search");

    require_params(&["q", "!debug"], &uri)?;

    Ok(Json(SearchResult { hits: 0 }))
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResult {
    hits: u32,
}

#[instrument(skip(multipart))]
pub(crate) async fn upload_endpoint(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, ApiError> {
    tracing::debug!("Request to upload a multipart form");

    let mut multipart = multipart.map_err(|e| RequestFailure::multipart(&e))?;

    let mut upload_result = UploadResult {
        fields: 0,
        bytes: 0,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestFailure::multipart(&e))?
    {
        let contents = field
            .bytes()
            .await
            .map_err(|e| RequestFailure::multipart(&e))?;
        upload_result.fields += 1;
        upload_result.bytes += contents.len();
    }

    Ok(Json(upload_result))
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadResult {
    fields: usize,
    bytes: usize,
}

#[instrument]
pub(crate) async fn internal_endpoint() -> Result<Json<()>, ApiError> {
    tracing::debug!("Request to reconcile the ledger");
    Err(ApiError(RequestFailure::InternalServerError(
        "Ledger is in an inconsistent state".to_string(),
    )))
}

#[instrument(skip(app_state))]
pub(crate) async fn inventory_endpoint(
    ParamPath(sku): ParamPath<String>,
    State(app_state): State<AppState>,
) -> Result<String, ApiError> {
    tracing::debug!("Request to look up inventory");

    let stock = app_state
        .downstream_client
        .get_text(&format!("/inventory/{sku}"))
        .await?;

    Ok(stock)
}

#[instrument]
pub(crate) async fn unexpected_endpoint() -> Result<Json<()>, ApiError> {
    tracing::debug!("Request to write the audit record");
    let error = eyre::eyre!("Audit sink closed the connection")
        .wrap_err("Failed to write the audit record");
    Err(error.into())
}

#[instrument]
pub(crate) async fn panic_endpoint() -> Json<()> {
    tracing::debug!("Request that panics");
    panic!("Handler state was poisoned");
}
