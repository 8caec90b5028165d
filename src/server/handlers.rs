//! Route handlers

use super::{ApiError, AppState};
use crate::check::CheckRequest;
use crate::output::{CheckResponse, LinkDetailsResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// Body of `POST /api/link-details`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkDetailsRequest {
    pub page_url: Option<String>,
    pub broken_link_url: Option<String>,
}

/// `POST /api/check`: runs one check step
pub(crate) async fn check(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        "Check requested for {} (max pages {:?}, resuming: {})",
        request.url.as_deref().unwrap_or("<none>"),
        request.max_pages,
        !request.next_urls_to_visit.is_empty()
    );

    let response = state.checker.check(&request).await?;
    Ok(Json(response))
}

/// `POST /api/link-details`: locates a broken link's anchors on a page
pub(crate) async fn link_details(
    State(state): State<AppState>,
    payload: Result<Json<LinkDetailsRequest>, JsonRejection>,
) -> Result<Json<LinkDetailsResponse>, ApiError> {
    let Json(request) = payload?;

    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(page_url), Some(broken_link_url)) =
        (non_empty(request.page_url), non_empty(request.broken_link_url))
    else {
        return Err(ApiError::bad_request(
            "Page URL and broken link URL are required",
        ));
    };

    let response = state
        .checker
        .link_details(&page_url, &broken_link_url)
        .await?;
    Ok(Json(response))
}

/// `GET /health`
pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
