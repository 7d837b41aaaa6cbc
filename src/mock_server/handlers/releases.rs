//! Release endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::api_error;
use crate::mock_server::state::{ListingRequest, MockState};
use crate::LicenseClass;

/// Page size used when the request has no `limit`.
const DEFAULT_LIMIT: usize = 10;

/// Largest page the listing endpoint serves.
const MAX_LIMIT: usize = 20;

/// Query parameters for listing releases.
#[derive(Debug, Default, Deserialize)]
pub struct ListReleasesQuery {
    pub limit: Option<String>,
    pub after: Option<String>,
    pub license_class: Option<String>,
}

/// Query parameters for the latest release.
#[derive(Debug, Default, Deserialize)]
pub struct LatestReleaseQuery {
    pub license_class: Option<String>,
}

/// GET /v1/releases/{product}
pub async fn list_releases(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(product): Path<String>,
    Query(query): Query<ListReleasesQuery>,
) -> Response {
    let mut state = state.write().await;

    state.listing_requests.push(ListingRequest {
        product: product.clone(),
        limit: query.limit.clone(),
        after: query.after.clone(),
        license_class: query.license_class.clone(),
    });

    if let Some(status) = state.listing_failure_status() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return api_error(status, "injected listing failure");
    }

    let license_class = match parse_license_class(query.license_class.as_deref()) {
        Ok(class) => class,
        Err(response) => return response,
    };

    let after = match query.after.as_deref().map(DateTime::parse_from_rfc3339) {
        None => None,
        Some(Ok(after)) => Some(after.with_timezone(&Utc)),
        Some(Err(e)) => {
            return api_error(StatusCode::BAD_REQUEST, format!("invalid after: {e}"));
        }
    };

    let limit = match query.limit.as_deref().map(str::parse::<usize>) {
        None => DEFAULT_LIMIT,
        Some(Ok(limit)) if (1..=MAX_LIMIT).contains(&limit) => limit,
        Some(_) => {
            return api_error(
                StatusCode::BAD_REQUEST,
                format!("limit must be between 1 and {MAX_LIMIT}"),
            );
        }
    };

    if !state.has_product(&product) {
        return api_error(StatusCode::NOT_FOUND, format!("product not found: {product}"));
    }

    Json(state.list_releases(&product, license_class, after, limit)).into_response()
}

/// GET /v1/releases/{product}/{version}
///
/// The version `latest` selects the most recently created release.
pub async fn get_release(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((product, version)): Path<(String, String)>,
    Query(query): Query<LatestReleaseQuery>,
) -> Response {
    let state = state.read().await;

    let release = if version == "latest" {
        let license_class = match parse_license_class(query.license_class.as_deref()) {
            Ok(class) => class,
            Err(response) => return response,
        };
        state.latest_release(&product, license_class)
    } else {
        state.get_release(&product, &version)
    };

    match release {
        Some(release) => Json(release.clone()).into_response(),
        None => api_error(
            StatusCode::NOT_FOUND,
            format!("release not found: {product} {version}"),
        ),
    }
}

fn parse_license_class(raw: Option<&str>) -> Result<Option<LicenseClass>, Response> {
    raw.map(str::parse::<LicenseClass>)
        .transpose()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}
