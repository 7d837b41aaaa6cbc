//! HTTP request handlers for the mock server.

pub mod products;
pub mod releases;

pub use products::*;
pub use releases::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Error body in the shape the Releases API uses.
pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "code": status.as_u16(),
            "message": message.into(),
        })),
    )
        .into_response()
}
