//! Product endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// GET /v1/products
///
/// Sends the body with whatever `Content-Type` the state is configured with;
/// an empty value omits the header.
pub async fn list_products(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;

    let body = serde_json::to_vec(&state.products()).unwrap_or_default();
    let mut response = body.into_response();

    let headers = response.headers_mut();
    headers.remove(header::CONTENT_TYPE);
    if !state.products_content_type.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&state.products_content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }
    }

    response
}
