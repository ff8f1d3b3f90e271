//! Request dispatch shared by the resource clients.
//!
//! Every call is sent exactly once. Transport failures and non-2xx statuses
//! are returned to the caller; nothing is retried.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Send a request and fail on any non-2xx status.
pub(crate) async fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    let resp = transmit(endpoint, request).await?;
    check_status(endpoint, resp).await
}

/// Send a request, mapping `404 Not Found` to `None`.
pub(crate) async fn send_allowing_not_found(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<Option<Response>, ApiError> {
    let resp = transmit(endpoint, request).await?;
    if resp.status() == StatusCode::NOT_FOUND {
        tracing::debug!(endpoint, "backend returned 404");
        return Ok(None);
    }
    check_status(endpoint, resp).await.map(Some)
}

/// Decode a JSON response body.
pub(crate) async fn json<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, ApiError> {
    resp.json().await.map_err(|e| ApiError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// Send a request and decode its JSON response.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<T, ApiError> {
    let resp = send(endpoint, request).await?;
    json(endpoint, resp).await
}

/// Send a request and decode its JSON response, mapping 404 to `None`.
pub(crate) async fn send_json_optional<T: DeserializeOwned>(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<Option<T>, ApiError> {
    match send_allowing_not_found(endpoint, request).await? {
        Some(resp) => json(endpoint, resp).await.map(Some),
        None => Ok(None),
    }
}

async fn transmit(endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    tracing::debug!(endpoint, "sending backend request");
    request.send().await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, "backend request did not complete");
        ApiError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        }
    })
}

async fn check_status(endpoint: &str, resp: Response) -> Result<Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(endpoint, status, "backend request failed");
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}
