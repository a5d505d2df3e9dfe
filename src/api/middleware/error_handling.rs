//! Fault logging and panic recovery

use std::any::Any;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::api::types::{ApiError, Fault};

/// Log requests that ended in an error response
///
/// Client errors are logged at `warn`, server errors at `error`. The detail
/// comes from the [`Fault`] extension set by [`ApiError`], so it reaches the
/// logs without reaching the client.
pub async fn error_handling_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let detail = response
        .extensions()
        .get::<Fault>()
        .map(|fault| fault.detail.as_str())
        .unwrap_or("");

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            detail = %detail,
            "Request failed"
        );
    } else {
        warn!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            detail = %detail,
            "Request rejected"
        );
    }

    response
}

/// Turn a handler panic into the generic 500 response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic payload".to_string()
    };

    ApiError::internal(format!("Handler panicked: {}", detail)).into_response()
}
