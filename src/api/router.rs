use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account;
use super::health;
use super::middleware::{
    error_handling_middleware, handle_panic, logging_middleware, security_headers_middleware,
};
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the full router with application state
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Account API
        .nest("/api/account", account::create_account_router())
        .with_state(state);

    with_middleware(routes, config.request_timeout())
}

/// Wrap routes in the middleware stack
///
/// Outermost first: request id, trace span, request logging, security
/// headers, fault logging, panic recovery, timeout (408).
fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(error_handling_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
