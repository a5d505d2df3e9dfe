//! Account endpoints

use axum::{extract::State, http::StatusCode, routing::post, Router};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::RegistrationRequest;

/// Create the account router, mounted under `/api/account`
pub fn create_account_router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// POST /api/account/register
///
/// Responds 200 with an empty body once the user is stored.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<StatusCode, ApiError> {
    debug!(user_name = %request.user_name, "Registering account");

    state.registrar.register(request).await?;

    Ok(StatusCode::OK)
}
