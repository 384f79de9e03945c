//! Admin authentication handler

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{AuthResponse, BasicCredentials};
use crate::application::AdminAuthenticator;
use crate::interfaces::http::common::{ApiError, ErrorBody};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub authenticator: Arc<AdminAuthenticator>,
}

#[utoipa::path(
    post,
    path = "/auth/admin",
    tag = "Authentication",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Admin password hash not configured", body = ErrorBody)
    )
)]
pub async fn admin_login(
    State(state): State<AuthHandlerState>,
    credentials: BasicCredentials,
) -> Result<Json<AuthResponse>, ApiError> {
    state.authenticator.authenticate(&credentials.password)?;
    Ok(Json(AuthResponse {
        status: "ok".to_string(),
    }))
}
