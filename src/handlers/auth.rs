use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
};

use crate::{
    error::{ErrorResponse, Result},
    handlers::AppState,
    models::user::{Credentials, LoginResult, UserDirectory},
    services::auth_service,
};

pub const USERNAME_HEADER: &str = "X-Username";
pub const PASSWORD_HEADER: &str = "X-Password";

/// Credentials from the request headers, empty when absent
pub fn credentials_from(headers: &HeaderMap) -> Credentials {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    Credentials {
        username: header(USERNAME_HEADER),
        password: header(PASSWORD_HEADER),
    }
}

/// List registered users with their passwords
#[utoipa::path(
    get,
    path = "/registered_users",
    responses(
        (status = 200, description = "Registered users keyed by name", body = BTreeMap<String, String>),
        (status = 500, description = "Credential file unreadable", body = ErrorResponse)
    )
)]
pub async fn registered_users(State(state): State<Arc<AppState>>) -> Result<Json<UserDirectory>> {
    let users = state.users.load()?;
    Ok(Json(users))
}

/// Classify the credentials sent in the request headers
#[utoipa::path(
    get,
    path = "/check_user_login",
    params(
        ("X-Username" = String, Header, description = "User name"),
        ("X-Password" = String, Header, description = "Password")
    ),
    responses(
        (status = 200, description = "One of no_login_info, admin, user, login_failed", body = LoginResult),
        (status = 500, description = "Credential file unreadable", body = ErrorResponse)
    )
)]
pub async fn check_user_login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LoginResult>> {
    let credentials = credentials_from(&headers);
    let users = state.users.load()?;

    let result = auth_service::lookup(&credentials, &users);
    if result.is_logged_in() {
        tracing::info!("User {} logged in as {:?}", credentials.username, result);
    }

    Ok(Json(result))
}
