// handlers/public/login.rs - POST /login handler

use axum::{body::Bytes, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_token, hash_password};
use crate::error::ApiError;
use crate::handlers::utils::parse_json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::Validator;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub email: String,
    pub token: String,
}

/// POST /login - exchange email and password for a fresh bearer token.
///
/// Only presence of both fields is checked. A successful login overwrites the
/// user's previous token, so earlier sessions stop authenticating.
pub async fn login(State(state): State<AppState>, body: Bytes) -> ApiResult<LoginResponse> {
    let request: LoginRequest = parse_json_body(&body)?;
    Validator::new()
        .required("email", &request.email)
        .required("password", &request.password)
        .finish()?;

    let password_hash = hash_password(&request.password);
    let user = state
        .store
        .find_user_by_credentials(&request.email, &password_hash)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt for {}", request.email);
            ApiError::unauthorized("Invalid email or password")
        })?;

    let token = generate_token();
    state.store.set_user_token(user.user_id, &token).await?;

    tracing::info!("User {} logged in", user.user_id);
    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            user_id: user.user_id,
            email: user.email,
            token,
        },
    ))
}
