// handlers/protected/user.rs - /user/* handlers behind token auth

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::handlers::utils::{parse_id, parse_json_body};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::Validator;

const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Optional; the stored password is kept when absent or empty
    #[serde(default)]
    pub password: Option<String>,
}

/// GET /user - list all users
pub async fn list_users(State(state): State<AppState>, _user: AuthUser) -> ApiResult<Vec<User>> {
    let users = state.store.list_users().await?;
    Ok(ApiResponse::success("Success", users))
}

/// GET /user/:id - show one user
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let user_id = parse_id(&id, USER_NOT_FOUND)?;
    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(ApiResponse::success("Success", user))
}

/// PUT /user/:id - update the caller's own profile.
///
/// Any other id answers 404 whether or not that user exists.
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<User> {
    let request: UpdateUserRequest = parse_json_body(&body)?;
    Validator::new()
        .required("name", &request.name)
        .required_email("email", &request.email)
        .finish()?;

    let user_id = parse_id(&id, USER_NOT_FOUND)?;
    if user_id != caller.user_id {
        return Err(ApiError::not_found(USER_NOT_FOUND));
    }

    let changes = UserChanges {
        name: request.name,
        email: request.email,
        password: request
            .password
            .filter(|p| !p.is_empty())
            .map(|p| hash_password(&p)),
    };

    let user = state
        .store
        .update_user(user_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(ApiResponse::success("User updated successfully", user))
}
