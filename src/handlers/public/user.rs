// handlers/public/user.rs - POST /user handler

use axum::{body::Bytes, extract::State};
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::{NewUser, User};
use crate::handlers::utils::parse_json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::Validator;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CreateUserRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        Validator::new()
            .required("name", &self.name)
            .required_email("email", &self.email)
            .required("password", &self.password)
            .finish()
    }
}

/// POST /user - register a new user
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> ApiResult<User> {
    let request: CreateUserRequest = parse_json_body(&body)?;
    request.validate()?;

    let user = state
        .store
        .create_user(NewUser {
            name: request.name,
            email: request.email,
            password: hash_password(&request.password),
        })
        .await?;

    tracing::info!("Created user {} ({})", user.user_id, user.email);
    Ok(ApiResponse::created("User created successfully", user))
}
