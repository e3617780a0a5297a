use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller resolved from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Handlers take `AuthUser` as a parameter; it is only present behind
/// `token_auth_middleware`.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

/// Token authentication middleware: resolves the `Authorization` header to a
/// user with a single store lookup and injects the `AuthUser` into the request
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_token_from_headers(request.headers()) else {
        tracing::debug!("Rejected request without token: {}", request.uri().path());
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    let user = state
        .store
        .find_user_by_token(&token)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Rejected unknown token for {}", request.uri().path());
            ApiError::unauthorized("Unauthorized")
        })?;

    tracing::debug!("Authenticated user {} ({})", user.user_id, user.email);
    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

/// Extract the opaque token from the Authorization header.
/// Accepts both `Bearer <token>` and a bare token value.
fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
