pub mod auth;
pub mod response;

pub use auth::{token_auth_middleware, AuthUser};
pub use response::{json_error_envelope, not_found_fallback, ApiResponse, ApiResult};
