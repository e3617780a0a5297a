// handlers/protected/mod.rs - Protected handlers (token authentication required)
//
// Every route here sits behind `token_auth_middleware`; handlers receive the
// caller as a typed `AuthUser` parameter.

pub mod address;
pub mod contact;
pub mod user;
