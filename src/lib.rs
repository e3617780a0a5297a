pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Build the full router around an explicitly constructed state
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .fallback(middleware::not_found_fallback)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(from_fn(middleware::json_error_envelope))
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/user", post(public::create_user))
        .route("/login", post(public::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{address, contact, user};

    Router::new()
        .route("/user", get(user::list_users))
        .route("/user/:id", get(user::get_user).put(user::update_user))
        .route(
            "/contact",
            get(contact::list_contacts).post(contact::create_contact),
        )
        .route(
            "/contact/:id",
            get(contact::get_contact)
                .put(contact::update_contact)
                .delete(contact::delete_contact),
        )
        .route("/address/", post(address::create_address))
        .route("/address/:contact_id", get(address::list_addresses))
        .route(
            "/address/:contact_id/:address_id",
            get(address::get_address)
                .put(address::update_address)
                .delete(address::delete_address),
        )
        .route_layer(from_fn_with_state(
            state,
            middleware::token_auth_middleware,
        ))
}
