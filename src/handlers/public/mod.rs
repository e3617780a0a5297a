// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation and token acquisition.

pub mod login;
pub mod user;

pub use login::login;
pub use user::create_user;
