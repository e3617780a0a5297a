// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (token auth)
pub mod protected;
pub mod public;
pub mod system;
pub mod utils;
