// Shared middleware (request extractors)
pub mod auth;

pub use auth::*;
