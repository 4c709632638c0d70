// Auth domain models
pub mod user;
pub mod jwt;

pub use user::*;
pub use jwt::*;
