// Auth domain services
pub mod jwt_service;
pub mod user_directory;
pub mod state;

pub use jwt_service::*;
pub use user_directory::*;
pub use state::*;
