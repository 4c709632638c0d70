// Shared errors
pub mod auth_error;
pub mod wallet_error;
pub mod coin_package_error;

pub use auth_error::*;
pub use wallet_error::*;
pub use coin_package_error::*;
