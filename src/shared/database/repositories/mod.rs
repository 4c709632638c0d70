// All repositories module
pub mod auth;
pub mod wallet;
pub mod coin_package;

// Re-export all repositories for convenience
pub use auth::*;
pub use wallet::*;
pub use coin_package::*;
