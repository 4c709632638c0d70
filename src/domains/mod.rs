// Domain modules
pub mod auth;
pub mod wallet;
pub mod coin_package;
