// Coin package services
pub mod store;
pub mod coin_package_service;
pub mod state;

pub use store::*;
pub use coin_package_service::*;
pub use state::*;
