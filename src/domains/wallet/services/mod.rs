// Wallet domain services
pub mod wallet_service;
pub mod state;

pub use wallet_service::*;
pub use state::*;
