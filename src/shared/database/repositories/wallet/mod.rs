// Wallet repositories
pub mod wallet_repository;
pub mod coin_transaction_repository;
pub mod donation_repository;

pub use wallet_repository::*;
pub use coin_transaction_repository::*;
pub use donation_repository::*;
