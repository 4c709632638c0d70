// Coin package repositories
pub mod coin_package_repository;

pub use coin_package_repository::*;
