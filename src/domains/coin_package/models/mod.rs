// Coin package domain models
pub mod coin_package;

pub use coin_package::*;
