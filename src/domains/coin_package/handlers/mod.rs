// Coin package handlers
pub mod coin_package_handler;
