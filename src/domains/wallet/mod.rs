// Wallet domain module
pub mod ledger;
pub mod models;
pub mod services;
pub mod handlers;
pub mod routes;

pub use models::*;
