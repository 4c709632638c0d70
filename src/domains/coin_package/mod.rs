// Coin package catalog domain module
pub mod models;
pub mod services;
pub mod handlers;
pub mod routes;

pub use models::*;
