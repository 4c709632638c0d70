// Wallet domain models
pub mod wallet;
pub mod transaction;
pub mod donation;

pub use wallet::*;
pub use transaction::*;
pub use donation::*;
