// Coin package domain state
// 코인 패키지 도메인 상태
use std::sync::Arc;
use crate::domains::coin_package::services::{CoinPackageService, CoinPackageStore};

#[derive(Clone)]
pub struct CoinPackageState {
    pub coin_package_service: CoinPackageService,
}

impl CoinPackageState {
    pub fn new(store: Arc<dyn CoinPackageStore>) -> Self {
        Self {
            coin_package_service: CoinPackageService::new(store),
        }
    }
}
