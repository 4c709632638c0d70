// Wallet domain state
// 지갑 도메인 상태
use std::sync::Arc;
use crate::domains::auth::services::UserDirectory;
use crate::domains::wallet::ledger::CoinLedger;
use crate::domains::wallet::services::WalletService;

/// Wallet domain state
/// 지갑 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct WalletState {
    pub wallet_service: WalletService,
}

impl WalletState {
    pub fn new(ledger: Arc<dyn CoinLedger>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            wallet_service: WalletService::new(ledger, users),
        }
    }
}
