use std::sync::Arc;
use crate::shared::config::AppConfig;
use crate::shared::database::Database;
use crate::domains::auth::services::{JwtService, MemoryUserDirectory, PgUserDirectory, UserDirectory};
use crate::domains::auth::services::state::AuthState;
use crate::domains::wallet::ledger::{CoinLedger, MemoryCoinLedger, PgCoinLedger};
use crate::domains::wallet::services::state::WalletState;
use crate::domains::coin_package::services::{CoinPackageStore, MemoryCoinPackageStore, PgCoinPackageStore};
use crate::domains::coin_package::services::state::CoinPackageState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 저장소 구현(PostgreSQL / 메모리)은 trait 객체로 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    pub auth_state: AuthState,
    pub wallet_state: WalletState,
    pub coin_package_state: CoinPackageState,
}

impl AppState {
    /// Create AppState backed by PostgreSQL
    /// PostgreSQL 저장소로 모든 도메인 State 초기화
    pub fn new(db: Database, config: &AppConfig) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret);

        Self::from_parts(
            jwt_service,
            Arc::new(PgUserDirectory::new(db.clone())),
            Arc::new(PgCoinLedger::new(db.clone())),
            Arc::new(PgCoinPackageStore::new(db)),
        )
    }

    /// Create AppState backed by in-memory stores
    /// 메모리 저장소로 초기화 (테스트/로컬 실행용)
    pub fn in_memory(jwt_secret: &str, users: Arc<MemoryUserDirectory>) -> Self {
        Self::from_parts(
            JwtService::new(jwt_secret),
            users,
            Arc::new(MemoryCoinLedger::new()),
            Arc::new(MemoryCoinPackageStore::new()),
        )
    }

    /// 개별 저장소를 조합하여 State 생성
    pub fn from_parts(
        jwt_service: JwtService,
        user_directory: Arc<dyn UserDirectory>,
        ledger: Arc<dyn CoinLedger>,
        package_store: Arc<dyn CoinPackageStore>,
    ) -> Self {
        let auth_state = AuthState::new(jwt_service, user_directory.clone());
        let wallet_state = WalletState::new(ledger, user_directory);
        let coin_package_state = CoinPackageState::new(package_store);

        Self {
            auth_state,
            wallet_state,
            coin_package_state,
        }
    }
}
