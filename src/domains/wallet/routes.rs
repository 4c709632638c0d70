// Wallet domain routes
// 지갑 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::wallet::handlers::wallet_handler;
use crate::domains::coin_package::handlers::coin_package_handler;
use crate::shared::services::AppState;

/// Create wallet router
/// 지갑 라우터 생성
pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/balance", get(wallet_handler::get_balance))  // 인증 필요
        .route("/history", get(wallet_handler::get_transaction_history))  // 인증 필요
        .route("/deposit", post(wallet_handler::deposit))  // 인증 필요
        .route("/pay", post(wallet_handler::pay))  // 인증 필요
        .route("/donate", post(wallet_handler::donate))  // 인증 필요
        .route("/author-donations/:author_id", get(wallet_handler::get_author_donations))
        .route("/packages", get(coin_package_handler::list_active_packages))
}

/// Create admin wallet router
/// 관리자 지갑 라우터 생성 (AdminUser 필요)
pub fn create_admin_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/audit", get(wallet_handler::audit_wallet))
}
