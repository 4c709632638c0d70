// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::{routing::get, Json, Router};
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::wallet::routes::{create_admin_wallet_router, create_wallet_router};
use crate::domains::coin_package::routes::create_admin_coin_package_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/wallet", create_wallet_router())
        .nest("/api/admin/wallets", create_admin_wallet_router())
        .nest("/api/admin/coin-packages", create_admin_coin_package_router())
}

/// 헬스 체크
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
