// Coin package routes
// 코인 패키지 관리자 라우터
use axum::{routing::get, Router};
use crate::domains::coin_package::handlers::coin_package_handler;
use crate::shared::services::AppState;

/// Create admin coin package router
/// 관리자 코인 패키지 라우터 생성 (AdminUser 필요)
pub fn create_admin_coin_package_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(coin_package_handler::list_packages).post(coin_package_handler::create_package),
        )
        .route(
            "/:id",
            get(coin_package_handler::get_package)
                .patch(coin_package_handler::update_package)
                .delete(coin_package_handler::delete_package),
        )
}
