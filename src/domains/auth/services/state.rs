// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;
use crate::domains::auth::services::{JwtService, UserDirectory};

/// Auth domain state
/// 토큰 검증과 사용자 조회에 필요한 서비스
#[derive(Clone)]
pub struct AuthState {
    pub jwt_service: JwtService,
    pub user_directory: Arc<dyn UserDirectory>,
}

impl AuthState {
    pub fn new(jwt_service: JwtService, user_directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            jwt_service,
            user_directory,
        }
    }
}
