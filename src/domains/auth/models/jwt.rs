use serde::{Deserialize, Serialize};
use chrono::{Duration, Utc};
use crate::domains::auth::models::UserRole;

/// JWT Claims (Access Token 페이로드)
/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub role: UserRole,
    /// 만료 시각 (unix seconds)
    pub exp: i64,
    /// 발급 시각 (unix seconds)
    pub iat: i64,
}

impl Claims {
    /// Claims 생성
    /// expires_in_hours: 만료까지 시간
    pub fn new(user_id: u64, email: String, role: UserRole, expires_in_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email,
            role,
            exp: (now + Duration::hours(expires_in_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}
