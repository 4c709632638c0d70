use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 인증/인가 관련 에러
/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Missing authorization header")]
    MissingToken,

    /// Authorization 헤더 형식 오류
    #[error("Invalid authorization format. Expected: 'Bearer <token>'")]
    InvalidAuthorizationFormat,

    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 관리자 권한 필요
    /// Admin role required
    #[error("Admin role required")]
    Forbidden,

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::MissingToken
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
