use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 코인 패키지 관련 에러
/// Coin package catalog errors
#[derive(Error, Debug)]
pub enum CoinPackageError {
    /// 패키지를 찾을 수 없음
    /// Package not found
    #[error("Coin package not found: id={id}")]
    NotFound { id: u64 },

    /// 입력값이 유효하지 않음
    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// CoinPackageError를 HTTP 응답으로 변환
impl From<CoinPackageError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CoinPackageError) -> Self {
        let status = match &err {
            CoinPackageError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoinPackageError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CoinPackageError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
