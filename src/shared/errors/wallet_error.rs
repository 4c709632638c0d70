use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 지갑/코인 관련 에러
/// Wallet and coin ledger errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// 금액이 유효하지 않음 (0 이하 등)
    /// Invalid amount
    #[error("Invalid amount: {amount} ({reason})")]
    InvalidAmount { amount: i64, reason: &'static str },

    /// 입력값이 유효하지 않음
    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 잔액 부족
    /// Insufficient balance
    #[error("Insufficient balance: required={required}, available={available}")]
    InsufficientBalance { required: i64, available: i64 },

    /// 입금 후 잔액이 표현 가능한 최대값을 넘음
    /// Credit would push the balance past i64::MAX
    #[error("Balance limit exceeded: user_id={user_id}, balance={balance}, amount={amount}")]
    BalanceOverflow { user_id: u64, balance: i64, amount: i64 },

    /// 자기 자신에게 후원 불가
    /// Donor and recipient are the same user
    #[error("Cannot donate to yourself")]
    SelfDonation,

    /// 후원 대상 사용자를 찾을 수 없음
    /// Recipient user not found
    #[error("Recipient not found: user_id={user_id}")]
    RecipientNotFound { user_id: u64 },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// WalletError를 HTTP 응답으로 변환
impl From<WalletError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: WalletError) -> Self {
        let status = match &err {
            WalletError::InvalidAmount { .. }
            | WalletError::InvalidArgument(_)
            | WalletError::InsufficientBalance { .. }
            | WalletError::BalanceOverflow { .. }
            | WalletError::SelfDonation => StatusCode::BAD_REQUEST,
            WalletError::RecipientNotFound { .. } => StatusCode::NOT_FOUND,
            WalletError::DatabaseError(_) | WalletError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
