use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use chrono::{DateTime, Utc};
use crate::domains::wallet::models::{AuthorDonation, CoinTransaction};

/// 사용자 코인 지갑 (사용자당 1개)
/// Per-user coin wallet holding the cached balance
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CoinWallet)]
pub struct CoinWallet {
    pub id: u64,
    pub user_id: u64,

    /// 캐시된 잔액 (원장 합계와 항상 일치)
    #[schema(example = 120)]
    pub balance: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 잔액 조회 응답
/// Wallet balance response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletBalanceResponse)]
pub struct WalletBalanceResponse {
    pub wallet: CoinWallet,
}

/// 거래 내역 조회 쿼리
/// Transaction history query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryQuery {
    /// 최대 조회 개수 (기본 20, 최대 100)
    pub limit: Option<u32>,
}

/// 거래 내역 응답
/// Transaction history response (newest first)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = TransactionHistoryResponse)]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<CoinTransaction>,
}

/// 코인 충전 요청
/// Deposit request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = DepositRequest)]
pub struct DepositRequest {
    #[schema(example = 50)]
    pub amount: i64,

    #[schema(example = "Test deposit")]
    pub description: Option<String>,
}

/// 코인 사용 요청
/// Pay (spend) request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = PayRequest)]
pub struct PayRequest {
    #[schema(example = 20)]
    pub amount: i64,

    #[schema(example = "Unlock chapter 12")]
    pub description: Option<String>,

    /// 구매 대상 참조 ID (예: 회차 ID)
    pub reference_id: Option<u64>,
}

/// 지갑 변경 응답 (충전/사용)
/// Wallet mutation response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletMutationResponse)]
pub struct WalletMutationResponse {
    pub wallet: CoinWallet,
    pub message: String,
}

/// 작가 후원 요청
/// Donate-to-author request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = DonateRequest)]
pub struct DonateRequest {
    #[schema(example = 7)]
    pub author_id: u64,

    pub story_id: Option<u64>,

    #[schema(example = 30)]
    pub amount: i64,

    #[schema(example = "Love this story!")]
    pub message: Option<String>,
}

/// 작가 후원 응답
/// Donate-to-author response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = DonateResponse)]
pub struct DonateResponse {
    pub donation: AuthorDonation,

    /// 후원 후 후원자 잔액
    pub balance: i64,

    pub message: String,
}
