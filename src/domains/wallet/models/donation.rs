use serde::Serialize;
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

/// 작가 후원 기록
/// Author donation record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = AuthorDonation)]
pub struct AuthorDonation {
    pub id: u64,
    pub donor_id: u64,
    pub author_id: u64,
    pub story_id: Option<u64>,
    pub amount: i64,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 후원 실행 입력 (검증 완료된 값)
/// Validated donation input handed to the ledger
#[derive(Debug, Clone)]
pub struct DonationTransfer {
    pub donor_id: u64,
    pub author_id: u64,
    pub story_id: Option<u64>,
    pub amount: i64,
    pub message: Option<String>,
    /// 후원자 원장 설명
    pub donor_description: String,
    /// 작가 원장 설명
    pub author_description: String,
}

/// 후원 결과: 후원 기록 + 후원자 새 잔액
/// Donation receipt
#[derive(Debug, Clone)]
pub struct DonationReceipt {
    pub donation: AuthorDonation,
    pub donor_balance: i64,
}

/// 작가 후원 집계 (원시 데이터)
/// Aggregated donation totals for an author
#[derive(Debug, Clone, Default)]
pub struct DonationTotals {
    pub total_received: i64,
    pub donation_count: u64,
    pub recent: Vec<AuthorDonation>,
}

/// 후원자 프로필 요약
/// Donor profile summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = DonorSummary)]
pub struct DonorSummary {
    pub id: u64,
    pub display_name: String,
}

/// 최근 후원 항목
/// Recent donation with donor profile
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = RecentDonation)]
pub struct RecentDonation {
    pub donation_id: u64,
    pub donor: DonorSummary,
    pub amount: i64,
    pub message: Option<String>,
    pub story_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// 작가 후원 통계 응답
/// Author donation statistics
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = AuthorDonationStats)]
pub struct AuthorDonationStats {
    pub author_id: u64,
    #[schema(example = 1500)]
    pub total_received: i64,
    #[schema(example = 12)]
    pub donation_count: u64,
    /// 최근 후원 10건
    pub recent_donors: Vec<RecentDonation>,
}

/// 지갑 정합성 점검 결과 (잔액 == 원장 합계)
/// Wallet audit: cached balance versus ledger sum
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletAudit)]
pub struct WalletAudit {
    pub user_id: u64,
    pub wallet_id: Option<u64>,
    pub balance: i64,
    pub ledger_total: i64,
    pub entry_count: u64,
    pub consistent: bool,
}
