use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

/// 원장 항목 유형 (DB 저장용 문자열과 1:1 대응)
/// Ledger entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoinTransactionType {
    /// 코인 충전 (+)
    Deposit,
    /// 코인 사용 (-), 예: 유료 회차 구매
    Purchase,
    /// 작가 후원 (후원자 -, 작가 +)
    DonateAuthor,
}

impl CoinTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinTransactionType::Deposit => "deposit",
            CoinTransactionType::Purchase => "purchase",
            CoinTransactionType::DonateAuthor => "donate_author",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deposit" => Some(CoinTransactionType::Deposit),
            "purchase" => Some(CoinTransactionType::Purchase),
            "donate_author" => Some(CoinTransactionType::DonateAuthor),
            _ => None,
        }
    }
}

/// 코인 원장 항목 (append-only)
/// Coin ledger entry
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CoinTransaction)]
pub struct CoinTransaction {
    pub id: u64,
    pub wallet_id: u64,

    /// 부호 있는 금액 (양수: 입금, 음수: 출금)
    /// Signed amount (positive = credit, negative = debit)
    #[schema(example = -30)]
    pub amount: i64,

    pub transaction_type: CoinTransactionType,

    #[schema(example = "Donation to johndoe")]
    pub description: String,

    /// 상대방 사용자 ID 등 참조 ID
    /// Optional reference (e.g. counterparty user id)
    pub reference_id: Option<u64>,

    pub created_at: DateTime<Utc>,
}

/// 원장 항목 생성 데이터
/// Data for appending a ledger entry
#[derive(Debug, Clone)]
pub struct NewCoinTransaction {
    pub wallet_id: u64,
    pub amount: i64,
    pub transaction_type: CoinTransactionType,
    pub description: String,
    pub reference_id: Option<u64>,
}
