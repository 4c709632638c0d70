// =====================================================
// 코인 원장 저장소
// Coin ledger storage
// =====================================================
// 지갑 잔액 변경과 원장 기록을 하나의 원자적 단위로 처리하는
// 저장소 인터페이스와 구현체를 제공합니다.
//
// 구현체:
// - PgCoinLedger: PostgreSQL 트랜잭션 + 행 잠금 (운영용)
// - MemoryCoinLedger: 단일 Mutex로 모든 변경을 직렬화 (테스트/로컬용)
//
// 모든 구현체는 다음을 보장해야 합니다:
// - 잔액 변경 1건 = 원장 항목 1건 (같은 원자적 단위 안에서)
// - 지갑 잔액 == 원장 합계
// - 실패 시 부분 반영 없음 (잔액 오버플로도 쓰기 전에 거부)
// =====================================================

pub mod postgres;
pub mod memory;

use async_trait::async_trait;
use crate::domains::wallet::models::{
    CoinTransaction, CoinTransactionType, CoinWallet, DonationReceipt, DonationTotals,
    DonationTransfer,
};
use crate::shared::errors::WalletError;

pub use postgres::PgCoinLedger;
pub use memory::MemoryCoinLedger;

/// 단일 지갑 잔액 변경 요청 (입금/사용)
/// Single-wallet posting; `amount` is the unsigned magnitude
#[derive(Debug, Clone)]
pub struct LedgerPosting {
    pub user_id: u64,
    pub amount: i64,
    pub transaction_type: CoinTransactionType,
    pub description: String,
    pub reference_id: Option<u64>,
}

/// 입금 후 잔액 계산 (i64 범위를 넘으면 BalanceOverflow)
/// Balance after crediting `amount`, rejecting overflow before any write
pub fn credited_balance(user_id: u64, balance: i64, amount: i64) -> Result<i64, WalletError> {
    balance
        .checked_add(amount)
        .ok_or(WalletError::BalanceOverflow { user_id, balance, amount })
}

/// 코인 원장 저장소 인터페이스
/// Coin ledger storage interface
///
/// 인자 검증(금액 부호, 자기 후원 등)은 WalletService 책임이며,
/// 구현체는 원자성과 잔액 충분 여부(트랜잭션 안에서 재확인)를 책임집니다.
#[async_trait]
pub trait CoinLedger: Send + Sync {
    /// 지갑 조회 (없으면 None, 생성하지 않음)
    async fn find_wallet(&self, user_id: u64) -> Result<Option<CoinWallet>, WalletError>;

    /// 지갑 조회, 없으면 잔액 0으로 생성
    async fn get_or_create_wallet(&self, user_id: u64) -> Result<CoinWallet, WalletError>;

    /// 지갑의 최근 원장 항목 (최신순)
    async fn recent_transactions(
        &self,
        wallet_id: u64,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, WalletError>;

    /// 입금: 지갑 upsert + 잔액 증가 + 원장 (+amount)
    /// Credit a wallet, creating it when absent
    async fn credit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError>;

    /// 출금: 잔액 재확인 후 감소 + 원장 (-amount)
    /// Debit a wallet; fails with InsufficientBalance without side effects
    async fn debit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError>;

    /// 후원 이체: 후원자 차감, 작가 가산, 원장 2건, 후원 기록 1건
    /// Donation transfer, all-or-nothing
    async fn transfer_donation(
        &self,
        transfer: &DonationTransfer,
    ) -> Result<DonationReceipt, WalletError>;

    /// 작가 후원 합계/건수/최근 후원
    async fn donation_totals(
        &self,
        author_id: u64,
        recent_limit: u32,
    ) -> Result<DonationTotals, WalletError>;

    /// 지갑 원장 합계와 항목 수
    async fn ledger_summary(&self, wallet_id: u64) -> Result<(i64, u64), WalletError>;
}
