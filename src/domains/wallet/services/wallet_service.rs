use std::collections::HashMap;
use std::sync::Arc;
use crate::domains::auth::services::UserDirectory;
use crate::domains::wallet::ledger::{CoinLedger, LedgerPosting};
use crate::domains::wallet::models::{
    AuthorDonationStats, CoinTransaction, CoinTransactionType, CoinWallet, DonationReceipt,
    DonationTransfer, DonorSummary, RecentDonation, WalletAudit,
};
use crate::shared::errors::WalletError;

/// 코인 지갑 서비스
/// WalletService: coin wallet business logic
///
/// 역할:
/// - 인자 검증 (금액, 자기 후원, 후원 대상 존재 여부)
/// - 원장 설명 문구 생성 (표시 이름 조회)
/// - 원자적 잔액 변경은 CoinLedger 구현체에 위임
#[derive(Clone)]
pub struct WalletService {
    ledger: Arc<dyn CoinLedger>,
    users: Arc<dyn UserDirectory>,
}

impl WalletService {
    /// 거래 내역 기본 조회 개수
    pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
    /// 거래 내역 최대 조회 개수
    pub const MAX_HISTORY_LIMIT: u32 = 100;
    /// 후원 통계의 최근 후원자 수
    pub const RECENT_DONORS_LIMIT: u32 = 10;
    /// 후원 메시지 최대 길이 (문자 수)
    pub const MAX_DONATION_MESSAGE_CHARS: usize = 500;

    pub fn new(ledger: Arc<dyn CoinLedger>, users: Arc<dyn UserDirectory>) -> Self {
        Self { ledger, users }
    }

    /// 잔액 조회 (지갑이 없으면 잔액 0으로 생성)
    /// Get wallet, creating it with balance 0 when absent
    pub async fn get_balance(&self, user_id: u64) -> Result<CoinWallet, WalletError> {
        self.ledger.get_or_create_wallet(user_id).await
    }

    /// 최근 거래 내역 (최신순)
    /// Get most recent ledger entries, newest first
    ///
    /// limit: None이면 20, 1..=100 범위로 보정. 지갑이 없으면 빈 목록.
    pub async fn get_transaction_history(
        &self,
        user_id: u64,
        limit: Option<u32>,
    ) -> Result<Vec<CoinTransaction>, WalletError> {
        let limit = limit
            .unwrap_or(Self::DEFAULT_HISTORY_LIMIT)
            .clamp(1, Self::MAX_HISTORY_LIMIT);

        match self.ledger.find_wallet(user_id).await? {
            Some(wallet) => self.ledger.recent_transactions(wallet.id, limit).await,
            None => Ok(Vec::new()),
        }
    }

    /// 코인 충전
    /// Deposit coins (amount > 0)
    pub async fn deposit(
        &self,
        user_id: u64,
        amount: i64,
        description: Option<String>,
    ) -> Result<CoinWallet, WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount {
                amount,
                reason: "deposit amount must be positive",
            });
        }

        let wallet = self
            .ledger
            .credit(&LedgerPosting {
                user_id,
                amount,
                transaction_type: CoinTransactionType::Deposit,
                description: non_empty(description).unwrap_or_else(|| "Deposit".to_string()),
                reference_id: None,
            })
            .await?;

        tracing::info!(user_id, amount, balance = wallet.balance, "Coins deposited");
        Ok(wallet)
    }

    /// 코인 사용 (예: 유료 회차 구매)
    /// Spend coins (amount >= 0)
    pub async fn pay(
        &self,
        user_id: u64,
        amount: i64,
        description: Option<String>,
        reference_id: Option<u64>,
    ) -> Result<CoinWallet, WalletError> {
        if amount < 0 {
            return Err(WalletError::InvalidAmount {
                amount,
                reason: "payment amount must not be negative",
            });
        }

        let result = self
            .ledger
            .debit(&LedgerPosting {
                user_id,
                amount,
                transaction_type: CoinTransactionType::Purchase,
                description: non_empty(description).unwrap_or_else(|| "Purchase".to_string()),
                reference_id,
            })
            .await;

        match &result {
            Ok(wallet) => {
                tracing::info!(user_id, amount, balance = wallet.balance, "Coins spent");
            }
            Err(WalletError::InsufficientBalance { available, .. }) => {
                tracing::warn!(user_id, amount, available, "Payment rejected: insufficient balance");
            }
            Err(e) => {
                tracing::error!(user_id, amount, error = %e, "Payment failed");
            }
        }

        result
    }

    /// 작가 후원
    /// Donate coins to an author
    ///
    /// 검증 순서: 금액 > 0 → 자기 후원 아님 → 작가 존재 → (트랜잭션 안) 잔액
    pub async fn donate_to_author(
        &self,
        user_id: u64,
        author_id: u64,
        amount: i64,
        story_id: Option<u64>,
        message: Option<String>,
    ) -> Result<DonationReceipt, WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount {
                amount,
                reason: "donation amount must be positive",
            });
        }

        if user_id == author_id {
            return Err(WalletError::SelfDonation);
        }

        let message = non_empty(message);
        if let Some(text) = &message {
            if text.chars().count() > Self::MAX_DONATION_MESSAGE_CHARS {
                return Err(WalletError::InvalidArgument(format!(
                    "donation message must be at most {} characters",
                    Self::MAX_DONATION_MESSAGE_CHARS
                )));
            }
        }

        let author = self
            .users
            .find_user(author_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to fetch author: {:#}", e)))?
            .ok_or(WalletError::RecipientNotFound { user_id: author_id })?;

        let donor_name = self
            .users
            .find_user(user_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to fetch donor: {:#}", e)))?
            .map(|donor| donor.display_name().to_string())
            .unwrap_or_else(|| format!("user #{}", user_id));

        let transfer = DonationTransfer {
            donor_id: user_id,
            author_id,
            story_id,
            amount,
            message,
            donor_description: format!("Donation to {}", author.display_name()),
            author_description: format!("Donation from {}", donor_name),
        };

        let result = self.ledger.transfer_donation(&transfer).await;

        match &result {
            Ok(receipt) => {
                tracing::info!(
                    donor_id = user_id,
                    author_id,
                    amount,
                    donation_id = receipt.donation.id,
                    donor_balance = receipt.donor_balance,
                    "Donation completed"
                );
            }
            Err(WalletError::InsufficientBalance { available, .. }) => {
                tracing::warn!(
                    donor_id = user_id,
                    author_id,
                    amount,
                    available,
                    "Donation rejected: insufficient balance"
                );
            }
            Err(e) => {
                tracing::error!(donor_id = user_id, author_id, amount, error = %e, "Donation failed");
            }
        }

        result
    }

    /// 작가 후원 통계 (합계, 건수, 최근 후원 10건 + 후원자 프로필)
    /// Author donation statistics
    pub async fn get_author_donation_stats(
        &self,
        author_id: u64,
    ) -> Result<AuthorDonationStats, WalletError> {
        let totals = self
            .ledger
            .donation_totals(author_id, Self::RECENT_DONORS_LIMIT)
            .await?;

        let mut donor_ids: Vec<u64> = totals.recent.iter().map(|d| d.donor_id).collect();
        donor_ids.sort_unstable();
        donor_ids.dedup();

        let profiles: HashMap<u64, String> = self
            .users
            .find_users(&donor_ids)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to fetch donors: {:#}", e)))?
            .into_iter()
            .map(|profile| (profile.id, profile.display_name().to_string()))
            .collect();

        let recent_donors = totals
            .recent
            .into_iter()
            .map(|donation| RecentDonation {
                donation_id: donation.id,
                donor: DonorSummary {
                    id: donation.donor_id,
                    display_name: profiles
                        .get(&donation.donor_id)
                        .cloned()
                        .unwrap_or_else(|| format!("user #{}", donation.donor_id)),
                },
                amount: donation.amount,
                message: donation.message,
                story_id: donation.story_id,
                created_at: donation.created_at,
            })
            .collect();

        Ok(AuthorDonationStats {
            author_id,
            total_received: totals.total_received,
            donation_count: totals.donation_count,
            recent_donors,
        })
    }

    /// 지갑 정합성 점검 (캐시된 잔액 == 원장 합계)
    /// Audit a wallet: compare cached balance with the ledger sum
    pub async fn audit_wallet(&self, user_id: u64) -> Result<WalletAudit, WalletError> {
        let wallet = match self.ledger.find_wallet(user_id).await? {
            Some(wallet) => wallet,
            None => {
                return Ok(WalletAudit {
                    user_id,
                    wallet_id: None,
                    balance: 0,
                    ledger_total: 0,
                    entry_count: 0,
                    consistent: true,
                });
            }
        };

        let (ledger_total, entry_count) = self.ledger.ledger_summary(wallet.id).await?;
        let consistent = ledger_total == wallet.balance;
        if !consistent {
            tracing::error!(
                user_id,
                wallet_id = wallet.id,
                balance = wallet.balance,
                ledger_total,
                "Wallet balance does not match ledger"
            );
        }

        Ok(WalletAudit {
            user_id,
            wallet_id: Some(wallet.id),
            balance: wallet.balance,
            ledger_total,
            entry_count,
            consistent,
        })
    }
}

/// 앞뒤 공백 제거, 빈 문자열은 None
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::models::{UserProfile, UserRole};
    use crate::domains::auth::services::MemoryUserDirectory;
    use crate::domains::wallet::ledger::MemoryCoinLedger;

    const READER: u64 = 1;
    const AUTHOR: u64 = 2;

    fn setup() -> WalletService {
        let users = MemoryUserDirectory::new();
        users.insert(UserProfile {
            id: READER,
            email: "reader@example.com".to_string(),
            username: Some("bookworm".to_string()),
            role: UserRole::Reader,
        });
        users.insert(UserProfile {
            id: AUTHOR,
            email: "author@example.com".to_string(),
            username: Some("penname".to_string()),
            role: UserRole::Author,
        });
        WalletService::new(Arc::new(MemoryCoinLedger::new()), Arc::new(users))
    }

    async fn ledger_sum(service: &WalletService, user_id: u64) -> i64 {
        service.audit_wallet(user_id).await.unwrap().ledger_total
    }

    #[tokio::test]
    async fn test_get_balance_creates_empty_wallet() {
        let service = setup();
        let first = service.get_balance(READER).await.unwrap();
        let second = service.get_balance(READER).await.unwrap();

        assert_eq!(first.balance, 0);
        assert_eq!(first.id, second.id);
        assert!(service.get_transaction_history(READER, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deposit_then_donate_example() {
        let service = setup();
        service.deposit(READER, 100, None).await.unwrap();

        let wallet = service.deposit(READER, 50, Some("top up".to_string())).await.unwrap();
        assert_eq!(wallet.balance, 150);

        let receipt = service
            .donate_to_author(READER, AUTHOR, 30, Some(9), Some("  great story ".to_string()))
            .await
            .unwrap();
        assert_eq!(receipt.donor_balance, 120);
        assert_eq!(receipt.donation.amount, 30);
        assert_eq!(receipt.donation.story_id, Some(9));
        assert_eq!(receipt.donation.message.as_deref(), Some("great story"));

        let author_wallet = service.get_balance(AUTHOR).await.unwrap();
        assert_eq!(author_wallet.balance, 30);

        let donor_history = service.get_transaction_history(READER, None).await.unwrap();
        assert_eq!(donor_history[0].amount, -30);
        assert_eq!(donor_history[0].transaction_type, CoinTransactionType::DonateAuthor);
        assert_eq!(donor_history[0].reference_id, Some(AUTHOR));
        assert_eq!(donor_history[0].description, "Donation to penname");

        let author_history = service.get_transaction_history(AUTHOR, None).await.unwrap();
        assert_eq!(author_history.len(), 1);
        assert_eq!(author_history[0].amount, 30);
        assert_eq!(author_history[0].reference_id, Some(READER));
        assert_eq!(author_history[0].description, "Donation from bookworm");

        assert_eq!(ledger_sum(&service, READER).await, 120);
        assert_eq!(ledger_sum(&service, AUTHOR).await, 30);
    }

    #[tokio::test]
    async fn test_pay_more_than_balance_leaves_wallet_untouched() {
        let service = setup();
        service.deposit(READER, 10, None).await.unwrap();

        let err = service.pay(READER, 20, None, Some(42)).await.unwrap_err();
        assert!(matches!(err, WalletError::InsufficientBalance { required: 20, available: 10 }));

        assert_eq!(service.get_balance(READER).await.unwrap().balance, 10);
        assert_eq!(service.get_transaction_history(READER, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pay_records_negative_purchase_entry() {
        let service = setup();
        service.deposit(READER, 10, None).await.unwrap();

        let wallet = service.pay(READER, 4, Some("Chapter 3".to_string()), Some(3)).await.unwrap();
        assert_eq!(wallet.balance, 6);

        let latest = &service.get_transaction_history(READER, Some(1)).await.unwrap()[0];
        assert_eq!(latest.amount, -4);
        assert_eq!(latest.transaction_type, CoinTransactionType::Purchase);
        assert_eq!(latest.reference_id, Some(3));
        assert!(service.audit_wallet(READER).await.unwrap().consistent);
    }

    #[tokio::test]
    async fn test_amount_validation() {
        let service = setup();

        assert!(matches!(
            service.deposit(READER, 0, None).await,
            Err(WalletError::InvalidAmount { .. })
        ));
        assert!(matches!(
            service.pay(READER, -1, None, None).await,
            Err(WalletError::InvalidAmount { .. })
        ));
        for amount in [0, -5] {
            assert!(matches!(
                service.donate_to_author(READER, AUTHOR, amount, None, None).await,
                Err(WalletError::InvalidAmount { .. })
            ));
        }

        assert_eq!(service.get_author_donation_stats(AUTHOR).await.unwrap().donation_count, 0);
        assert!(service.get_transaction_history(READER, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_self_donation_rejected_regardless_of_balance() {
        let service = setup();
        service.deposit(READER, 1_000, None).await.unwrap();

        let err = service.donate_to_author(READER, READER, 10, None, None).await.unwrap_err();
        assert!(matches!(err, WalletError::SelfDonation));
        assert_eq!(service.get_balance(READER).await.unwrap().balance, 1_000);
    }

    #[tokio::test]
    async fn test_donation_to_unknown_author_is_not_found() {
        let service = setup();
        service.deposit(READER, 100, None).await.unwrap();

        let err = service.donate_to_author(READER, 999, 10, None, None).await.unwrap_err();
        assert!(matches!(err, WalletError::RecipientNotFound { user_id: 999 }));
    }

    #[tokio::test]
    async fn test_overlong_message_rejected() {
        let service = setup();
        service.deposit(READER, 100, None).await.unwrap();

        let message = "a".repeat(WalletService::MAX_DONATION_MESSAGE_CHARS + 1);
        let err = service
            .donate_to_author(READER, AUTHOR, 10, None, Some(message))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_author_stats_lists_ten_most_recent() {
        let service = setup();
        service.deposit(READER, 1_000, None).await.unwrap();

        for amount in 1..=12 {
            service.donate_to_author(READER, AUTHOR, amount, None, None).await.unwrap();
        }

        let stats = service.get_author_donation_stats(AUTHOR).await.unwrap();
        assert_eq!(stats.donation_count, 12);
        assert_eq!(stats.total_received, (1..=12).sum::<i64>());
        assert_eq!(stats.recent_donors.len(), 10);
        assert_eq!(stats.recent_donors[0].amount, 12);
        assert_eq!(stats.recent_donors[0].donor.display_name, "bookworm");
    }

    #[tokio::test]
    async fn test_history_limit_is_clamped() {
        let service = setup();
        for _ in 0..3 {
            service.deposit(READER, 1, None).await.unwrap();
        }

        assert_eq!(service.get_transaction_history(READER, Some(0)).await.unwrap().len(), 1);
        assert_eq!(service.get_transaction_history(READER, Some(500)).await.unwrap().len(), 3);
    }

    /// 모든 호출이 DB 에러를 반환하는 원장
    struct UnavailableLedger;

    #[async_trait::async_trait]
    impl crate::domains::wallet::ledger::CoinLedger for UnavailableLedger {
        async fn find_wallet(&self, _: u64) -> Result<Option<CoinWallet>, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn get_or_create_wallet(&self, _: u64) -> Result<CoinWallet, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn recent_transactions(&self, _: u64, _: u32) -> Result<Vec<CoinTransaction>, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn credit(&self, _: &LedgerPosting) -> Result<CoinWallet, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn debit(&self, _: &LedgerPosting) -> Result<CoinWallet, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn transfer_donation(
            &self,
            _: &crate::domains::wallet::models::DonationTransfer,
        ) -> Result<crate::domains::wallet::models::DonationReceipt, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn donation_totals(
            &self,
            _: u64,
            _: u32,
        ) -> Result<crate::domains::wallet::models::DonationTotals, WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
        async fn ledger_summary(&self, _: u64) -> Result<(i64, u64), WalletError> {
            Err(WalletError::DatabaseError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_pay_propagates_storage_failure() {
        let service = WalletService::new(Arc::new(UnavailableLedger), Arc::new(MemoryUserDirectory::new()));

        let err = service.pay(READER, 5, None, None).await.unwrap_err();
        assert!(matches!(err, WalletError::DatabaseError(_)));
    }
}
