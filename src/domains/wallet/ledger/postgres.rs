use async_trait::async_trait;
use super::{credited_balance, CoinLedger, LedgerPosting};
use crate::domains::wallet::models::{
    CoinTransaction, CoinTransactionType, CoinWallet, DonationReceipt, DonationTotals,
    DonationTransfer, NewCoinTransaction,
};
use crate::shared::database::{
    CoinTransactionRepository, Database, DonationRepository, WalletRepository,
};
use crate::shared::errors::WalletError;

/// PostgreSQL 원장
/// PostgreSQL-backed coin ledger
///
/// 모든 변경은 하나의 DB 트랜잭션에서 실행되고, 잔액 확인은
/// `SELECT ... FOR UPDATE`로 잠근 행을 다시 읽은 뒤 수행합니다.
/// 에러 발생 시 트랜잭션은 drop 시점에 롤백됩니다.
#[derive(Clone)]
pub struct PgCoinLedger {
    db: Database,
}

impl PgCoinLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn db_error(action: &str, err: impl std::fmt::Display) -> WalletError {
    WalletError::DatabaseError(format!("Failed to {}: {:#}", action, err))
}

#[async_trait]
impl CoinLedger for PgCoinLedger {
    async fn find_wallet(&self, user_id: u64) -> Result<Option<CoinWallet>, WalletError> {
        WalletRepository::new(self.db.pool().clone())
            .get_by_user_id(user_id)
            .await
            .map_err(|e| db_error("fetch wallet", e))
    }

    async fn get_or_create_wallet(&self, user_id: u64) -> Result<CoinWallet, WalletError> {
        WalletRepository::new(self.db.pool().clone())
            .get_or_create(user_id)
            .await
            .map_err(|e| db_error("get or create wallet", e))
    }

    async fn recent_transactions(
        &self,
        wallet_id: u64,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, WalletError> {
        CoinTransactionRepository::new(self.db.pool().clone())
            .get_recent_by_wallet(wallet_id, limit)
            .await
            .map_err(|e| db_error("fetch transaction history", e))
    }

    async fn credit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError> {
        let mut tx = self.db.pool().begin().await
            .map_err(|e| db_error("begin transaction", e))?;

        WalletRepository::ensure_exists(&mut *tx, &[posting.user_id])
            .await
            .map_err(|e| db_error("prepare wallet", e))?;

        let wallet = WalletRepository::lock_by_user_id(&mut *tx, posting.user_id)
            .await
            .map_err(|e| db_error("lock wallet", e))?
            .ok_or_else(|| WalletError::Internal("Wallet row missing after upsert".to_string()))?;

        // BIGINT 범위 초과는 DB 에러(500)가 아니라 입력 에러로 처리
        credited_balance(posting.user_id, wallet.balance, posting.amount)?;

        let wallet = WalletRepository::apply_delta(&mut *tx, wallet.id, posting.amount)
            .await
            .map_err(|e| db_error("credit wallet", e))?;

        CoinTransactionRepository::insert(&mut *tx, &NewCoinTransaction {
            wallet_id: wallet.id,
            amount: posting.amount,
            transaction_type: posting.transaction_type,
            description: posting.description.clone(),
            reference_id: posting.reference_id,
        })
        .await
        .map_err(|e| db_error("record ledger entry", e))?;

        tx.commit().await.map_err(|e| db_error("commit transaction", e))?;
        Ok(wallet)
    }

    async fn debit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError> {
        let mut tx = self.db.pool().begin().await
            .map_err(|e| db_error("begin transaction", e))?;

        // 트랜잭션 안에서 잠금 후 잔액 재확인
        let wallet = WalletRepository::lock_by_user_id(&mut *tx, posting.user_id)
            .await
            .map_err(|e| db_error("lock wallet", e))?;

        let wallet = match wallet {
            Some(w) if w.balance >= posting.amount => w,
            other => {
                return Err(WalletError::InsufficientBalance {
                    required: posting.amount,
                    available: other.map(|w| w.balance).unwrap_or(0),
                });
            }
        };

        let wallet = WalletRepository::apply_delta(&mut *tx, wallet.id, -posting.amount)
            .await
            .map_err(|e| db_error("debit wallet", e))?;

        CoinTransactionRepository::insert(&mut *tx, &NewCoinTransaction {
            wallet_id: wallet.id,
            amount: -posting.amount,
            transaction_type: posting.transaction_type,
            description: posting.description.clone(),
            reference_id: posting.reference_id,
        })
        .await
        .map_err(|e| db_error("record ledger entry", e))?;

        tx.commit().await.map_err(|e| db_error("commit transaction", e))?;
        Ok(wallet)
    }

    async fn transfer_donation(
        &self,
        transfer: &DonationTransfer,
    ) -> Result<DonationReceipt, WalletError> {
        let mut tx = self.db.pool().begin().await
            .map_err(|e| db_error("begin transaction", e))?;

        let user_ids = [transfer.donor_id, transfer.author_id];
        WalletRepository::ensure_exists(&mut *tx, &user_ids)
            .await
            .map_err(|e| db_error("prepare wallets", e))?;

        // user_id 순서로 두 지갑을 잠금 (A→B, B→A 동시 후원 시 데드락 방지)
        let locked = WalletRepository::lock_many_by_user_ids(&mut *tx, &user_ids)
            .await
            .map_err(|e| db_error("lock wallets", e))?;

        let donor = locked.iter().find(|w| w.user_id == transfer.donor_id).cloned();
        let author = locked.iter().find(|w| w.user_id == transfer.author_id).cloned();
        let (donor, author) = match (donor, author) {
            (Some(d), Some(a)) => (d, a),
            _ => return Err(WalletError::Internal("Wallet rows missing after upsert".to_string())),
        };

        if donor.balance < transfer.amount {
            return Err(WalletError::InsufficientBalance {
                required: transfer.amount,
                available: donor.balance,
            });
        }
        credited_balance(transfer.author_id, author.balance, transfer.amount)?;

        let donor = WalletRepository::apply_delta(&mut *tx, donor.id, -transfer.amount)
            .await
            .map_err(|e| db_error("debit donor wallet", e))?;
        WalletRepository::apply_delta(&mut *tx, author.id, transfer.amount)
            .await
            .map_err(|e| db_error("credit author wallet", e))?;

        CoinTransactionRepository::insert(&mut *tx, &NewCoinTransaction {
            wallet_id: donor.id,
            amount: -transfer.amount,
            transaction_type: CoinTransactionType::DonateAuthor,
            description: transfer.donor_description.clone(),
            reference_id: Some(transfer.author_id),
        })
        .await
        .map_err(|e| db_error("record donor ledger entry", e))?;

        CoinTransactionRepository::insert(&mut *tx, &NewCoinTransaction {
            wallet_id: author.id,
            amount: transfer.amount,
            transaction_type: CoinTransactionType::DonateAuthor,
            description: transfer.author_description.clone(),
            reference_id: Some(transfer.donor_id),
        })
        .await
        .map_err(|e| db_error("record author ledger entry", e))?;

        let donation = DonationRepository::insert(
            &mut *tx,
            transfer.donor_id,
            transfer.author_id,
            transfer.story_id,
            transfer.amount,
            transfer.message.as_deref(),
        )
        .await
        .map_err(|e| db_error("record donation", e))?;

        tx.commit().await.map_err(|e| db_error("commit transaction", e))?;

        Ok(DonationReceipt {
            donation,
            donor_balance: donor.balance,
        })
    }

    async fn donation_totals(
        &self,
        author_id: u64,
        recent_limit: u32,
    ) -> Result<DonationTotals, WalletError> {
        let donation_repo = DonationRepository::new(self.db.pool().clone());

        let (total_received, donation_count) = donation_repo
            .get_totals_for_author(author_id)
            .await
            .map_err(|e| db_error("aggregate donations", e))?;

        let recent = donation_repo
            .get_recent_for_author(author_id, recent_limit)
            .await
            .map_err(|e| db_error("fetch recent donations", e))?;

        Ok(DonationTotals {
            total_received,
            donation_count,
            recent,
        })
    }

    async fn ledger_summary(&self, wallet_id: u64) -> Result<(i64, u64), WalletError> {
        CoinTransactionRepository::new(self.db.pool().clone())
            .summarize_wallet(wallet_id)
            .await
            .map_err(|e| db_error("summarize ledger", e))
    }
}
