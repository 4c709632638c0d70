use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use super::{credited_balance, CoinLedger, LedgerPosting};
use crate::domains::wallet::models::{
    AuthorDonation, CoinTransaction, CoinTransactionType, CoinWallet, DonationReceipt,
    DonationTotals, DonationTransfer,
};
use crate::shared::errors::WalletError;

/// 메모리 원장 (테스트/로컬 실행용)
/// In-memory coin ledger
///
/// 하나의 Mutex가 모든 지갑을 보호하므로 변경은 완전히 직렬화됩니다.
/// 각 연산은 검증을 모두 마친 뒤에만 상태를 변경합니다 (실패 시 부분 반영 없음).
#[derive(Default)]
pub struct MemoryCoinLedger {
    state: Mutex<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    /// user_id -> wallet
    wallets: HashMap<u64, CoinWallet>,
    transactions: Vec<CoinTransaction>,
    donations: Vec<AuthorDonation>,
    next_wallet_id: u64,
    next_transaction_id: u64,
    next_donation_id: u64,
}

impl LedgerState {
    fn wallet_mut(&mut self, user_id: u64) -> &mut CoinWallet {
        let next_id = &mut self.next_wallet_id;
        self.wallets.entry(user_id).or_insert_with(|| {
            *next_id += 1;
            let now = Utc::now();
            CoinWallet {
                id: *next_id,
                user_id,
                balance: 0,
                created_at: now,
                updated_at: now,
            }
        })
    }

    fn balance_of(&self, user_id: u64) -> i64 {
        self.wallets.get(&user_id).map(|w| w.balance).unwrap_or(0)
    }

    /// 검증이 끝난 새 잔액 반영
    fn set_balance(&mut self, user_id: u64, balance: i64) -> CoinWallet {
        let wallet = self.wallet_mut(user_id);
        wallet.balance = balance;
        wallet.updated_at = Utc::now();
        wallet.clone()
    }

    fn append(
        &mut self,
        wallet_id: u64,
        amount: i64,
        transaction_type: CoinTransactionType,
        description: &str,
        reference_id: Option<u64>,
    ) {
        self.next_transaction_id += 1;
        self.transactions.push(CoinTransaction {
            id: self.next_transaction_id,
            wallet_id,
            amount,
            transaction_type,
            description: description.to_string(),
            reference_id,
            created_at: Utc::now(),
        });
    }
}

impl MemoryCoinLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoinLedger for MemoryCoinLedger {
    async fn find_wallet(&self, user_id: u64) -> Result<Option<CoinWallet>, WalletError> {
        Ok(self.state.lock().wallets.get(&user_id).cloned())
    }

    async fn get_or_create_wallet(&self, user_id: u64) -> Result<CoinWallet, WalletError> {
        Ok(self.state.lock().wallet_mut(user_id).clone())
    }

    async fn recent_transactions(
        &self,
        wallet_id: u64,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, WalletError> {
        let state = self.state.lock();
        // id가 단조 증가하므로 역순 = 최신순
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.wallet_id == wallet_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn credit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError> {
        let mut state = self.state.lock();
        let balance = credited_balance(
            posting.user_id,
            state.balance_of(posting.user_id),
            posting.amount,
        )?;
        let wallet = state.set_balance(posting.user_id, balance);
        state.append(
            wallet.id,
            posting.amount,
            posting.transaction_type,
            &posting.description,
            posting.reference_id,
        );
        Ok(wallet)
    }

    async fn debit(&self, posting: &LedgerPosting) -> Result<CoinWallet, WalletError> {
        let mut state = self.state.lock();

        let available = state.wallets.get(&posting.user_id).map(|w| w.balance);
        let balance = match available {
            Some(balance) if balance >= posting.amount => balance - posting.amount,
            other => {
                return Err(WalletError::InsufficientBalance {
                    required: posting.amount,
                    available: other.unwrap_or(0),
                });
            }
        };

        let wallet = state.set_balance(posting.user_id, balance);
        state.append(
            wallet.id,
            -posting.amount,
            posting.transaction_type,
            &posting.description,
            posting.reference_id,
        );
        Ok(wallet)
    }

    async fn transfer_donation(
        &self,
        transfer: &DonationTransfer,
    ) -> Result<DonationReceipt, WalletError> {
        let mut state = self.state.lock();

        let available = state.balance_of(transfer.donor_id);
        if available < transfer.amount {
            return Err(WalletError::InsufficientBalance {
                required: transfer.amount,
                available,
            });
        }

        // 두 잔액을 모두 계산한 뒤에만 상태 변경
        let author_balance = credited_balance(
            transfer.author_id,
            state.balance_of(transfer.author_id),
            transfer.amount,
        )?;

        let donor = state.set_balance(transfer.donor_id, available - transfer.amount);
        let author = state.set_balance(transfer.author_id, author_balance);

        state.append(
            donor.id,
            -transfer.amount,
            CoinTransactionType::DonateAuthor,
            &transfer.donor_description,
            Some(transfer.author_id),
        );
        state.append(
            author.id,
            transfer.amount,
            CoinTransactionType::DonateAuthor,
            &transfer.author_description,
            Some(transfer.donor_id),
        );

        state.next_donation_id += 1;
        let donation = AuthorDonation {
            id: state.next_donation_id,
            donor_id: transfer.donor_id,
            author_id: transfer.author_id,
            story_id: transfer.story_id,
            amount: transfer.amount,
            message: transfer.message.clone(),
            created_at: Utc::now(),
        };
        state.donations.push(donation.clone());

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
        let state = self.state.lock();
        let received: Vec<&AuthorDonation> = state
            .donations
            .iter()
            .filter(|d| d.author_id == author_id)
            .collect();

        Ok(DonationTotals {
            total_received: received.iter().map(|d| d.amount).sum(),
            donation_count: received.len() as u64,
            recent: received
                .iter()
                .rev()
                .take(recent_limit as usize)
                .map(|d| (*d).clone())
                .collect(),
        })
    }

    async fn ledger_summary(&self, wallet_id: u64) -> Result<(i64, u64), WalletError> {
        let state = self.state.lock();
        let (total, count) = state
            .transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id)
            .fold((0i64, 0u64), |(sum, n), t| (sum + t.amount, n + 1));
        Ok((total, count))
    }
}
