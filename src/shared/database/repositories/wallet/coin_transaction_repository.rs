use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use crate::domains::wallet::models::{CoinTransaction, CoinTransactionType, NewCoinTransaction};

// 코인 원장 레포지토리 (append-only, UPDATE/DELETE 없음)
// CoinTransactionRepository: append-only ledger access
pub struct CoinTransactionRepository {
    pool: PgPool,
}

impl CoinTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 지갑의 최근 원장 항목 조회 (최신순)
    /// Get most recent ledger entries for a wallet, newest first
    pub async fn get_recent_by_wallet(&self, wallet_id: u64, limit: u32) -> Result<Vec<CoinTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, amount, transaction_type, description, reference_id, created_at
            FROM coin_transactions
            WHERE wallet_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(wallet_id as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch coin transactions")?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// 지갑 원장 합계와 항목 수
    /// Sum and count of ledger entries for a wallet
    pub async fn summarize_wallet(&self, wallet_id: u64) -> Result<(i64, u64)> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT AS total, COUNT(*) AS entries
            FROM coin_transactions
            WHERE wallet_id = $1
            "#,
        )
        .bind(wallet_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to summarize coin transactions")?;

        Ok((row.get("total"), row.get::<i64, _>("entries") as u64))
    }

    /// 원장 항목 추가 (트랜잭션 내부)
    /// Append a ledger entry inside the current transaction
    pub async fn insert(conn: &mut PgConnection, entry: &NewCoinTransaction) -> Result<CoinTransaction> {
        let row = sqlx::query(
            r#"
            INSERT INTO coin_transactions (wallet_id, amount, transaction_type, description, reference_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, wallet_id, amount, transaction_type, description, reference_id, created_at
            "#,
        )
        .bind(entry.wallet_id as i64)
        .bind(entry.amount)
        .bind(entry.transaction_type.as_str())
        .bind(&entry.description)
        .bind(entry.reference_id.map(|id| id as i64))
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
        .context("Failed to insert coin transaction")?;

        row_to_transaction(&row)
    }
}

fn row_to_transaction(row: &PgRow) -> Result<CoinTransaction> {
    let raw_type: String = row.get("transaction_type");
    let transaction_type = CoinTransactionType::parse(&raw_type)
        .ok_or_else(|| anyhow!("Unknown coin transaction type: {}", raw_type))?;

    Ok(CoinTransaction {
        id: row.get::<i64, _>("id") as u64,
        wallet_id: row.get::<i64, _>("wallet_id") as u64,
        amount: row.get("amount"),
        transaction_type,
        description: row.get("description"),
        reference_id: row.get::<Option<i64>, _>("reference_id").map(|id| id as u64),
        created_at: row.get("created_at"),
    })
}
