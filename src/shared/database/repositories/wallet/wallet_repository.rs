use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::wallet::models::CoinWallet;

// 코인 지갑 레포지토리
// WalletRepository: wallets table access
//
// 풀 기반 메서드는 단순 조회/생성용, `PgConnection`을 받는 함수는
// 호출자가 연 트랜잭션 안에서 실행된다.
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 사용자 ID로 지갑 조회
    /// Get wallet by user ID
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Option<CoinWallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, balance, created_at, updated_at
            FROM wallets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wallet by user_id")?;

        Ok(row.map(|r| row_to_wallet(&r)))
    }

    /// 지갑 조회, 없으면 잔액 0으로 생성 (upsert-read)
    /// Get wallet, creating it with balance 0 when absent
    pub async fn get_or_create(&self, user_id: u64) -> Result<CoinWallet> {
        let row = sqlx::query(
            r#"
            INSERT INTO wallets (user_id, balance, created_at, updated_at)
            VALUES ($1, 0, $2, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, balance, created_at, updated_at
            "#,
        )
        .bind(user_id as i64)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create or get wallet")?;

        Ok(row_to_wallet(&row))
    }

    /// 지갑이 없으면 잔액 0으로 생성 (트랜잭션 내부)
    /// Ensure wallets exist for the given users
    pub async fn ensure_exists(conn: &mut PgConnection, user_ids: &[u64]) -> Result<()> {
        let ids: Vec<i64> = user_ids.iter().map(|id| *id as i64).collect();
        sqlx::query(
            r#"
            INSERT INTO wallets (user_id, balance, created_at, updated_at)
            SELECT uid, 0, $2, $2 FROM UNNEST($1::BIGINT[]) AS uid
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&ids)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await
        .context("Failed to ensure wallets exist")?;

        Ok(())
    }

    /// 지갑 행 잠금 후 조회 (SELECT ... FOR UPDATE)
    /// Lock and re-read a wallet row inside the current transaction
    pub async fn lock_by_user_id(conn: &mut PgConnection, user_id: u64) -> Result<Option<CoinWallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, balance, created_at, updated_at
            FROM wallets
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to lock wallet")?;

        Ok(row.map(|r| row_to_wallet(&r)))
    }

    /// 여러 지갑을 user_id 순서로 잠금 (교차 후원 시 데드락 방지)
    /// Lock several wallet rows in user_id order
    pub async fn lock_many_by_user_ids(conn: &mut PgConnection, user_ids: &[u64]) -> Result<Vec<CoinWallet>> {
        let ids: Vec<i64> = user_ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, balance, created_at, updated_at
            FROM wallets
            WHERE user_id = ANY($1)
            ORDER BY user_id ASC
            FOR UPDATE
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await
        .context("Failed to lock wallets")?;

        Ok(rows.iter().map(row_to_wallet).collect())
    }

    /// 잔액 증감 (트랜잭션 내부, 잠금된 행 대상)
    /// Apply a signed delta to a wallet balance
    pub async fn apply_delta(conn: &mut PgConnection, wallet_id: u64, delta: i64) -> Result<CoinWallet> {
        let row = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance + $1, updated_at = $2
            WHERE id = $3
            RETURNING id, user_id, balance, created_at, updated_at
            "#,
        )
        .bind(delta)
        .bind(Utc::now())
        .bind(wallet_id as i64)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to update wallet balance")?;

        Ok(row_to_wallet(&row))
    }
}

fn row_to_wallet(row: &PgRow) -> CoinWallet {
    CoinWallet {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        balance: row.get("balance"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
