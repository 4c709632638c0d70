use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::wallet::models::AuthorDonation;

// 작가 후원 레포지토리
// DonationRepository: author_donations table access
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 작가가 받은 후원 합계와 건수
    /// Total amount and count of donations received by an author
    pub async fn get_totals_for_author(&self, author_id: u64) -> Result<(i64, u64)> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT AS total, COUNT(*) AS donations
            FROM author_donations
            WHERE author_id = $1
            "#,
        )
        .bind(author_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to aggregate author donations")?;

        Ok((row.get("total"), row.get::<i64, _>("donations") as u64))
    }

    /// 작가의 최근 후원 목록 (최신순)
    /// Most recent donations for an author
    pub async fn get_recent_for_author(&self, author_id: u64, limit: u32) -> Result<Vec<AuthorDonation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, donor_id, author_id, story_id, amount, message, created_at
            FROM author_donations
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(author_id as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent author donations")?;

        Ok(rows.iter().map(row_to_donation).collect())
    }

    /// 후원 기록 추가 (트랜잭션 내부)
    /// Insert a donation record inside the current transaction
    pub async fn insert(
        conn: &mut PgConnection,
        donor_id: u64,
        author_id: u64,
        story_id: Option<u64>,
        amount: i64,
        message: Option<&str>,
    ) -> Result<AuthorDonation> {
        let row = sqlx::query(
            r#"
            INSERT INTO author_donations (donor_id, author_id, story_id, amount, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, donor_id, author_id, story_id, amount, message, created_at
            "#,
        )
        .bind(donor_id as i64)
        .bind(author_id as i64)
        .bind(story_id.map(|id| id as i64))
        .bind(amount)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
        .context("Failed to insert author donation")?;

        Ok(row_to_donation(&row))
    }
}

fn row_to_donation(row: &PgRow) -> AuthorDonation {
    AuthorDonation {
        id: row.get::<i64, _>("id") as u64,
        donor_id: row.get::<i64, _>("donor_id") as u64,
        author_id: row.get::<i64, _>("author_id") as u64,
        story_id: row.get::<Option<i64>, _>("story_id").map(|id| id as u64),
        amount: row.get("amount"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}
