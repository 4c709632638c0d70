use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use crate::domains::auth::models::{UserProfile, UserRole};

// 사용자 레포지토리 (지갑 서비스에 필요한 조회만 제공)
// UserRepository: read-only user lookups used by the wallet service
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, username, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.map(|r| row_to_profile(&r)))
    }

    // 여러 사용자 조회 (후원 통계의 후원자 프로필용)
    // Get users by IDs
    pub async fn get_users_by_ids(&self, ids: &[u64]) -> Result<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ids.iter().map(|id| *id as i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, email, username, role
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch users by ids")?;

        Ok(rows.iter().map(row_to_profile).collect())
    }
}

fn row_to_profile(row: &PgRow) -> UserProfile {
    UserProfile {
        id: row.get::<i64, _>("id") as u64,
        email: row.get("email"),
        username: row.get("username"),
        role: UserRole::parse(row.get::<String, _>("role").as_str()),
    }
}
