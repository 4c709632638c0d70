use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::coin_package::models::{CoinPackage, CoinPackagePatch, NewCoinPackage};

// 코인 패키지 레포지토리
// CoinPackageRepository: coin_packages table access
pub struct CoinPackageRepository {
    pool: PgPool,
}

impl CoinPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, package: &NewCoinPackage) -> Result<CoinPackage> {
        let row = sqlx::query(
            r#"
            INSERT INTO coin_packages (name, coin_amount, price, description, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, name, coin_amount, price, description, is_active, created_at, updated_at
            "#,
        )
        .bind(&package.name)
        .bind(package.coin_amount)
        .bind(package.price)
        .bind(&package.description)
        .bind(package.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create coin package")?;

        Ok(row_to_package(&row))
    }

    /// 패키지 목록 (가격 오름차순)
    /// List packages ordered by price
    pub async fn find_all(&self, include_inactive: bool) -> Result<Vec<CoinPackage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, coin_amount, price, description, is_active, created_at, updated_at
            FROM coin_packages
            WHERE $1 OR is_active
            ORDER BY price ASC, id ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch coin packages")?;

        Ok(rows.iter().map(row_to_package).collect())
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<CoinPackage>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, coin_amount, price, description, is_active, created_at, updated_at
            FROM coin_packages
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch coin package by id")?;

        Ok(row.map(|r| row_to_package(&r)))
    }

    /// 부분 수정 (NULL 파라미터는 기존 값 유지)
    /// Partial update; NULL parameters keep the current value
    pub async fn update(&self, id: u64, patch: &CoinPackagePatch) -> Result<Option<CoinPackage>> {
        let row = sqlx::query(
            r#"
            UPDATE coin_packages
            SET
                name = COALESCE($1, name),
                coin_amount = COALESCE($2, coin_amount),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE id = $7
            RETURNING id, name, coin_amount, price, description, is_active, created_at, updated_at
            "#,
        )
        .bind(&patch.name)
        .bind(patch.coin_amount)
        .bind(patch.price)
        .bind(&patch.description)
        .bind(patch.is_active)
        .bind(Utc::now())
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update coin package")?;

        Ok(row.map(|r| row_to_package(&r)))
    }

    /// 삭제, 삭제된 행이 있으면 true
    /// Delete; returns true when a row was removed
    pub async fn delete(&self, id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM coin_packages WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .context("Failed to delete coin package")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_package(row: &PgRow) -> CoinPackage {
    CoinPackage {
        id: row.get::<i64, _>("id") as u64,
        name: row.get("name"),
        coin_amount: row.get("coin_amount"),
        price: row.get("price"),
        description: row.get("description"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
