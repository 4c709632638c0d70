use std::sync::Arc;
use crate::domains::coin_package::models::{
    CoinPackage, CoinPackagePatch, CreateCoinPackageRequest, NewCoinPackage,
    UpdateCoinPackageRequest,
};
use crate::domains::coin_package::services::CoinPackageStore;
use crate::shared::errors::CoinPackageError;

/// 코인 패키지 카탈로그 서비스 (관리자 CRUD)
/// Coin package catalog service
#[derive(Clone)]
pub struct CoinPackageService {
    store: Arc<dyn CoinPackageStore>,
}

impl CoinPackageService {
    pub const MAX_NAME_CHARS: usize = 100;

    pub fn new(store: Arc<dyn CoinPackageStore>) -> Self {
        Self { store }
    }

    /// 패키지 생성 (is_active 기본값 true)
    /// Create package
    pub async fn create(&self, request: CreateCoinPackageRequest) -> Result<CoinPackage, CoinPackageError> {
        let package = NewCoinPackage {
            name: validate_name(&request.name)?,
            coin_amount: validate_coin_amount(request.coin_amount)?,
            price: validate_price(request.price)?,
            description: normalize_description(request.description),
            is_active: request.is_active.unwrap_or(true),
        };

        let created = self
            .store
            .create(&package)
            .await
            .map_err(|e| CoinPackageError::DatabaseError(format!("Failed to create coin package: {:#}", e)))?;

        tracing::info!(package_id = created.id, name = %created.name, "Coin package created");
        Ok(created)
    }

    /// 패키지 목록 (기본: 활성 패키지만)
    /// List packages; inactive ones only when requested
    pub async fn find_all(&self, include_inactive: bool) -> Result<Vec<CoinPackage>, CoinPackageError> {
        self.store
            .find_all(include_inactive)
            .await
            .map_err(|e| CoinPackageError::DatabaseError(format!("Failed to fetch coin packages: {:#}", e)))
    }

    /// 패키지 단건 조회
    /// Get package by ID
    pub async fn find_one(&self, id: u64) -> Result<CoinPackage, CoinPackageError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| CoinPackageError::DatabaseError(format!("Failed to fetch coin package: {:#}", e)))?
            .ok_or(CoinPackageError::NotFound { id })
    }

    /// 패키지 부분 수정
    /// Partially update package
    pub async fn update(
        &self,
        id: u64,
        request: UpdateCoinPackageRequest,
    ) -> Result<CoinPackage, CoinPackageError> {
        let patch = CoinPackagePatch {
            name: request.name.as_deref().map(validate_name).transpose()?,
            coin_amount: request.coin_amount.map(validate_coin_amount).transpose()?,
            price: request.price.map(validate_price).transpose()?,
            description: normalize_description(request.description),
            is_active: request.is_active,
        };

        let updated = self
            .store
            .update(id, &patch)
            .await
            .map_err(|e| CoinPackageError::DatabaseError(format!("Failed to update coin package: {:#}", e)))?
            .ok_or(CoinPackageError::NotFound { id })?;

        tracing::info!(package_id = id, "Coin package updated");
        Ok(updated)
    }

    /// 패키지 삭제
    /// Delete package
    pub async fn remove(&self, id: u64) -> Result<(), CoinPackageError> {
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| CoinPackageError::DatabaseError(format!("Failed to delete coin package: {:#}", e)))?;

        if !deleted {
            return Err(CoinPackageError::NotFound { id });
        }

        tracing::info!(package_id = id, "Coin package deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, CoinPackageError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoinPackageError::InvalidArgument("name must not be empty".to_string()));
    }
    if name.chars().count() > CoinPackageService::MAX_NAME_CHARS {
        return Err(CoinPackageError::InvalidArgument(format!(
            "name must be at most {} characters",
            CoinPackageService::MAX_NAME_CHARS
        )));
    }
    Ok(name.to_string())
}

fn validate_coin_amount(coin_amount: i64) -> Result<i64, CoinPackageError> {
    if coin_amount <= 0 {
        return Err(CoinPackageError::InvalidArgument("coinAmount must be positive".to_string()));
    }
    Ok(coin_amount)
}

fn validate_price(price: i64) -> Result<i64, CoinPackageError> {
    if price < 0 {
        return Err(CoinPackageError::InvalidArgument("price must not be negative".to_string()));
    }
    Ok(price)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
