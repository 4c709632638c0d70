use std::collections::BTreeMap;
use async_trait::async_trait;
use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use crate::domains::coin_package::models::{CoinPackage, CoinPackagePatch, NewCoinPackage};
use crate::shared::database::{CoinPackageRepository, Database};

/// 코인 패키지 저장소 인터페이스
/// Coin package storage interface
#[async_trait]
pub trait CoinPackageStore: Send + Sync {
    async fn create(&self, package: &NewCoinPackage) -> Result<CoinPackage>;

    /// 가격 오름차순, 같은 가격은 id 순
    async fn find_all(&self, include_inactive: bool) -> Result<Vec<CoinPackage>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<CoinPackage>>;

    /// 없으면 None
    async fn update(&self, id: u64, patch: &CoinPackagePatch) -> Result<Option<CoinPackage>>;

    /// 삭제된 경우 true
    async fn delete(&self, id: u64) -> Result<bool>;
}

/// PostgreSQL 구현
#[derive(Clone)]
pub struct PgCoinPackageStore {
    db: Database,
}

impl PgCoinPackageStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> CoinPackageRepository {
        CoinPackageRepository::new(self.db.pool().clone())
    }
}

#[async_trait]
impl CoinPackageStore for PgCoinPackageStore {
    async fn create(&self, package: &NewCoinPackage) -> Result<CoinPackage> {
        self.repository().create(package).await
    }

    async fn find_all(&self, include_inactive: bool) -> Result<Vec<CoinPackage>> {
        self.repository().find_all(include_inactive).await
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<CoinPackage>> {
        self.repository().find_by_id(id).await
    }

    async fn update(&self, id: u64, patch: &CoinPackagePatch) -> Result<Option<CoinPackage>> {
        self.repository().update(id, patch).await
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        self.repository().delete(id).await
    }
}

/// 메모리 구현 (테스트/로컬용)
#[derive(Default)]
pub struct MemoryCoinPackageStore {
    inner: RwLock<MemoryPackages>,
}

#[derive(Default)]
struct MemoryPackages {
    packages: BTreeMap<u64, CoinPackage>,
    next_id: u64,
}

impl MemoryCoinPackageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoinPackageStore for MemoryCoinPackageStore {
    async fn create(&self, package: &NewCoinPackage) -> Result<CoinPackage> {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let now = Utc::now();
        let created = CoinPackage {
            id: inner.next_id,
            name: package.name.clone(),
            coin_amount: package.coin_amount,
            price: package.price,
            description: package.description.clone(),
            is_active: package.is_active,
            created_at: now,
            updated_at: now,
        };
        inner.packages.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self, include_inactive: bool) -> Result<Vec<CoinPackage>> {
        let mut packages: Vec<CoinPackage> = self
            .inner
            .read()
            .packages
            .values()
            .filter(|p| include_inactive || p.is_active)
            .cloned()
            .collect();
        packages.sort_by_key(|p| (p.price, p.id));
        Ok(packages)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<CoinPackage>> {
        Ok(self.inner.read().packages.get(&id).cloned())
    }

    async fn update(&self, id: u64, patch: &CoinPackagePatch) -> Result<Option<CoinPackage>> {
        let mut inner = self.inner.write();
        Ok(inner.packages.get_mut(&id).map(|package| {
            patch.apply_to(package);
            package.updated_at = Utc::now();
            package.clone()
        }))
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        Ok(self.inner.write().packages.remove(&id).is_some())
    }
}
