use std::collections::HashMap;
use async_trait::async_trait;
use anyhow::Result;
use parking_lot::RwLock;
use crate::domains::auth::models::UserProfile;
use crate::shared::database::{Database, UserRepository};

/// 사용자 조회 인터페이스 (지갑 서비스의 협력자)
/// User directory consumed by the wallet service
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, user_id: u64) -> Result<Option<UserProfile>>;

    async fn find_users(&self, user_ids: &[u64]) -> Result<Vec<UserProfile>>;
}

/// PostgreSQL users 테이블 기반 구현
#[derive(Clone)]
pub struct PgUserDirectory {
    db: Database,
}

impl PgUserDirectory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_user(&self, user_id: u64) -> Result<Option<UserProfile>> {
        UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
    }

    async fn find_users(&self, user_ids: &[u64]) -> Result<Vec<UserProfile>> {
        UserRepository::new(self.db.pool().clone())
            .get_users_by_ids(user_ids)
            .await
    }
}

/// 메모리 구현 (테스트/로컬용)
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<u64, UserProfile>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 사용자 등록 (같은 ID는 덮어씀)
    pub fn insert(&self, profile: UserProfile) {
        self.users.write().insert(profile.id, profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_user(&self, user_id: u64) -> Result<Option<UserProfile>> {
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn find_users(&self, user_ids: &[u64]) -> Result<Vec<UserProfile>> {
        let users = self.users.read();
        Ok(user_ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
