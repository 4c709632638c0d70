use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 역할
/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Reader,
    Author,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Reader => "reader",
            UserRole::Author => "author",
            UserRole::Admin => "admin",
        }
    }

    /// 알 수 없는 값은 가장 낮은 권한(Reader)으로 처리
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            "author" => UserRole::Author,
            _ => UserRole::Reader,
        }
    }
}

/// 지갑 서비스가 참조하는 사용자 프로필
/// User profile as seen by the wallet service
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
}

impl UserProfile {
    /// 표시 이름: username, 없으면 email
    /// Display name: username, falling back to email
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}
