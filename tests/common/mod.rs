// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 메모리 저장소 기반 AppState + Router를 만들고
//       인증 토큰 발급 / HTTP 요청 전송을 도와줌
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = TestApp::new();
//     let (status, body) = app.get("/api/wallet/balance", Some(READER_ID)).await;
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::sync::Arc;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use novel_coin_api::domains::auth::models::{UserProfile, UserRole};
use novel_coin_api::domains::auth::services::{JwtService, MemoryUserDirectory};
use novel_coin_api::routes::create_router;
use novel_coin_api::shared::services::AppState;

// 테스트용 상수
pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const READER_ID: u64 = 1;
pub const AUTHOR_ID: u64 = 2;
pub const ADMIN_ID: u64 = 3;
pub const SECOND_READER_ID: u64 = 4;

/// 테스트 애플리케이션 (메모리 저장소)
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    jwt: JwtService,
    users: Arc<MemoryUserDirectory>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserDirectory::new());
        users.insert(profile(READER_ID, "reader@example.com", Some("reader"), UserRole::Reader));
        users.insert(profile(AUTHOR_ID, "author@example.com", Some("Kim Author"), UserRole::Author));
        users.insert(profile(ADMIN_ID, "admin@example.com", None, UserRole::Admin));
        users.insert(profile(SECOND_READER_ID, "second@example.com", None, UserRole::Reader));

        let state = AppState::in_memory(TEST_JWT_SECRET, users.clone());
        let router = create_router().with_state(state.clone());

        Self {
            state,
            router,
            jwt: JwtService::new(TEST_JWT_SECRET),
            users,
        }
    }

    /// 사용자 ID로 Bearer 토큰 발급 (role은 디렉터리 기준)
    pub fn token_for(&self, user_id: u64) -> String {
        let role = match user_id {
            AUTHOR_ID => UserRole::Author,
            ADMIN_ID => UserRole::Admin,
            _ => UserRole::Reader,
        };
        self.jwt
            .generate_access_token(user_id, format!("user{}@example.com", user_id), role)
            .expect("Failed to generate token")
    }

    pub async fn get(&self, uri: &str, user_id: Option<u64>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, user_id, None).await
    }

    pub async fn post(&self, uri: &str, user_id: Option<u64>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, user_id, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, user_id: Option<u64>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, user_id, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: Option<u64>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, user_id, None).await
    }

    /// 요청 전송 후 (상태 코드, JSON 본문) 반환
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<u64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token_for(user_id)));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// 충전 헬퍼
    pub async fn deposit(&self, user_id: u64, amount: i64) -> Value {
        let (status, body) = self
            .post("/api/wallet/deposit", Some(user_id), serde_json::json!({ "amount": amount }))
            .await;
        assert_eq!(status, StatusCode::OK, "deposit failed: {}", body);
        body
    }

    pub fn users(&self) -> &MemoryUserDirectory {
        &self.users
    }
}

pub fn profile(id: u64, email: &str, username: Option<&str>, role: UserRole) -> UserProfile {
    UserProfile {
        id,
        email: email.to_string(),
        username: username.map(str::to_string),
        role,
    }
}
