// =====================================================
// 지갑 API 통합 테스트 (메모리 저장소)
// =====================================================

mod common;
use common::*;
use axum::http::StatusCode;
use serde_json::json;

/// 테스트: 인증 없이 지갑 API 호출 시 401
#[tokio::test]
async fn test_wallet_routes_require_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/wallet/balance", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.post("/api/wallet/deposit", None, json!({ "amount": 10 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 테스트: 첫 잔액 조회 시 0 코인 지갑 생성
#[tokio::test]
async fn test_balance_creates_empty_wallet() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/wallet/balance", Some(READER_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wallet"]["userId"], READER_ID);
    assert_eq!(body["wallet"]["balance"], 0);

    // 같은 지갑이 다시 반환되어야 함
    let (_, again) = app.get("/api/wallet/balance", Some(READER_ID)).await;
    assert_eq!(again["wallet"]["id"], body["wallet"]["id"]);
}

/// 테스트: 충전 후 사용, 거래 내역은 최신순
#[tokio::test]
async fn test_deposit_then_pay_records_history() {
    let app = TestApp::new();

    let deposited = app.deposit(READER_ID, 100).await;
    assert_eq!(deposited["wallet"]["balance"], 100);

    let (status, body) = app
        .post(
            "/api/wallet/pay",
            Some(READER_ID),
            json!({ "amount": 30, "description": "Chapter 12", "referenceId": 12 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wallet"]["balance"], 70);

    let (status, body) = app.get("/api/wallet/history", Some(READER_ID)).await;
    assert_eq!(status, StatusCode::OK);
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["amount"], -30);
    assert_eq!(transactions[0]["transactionType"], "purchase");
    assert_eq!(transactions[0]["description"], "Chapter 12");
    assert_eq!(transactions[0]["referenceId"], 12);
    assert_eq!(transactions[1]["amount"], 100);
    assert_eq!(transactions[1]["transactionType"], "deposit");
}

/// 테스트: 잔액 부족 시 400, 잔액/내역 변화 없음
#[tokio::test]
async fn test_pay_with_insufficient_balance_is_rejected() {
    let app = TestApp::new();
    app.deposit(READER_ID, 20).await;

    let (status, body) = app.post("/api/wallet/pay", Some(READER_ID), json!({ "amount": 21 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Insufficient balance"));

    let (_, balance) = app.get("/api/wallet/balance", Some(READER_ID)).await;
    assert_eq!(balance["wallet"]["balance"], 20);

    let (_, history) = app.get("/api/wallet/history", Some(READER_ID)).await;
    assert_eq!(history["transactions"].as_array().unwrap().len(), 1);
}

/// 테스트: 0 이하 금액 충전은 400
#[tokio::test]
async fn test_non_positive_deposit_is_rejected() {
    let app = TestApp::new();

    for amount in [0, -5] {
        let (status, _) = app.post("/api/wallet/deposit", Some(READER_ID), json!({ "amount": amount })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, history) = app.get("/api/wallet/history", Some(READER_ID)).await;
    assert!(history["transactions"].as_array().unwrap().is_empty());
}

/// 테스트: 최대 잔액을 넘는 충전은 400, 잔액/원장 변화 없음
#[tokio::test]
async fn test_deposit_past_max_balance_is_rejected() {
    let app = TestApp::new();
    app.deposit(READER_ID, i64::MAX).await;

    let (status, body) = app
        .post("/api/wallet/deposit", Some(READER_ID), json!({ "amount": i64::MAX }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Balance limit exceeded"));

    let (_, audit) = app
        .get(&format!("/api/admin/wallets/{}/audit", READER_ID), Some(ADMIN_ID))
        .await;
    assert_eq!(audit["balance"], i64::MAX);
    assert_eq!(audit["ledgerTotal"], i64::MAX);
    assert_eq!(audit["entryCount"], 1);
    assert_eq!(audit["consistent"], true);
}

/// 테스트: 작가 잔액이 넘치는 후원은 400, 후원자 잔액 그대로
#[tokio::test]
async fn test_donation_overflowing_author_is_rejected() {
    let app = TestApp::new();
    app.deposit(AUTHOR_ID, i64::MAX).await;
    app.deposit(READER_ID, 10).await;

    let (status, _) = app
        .post("/api/wallet/donate", Some(READER_ID), json!({ "authorId": AUTHOR_ID, "amount": 5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, audit) = app
        .get(&format!("/api/admin/wallets/{}/audit", READER_ID), Some(ADMIN_ID))
        .await;
    assert_eq!(audit["balance"], 10);
    assert_eq!(audit["entryCount"], 1);
    assert_eq!(audit["consistent"], true);

    let (_, stats) = app.get(&format!("/api/wallet/author-donations/{}", AUTHOR_ID), None).await;
    assert_eq!(stats["donationCount"], 0);
}

/// 테스트: limit 파라미터 적용
#[tokio::test]
async fn test_history_limit() {
    let app = TestApp::new();
    for amount in 1..=5 {
        app.deposit(READER_ID, amount).await;
    }

    let (status, body) = app.get("/api/wallet/history?limit=2", Some(READER_ID)).await;
    assert_eq!(status, StatusCode::OK);
    let amounts: Vec<i64> = body["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["amount"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, vec![5, 4]);
}

/// 테스트: 작가 후원 성공 (양쪽 원장 + 후원 기록)
#[tokio::test]
async fn test_donate_moves_coins_to_author() {
    let app = TestApp::new();
    app.deposit(READER_ID, 100).await;

    let (status, body) = app
        .post(
            "/api/wallet/donate",
            Some(READER_ID),
            json!({ "authorId": AUTHOR_ID, "storyId": 7, "amount": 40, "message": "  Love it!  " }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["balance"], 60);
    assert_eq!(body["donation"]["amount"], 40);
    assert_eq!(body["donation"]["storyId"], 7);
    assert_eq!(body["donation"]["message"], "Love it!");

    let (_, author_balance) = app.get("/api/wallet/balance", Some(AUTHOR_ID)).await;
    assert_eq!(author_balance["wallet"]["balance"], 40);

    let (_, donor_history) = app.get("/api/wallet/history", Some(READER_ID)).await;
    let latest = &donor_history["transactions"][0];
    assert_eq!(latest["amount"], -40);
    assert_eq!(latest["transactionType"], "donate_author");
    assert_eq!(latest["description"], "Donation to Kim Author");
    assert_eq!(latest["referenceId"], AUTHOR_ID);

    let (_, author_history) = app.get("/api/wallet/history", Some(AUTHOR_ID)).await;
    let credit = &author_history["transactions"][0];
    assert_eq!(credit["amount"], 40);
    assert_eq!(credit["description"], "Donation from reader");
    assert_eq!(credit["referenceId"], READER_ID);
}

/// 테스트: 후원 실패 케이스 (자기 자신, 없는 작가, 잔액 부족)
#[tokio::test]
async fn test_donate_rejections() {
    let app = TestApp::new();
    app.deposit(READER_ID, 10).await;

    let (status, _) = app
        .post("/api/wallet/donate", Some(READER_ID), json!({ "authorId": READER_ID, "amount": 5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/wallet/donate", Some(READER_ID), json!({ "authorId": 999, "amount": 5 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post("/api/wallet/donate", Some(READER_ID), json!({ "authorId": AUTHOR_ID, "amount": 11 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/wallet/donate",
            Some(READER_ID),
            json!({ "authorId": AUTHOR_ID, "amount": 1, "message": "x".repeat(501) }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, balance) = app.get("/api/wallet/balance", Some(READER_ID)).await;
    assert_eq!(balance["wallet"]["balance"], 10);

    let (_, stats) = app.get(&format!("/api/wallet/author-donations/{}", AUTHOR_ID), None).await;
    assert_eq!(stats["donationCount"], 0);
}

/// 테스트: 작가 후원 통계 (공개 API, 최신순 후원자)
#[tokio::test]
async fn test_author_donation_stats() {
    let app = TestApp::new();
    app.deposit(READER_ID, 100).await;
    app.deposit(SECOND_READER_ID, 100).await;

    for (donor, amount) in [(READER_ID, 10), (SECOND_READER_ID, 25), (READER_ID, 5)] {
        let (status, _) = app
            .post("/api/wallet/donate", Some(donor), json!({ "authorId": AUTHOR_ID, "amount": amount }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = app.get(&format!("/api/wallet/author-donations/{}", AUTHOR_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["authorId"], AUTHOR_ID);
    assert_eq!(stats["totalReceived"], 40);
    assert_eq!(stats["donationCount"], 3);

    let recent = stats["recentDonors"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["amount"], 5);
    assert_eq!(recent[0]["donor"]["displayName"], "reader");
    assert_eq!(recent[1]["donor"]["id"], SECOND_READER_ID);
    assert_eq!(recent[1]["donor"]["displayName"], "second@example.com");
}

/// 테스트: 관리자 지갑 점검
#[tokio::test]
async fn test_admin_wallet_audit() {
    let app = TestApp::new();
    app.deposit(READER_ID, 50).await;
    app.post("/api/wallet/pay", Some(READER_ID), json!({ "amount": 20 })).await;

    let uri = format!("/api/admin/wallets/{}/audit", READER_ID);

    let (status, _) = app.get(&uri, Some(READER_ID)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, audit) = app.get(&uri, Some(ADMIN_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audit["balance"], 30);
    assert_eq!(audit["ledgerTotal"], 30);
    assert_eq!(audit["entryCount"], 2);
    assert_eq!(audit["consistent"], true);

    let (_, missing) = app.get("/api/admin/wallets/999/audit", Some(ADMIN_ID)).await;
    assert!(missing["walletId"].is_null());
    assert_eq!(missing["consistent"], true);
}

/// 테스트: 헬스 체크
#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
