use crate::domains::wallet::models::{
    AuthorDonationStats, DepositRequest, DonateRequest, DonateResponse, PayRequest,
    TransactionHistoryQuery, TransactionHistoryResponse, WalletAudit, WalletBalanceResponse,
    WalletMutationResponse,
};
use crate::shared::services::AppState;
use crate::shared::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::shared::errors::WalletError;
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};

/// 잔액 조회 핸들러 (지갑이 없으면 생성)
/// Get balance handler
#[utoipa::path(
    get,
    path = "/api/wallet/balance",
    responses(
        (status = 200, description = "Wallet balance", body = WalletBalanceResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<WalletBalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .get_balance(authenticated_user.user_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletBalanceResponse { wallet }))
}

/// 거래 내역 조회 핸들러
/// Transaction history handler
#[utoipa::path(
    get,
    path = "/api/wallet/history",
    params(TransactionHistoryQuery),
    responses(
        (status = 200, description = "Recent ledger entries, newest first", body = TransactionHistoryResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn get_transaction_history(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<TransactionHistoryQuery>,
) -> Result<Json<TransactionHistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let transactions = app_state
        .wallet_state
        .wallet_service
        .get_transaction_history(authenticated_user.user_id, query.limit)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(TransactionHistoryResponse { transactions }))
}

/// 코인 충전 핸들러 (수동/테스트 충전)
/// Deposit handler
#[utoipa::path(
    post,
    path = "/api/wallet/deposit",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Deposit successful", body = WalletMutationResponse),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn deposit(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<DepositRequest>,
) -> Result<Json<WalletMutationResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .deposit(authenticated_user.user_id, request.amount, request.description)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletMutationResponse {
        wallet,
        message: "Deposit successful".to_string(),
    }))
}

/// 코인 사용 핸들러
/// Pay handler
#[utoipa::path(
    post,
    path = "/api/wallet/pay",
    request_body = PayRequest,
    responses(
        (status = 200, description = "Payment successful", body = WalletMutationResponse),
        (status = 400, description = "Invalid amount or insufficient balance"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn pay(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<PayRequest>,
) -> Result<Json<WalletMutationResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .pay(
            authenticated_user.user_id,
            request.amount,
            request.description,
            request.reference_id,
        )
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletMutationResponse {
        wallet,
        message: "Payment successful".to_string(),
    }))
}

/// 작가 후원 핸들러
/// Donate-to-author handler
#[utoipa::path(
    post,
    path = "/api/wallet/donate",
    request_body = DonateRequest,
    responses(
        (status = 200, description = "Donation successful", body = DonateResponse),
        (status = 400, description = "Invalid amount, self donation or insufficient balance"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn donate(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<DonateRequest>,
) -> Result<Json<DonateResponse>, (StatusCode, Json<serde_json::Value>)> {
    let receipt = app_state
        .wallet_state
        .wallet_service
        .donate_to_author(
            authenticated_user.user_id,
            request.author_id,
            request.amount,
            request.story_id,
            request.message,
        )
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(DonateResponse {
        donation: receipt.donation,
        balance: receipt.donor_balance,
        message: "Donation successful".to_string(),
    }))
}

/// 작가 후원 통계 핸들러 (공개)
/// Public author donation statistics handler
#[utoipa::path(
    get,
    path = "/api/wallet/author-donations/{author_id}",
    params(
        ("author_id" = u64, Path, description = "Author user ID")
    ),
    responses(
        (status = 200, description = "Donation statistics", body = AuthorDonationStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet"
)]
pub async fn get_author_donations(
    State(app_state): State<AppState>,
    Path(author_id): Path<u64>,
) -> Result<Json<AuthorDonationStats>, (StatusCode, Json<serde_json::Value>)> {
    let stats = app_state
        .wallet_state
        .wallet_service
        .get_author_donation_stats(author_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(stats))
}

/// 지갑 정합성 점검 핸들러 (관리자)
/// Wallet audit handler (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/wallets/{user_id}/audit",
    params(
        ("user_id" = u64, Path, description = "Wallet owner user ID")
    ),
    responses(
        (status = 200, description = "Balance versus ledger comparison", body = WalletAudit),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn audit_wallet(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<u64>,
) -> Result<Json<WalletAudit>, (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(admin_id = admin.user_id, user_id, "Wallet audit requested");

    let audit = app_state
        .wallet_state
        .wallet_service
        .audit_wallet(user_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(audit))
}
