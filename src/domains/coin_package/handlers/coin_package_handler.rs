use crate::domains::coin_package::models::{
    CoinPackageListQuery, CoinPackageResponse, CoinPackagesResponse, CreateCoinPackageRequest,
    DeleteCoinPackageResponse, UpdateCoinPackageRequest,
};
use crate::shared::services::AppState;
use crate::shared::middleware::auth::AdminUser;
use crate::shared::errors::CoinPackageError;
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};

/// 판매 중인 패키지 목록 (공개)
/// Public list of active coin packages
#[utoipa::path(
    get,
    path = "/api/wallet/packages",
    responses(
        (status = 200, description = "Active packages ordered by price", body = CoinPackagesResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet"
)]
pub async fn list_active_packages(
    State(app_state): State<AppState>,
) -> Result<Json<CoinPackagesResponse>, (StatusCode, Json<serde_json::Value>)> {
    let packages = app_state
        .coin_package_state
        .coin_package_service
        .find_all(false)
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CoinPackagesResponse { packages }))
}

/// 패키지 목록 (관리자)
/// Admin package list
#[utoipa::path(
    get,
    path = "/api/admin/coin-packages",
    params(CoinPackageListQuery),
    responses(
        (status = 200, description = "Packages ordered by price", body = CoinPackagesResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn list_packages(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<CoinPackageListQuery>,
) -> Result<Json<CoinPackagesResponse>, (StatusCode, Json<serde_json::Value>)> {
    let packages = app_state
        .coin_package_state
        .coin_package_service
        .find_all(query.include_inactive.unwrap_or(false))
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CoinPackagesResponse { packages }))
}

/// 패키지 생성 (관리자)
/// Create package
#[utoipa::path(
    post,
    path = "/api/admin/coin-packages",
    request_body = CreateCoinPackageRequest,
    responses(
        (status = 201, description = "Package created", body = CoinPackageResponse),
        (status = 400, description = "Invalid package fields"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn create_package(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateCoinPackageRequest>,
) -> Result<(StatusCode, Json<CoinPackageResponse>), (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(admin_id = admin.user_id, "Creating coin package");

    let package = app_state
        .coin_package_state
        .coin_package_service
        .create(request)
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((StatusCode::CREATED, Json(CoinPackageResponse { package })))
}

/// 패키지 단건 조회 (관리자)
#[utoipa::path(
    get,
    path = "/api/admin/coin-packages/{id}",
    params(
        ("id" = u64, Path, description = "Coin package ID")
    ),
    responses(
        (status = 200, description = "Package", body = CoinPackageResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Package not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn get_package(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<u64>,
) -> Result<Json<CoinPackageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let package = app_state
        .coin_package_state
        .coin_package_service
        .find_one(id)
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CoinPackageResponse { package }))
}

/// 패키지 부분 수정 (관리자)
/// Update package
#[utoipa::path(
    patch,
    path = "/api/admin/coin-packages/{id}",
    params(
        ("id" = u64, Path, description = "Coin package ID")
    ),
    request_body = UpdateCoinPackageRequest,
    responses(
        (status = 200, description = "Package updated", body = CoinPackageResponse),
        (status = 400, description = "Invalid package fields"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Package not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn update_package(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<u64>,
    Json(request): Json<UpdateCoinPackageRequest>,
) -> Result<Json<CoinPackageResponse>, (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(admin_id = admin.user_id, package_id = id, "Updating coin package");

    let package = app_state
        .coin_package_state
        .coin_package_service
        .update(id, request)
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CoinPackageResponse { package }))
}

/// 패키지 삭제 (관리자)
/// Delete package
#[utoipa::path(
    delete,
    path = "/api/admin/coin-packages/{id}",
    params(
        ("id" = u64, Path, description = "Coin package ID")
    ),
    responses(
        (status = 200, description = "Package deleted", body = DeleteCoinPackageResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Package not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(("BearerAuth" = []))
)]
pub async fn delete_package(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<u64>,
) -> Result<Json<DeleteCoinPackageResponse>, (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(admin_id = admin.user_id, package_id = id, "Deleting coin package");

    app_state
        .coin_package_state
        .coin_package_service
        .remove(id)
        .await
        .map_err(|e: CoinPackageError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(DeleteCoinPackageResponse {
        id,
        message: "Coin package deleted".to_string(),
    }))
}
