use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use novel_coin_api::routes::create_router;
use novel_coin_api::shared::config::AppConfig;
use novel_coin_api::shared::database::Database;
use novel_coin_api::shared::services::AppState;
use novel_coin_api::shared::telemetry::init_tracing;

// Import models for OpenAPI schema
use novel_coin_api::domains::auth::models::UserRole;
use novel_coin_api::domains::wallet::models::*;
use novel_coin_api::domains::coin_package::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        novel_coin_api::domains::wallet::handlers::wallet_handler::get_balance,
        novel_coin_api::domains::wallet::handlers::wallet_handler::get_transaction_history,
        novel_coin_api::domains::wallet::handlers::wallet_handler::deposit,
        novel_coin_api::domains::wallet::handlers::wallet_handler::pay,
        novel_coin_api::domains::wallet::handlers::wallet_handler::donate,
        novel_coin_api::domains::wallet::handlers::wallet_handler::get_author_donations,
        novel_coin_api::domains::wallet::handlers::wallet_handler::audit_wallet,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::list_active_packages,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::list_packages,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::create_package,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::get_package,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::update_package,
        novel_coin_api::domains::coin_package::handlers::coin_package_handler::delete_package
    ),
    components(schemas(
        UserRole,
        CoinWallet,
        CoinTransaction,
        CoinTransactionType,
        WalletBalanceResponse,
        TransactionHistoryResponse,
        DepositRequest,
        PayRequest,
        WalletMutationResponse,
        DonateRequest,
        DonateResponse,
        AuthorDonation,
        DonorSummary,
        RecentDonation,
        AuthorDonationStats,
        WalletAudit,
        CoinPackage,
        CreateCoinPackageRequest,
        UpdateCoinPackageRequest,
        CoinPackageResponse,
        CoinPackagesResponse,
        DeleteCoinPackageResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Wallet", description = "Coin wallet, ledger and author donation endpoints"),
        (name = "Admin", description = "Coin package catalog and wallet audit (admin role)")
    ),
    info(
        title = "Novel Coin API",
        description = "Coin wallet and coin package API for the web-novel platform",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    // DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db, &config);

    // CORS 설정
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .context("CORS_ORIGIN is not a valid header value")?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/swagger")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "Server running");
    tracing::info!("Swagger UI available at /swagger");

    // 서버 실행
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
