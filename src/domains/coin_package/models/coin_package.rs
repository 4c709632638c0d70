use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use chrono::{DateTime, Utc};

/// 코인 패키지 (관리자가 정의하는 판매 상품)
/// Coin package offered for purchase
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CoinPackage)]
pub struct CoinPackage {
    pub id: u64,

    #[schema(example = "Starter pack")]
    pub name: String,

    /// 지급 코인 수
    #[schema(example = 100)]
    pub coin_amount: i64,

    /// 가격 (최소 화폐 단위)
    /// Price in the smallest currency unit
    #[schema(example = 20000)]
    pub price: i64,

    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 패키지 생성 요청
/// Create coin package request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CreateCoinPackageRequest)]
pub struct CreateCoinPackageRequest {
    #[schema(example = "Starter pack")]
    pub name: String,
    #[schema(example = 100)]
    pub coin_amount: i64,
    #[schema(example = 20000)]
    pub price: i64,
    pub description: Option<String>,
    /// 기본값 true
    pub is_active: Option<bool>,
}

/// 패키지 수정 요청 (부분 수정)
/// Partial update request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = UpdateCoinPackageRequest)]
pub struct UpdateCoinPackageRequest {
    pub name: Option<String>,
    pub coin_amount: Option<i64>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// 검증된 생성 데이터
/// Validated data for a new package
#[derive(Debug, Clone)]
pub struct NewCoinPackage {
    pub name: String,
    pub coin_amount: i64,
    pub price: i64,
    pub description: Option<String>,
    pub is_active: bool,
}

/// 검증된 수정 데이터 (None = 변경 없음)
/// Validated patch; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct CoinPackagePatch {
    pub name: Option<String>,
    pub coin_amount: Option<i64>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl CoinPackagePatch {
    /// 기존 패키지에 패치 적용
    pub fn apply_to(&self, package: &mut CoinPackage) {
        if let Some(name) = &self.name {
            package.name = name.clone();
        }
        if let Some(coin_amount) = self.coin_amount {
            package.coin_amount = coin_amount;
        }
        if let Some(price) = self.price {
            package.price = price;
        }
        if let Some(description) = &self.description {
            package.description = Some(description.clone());
        }
        if let Some(is_active) = self.is_active {
            package.is_active = is_active;
        }
    }
}

/// 패키지 목록 조회 쿼리
/// List query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CoinPackageListQuery {
    /// 비활성 패키지 포함 여부 (기본 false)
    pub include_inactive: Option<bool>,
}

/// 단일 패키지 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CoinPackageResponse)]
pub struct CoinPackageResponse {
    pub package: CoinPackage,
}

/// 패키지 목록 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CoinPackagesResponse)]
pub struct CoinPackagesResponse {
    pub packages: Vec<CoinPackage>,
}

/// 패키지 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = DeleteCoinPackageResponse)]
pub struct DeleteCoinPackageResponse {
    pub id: u64,
    pub message: String,
}
