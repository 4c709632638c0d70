use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use crate::domains::auth::models::UserRole;
use crate::shared::errors::AuthError;
use crate::shared::services::AppState;

/// 인증된 사용자 정보 (JWT 토큰에서 추출)
/// Authenticated principal extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub email: String,
    pub role: UserRole,
}

/// AuthenticatedUser를 Axum Extractor로 구현
///
/// 사용법:
/// ```ignore
/// pub async fn get_balance(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,
/// ) -> Result<...> {
///     let user_id = authenticated_user.user_id;
///     // ...
/// }
/// ```
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthorizationFormat)?;

        // 3. JWT 검증
        let claims = state.auth_state.jwt_service.verify_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// 관리자 전용 Extractor (role = admin)
/// Admin-only principal
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            tracing::warn!(user_id = user.user_id, "Non-admin user attempted admin route");
            return Err(AuthError::Forbidden.into());
        }

        Ok(AdminUser(user))
    }
}
