use crate::shared::errors::AuthError;
use crate::domains::auth::models::{Claims, UserRole};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// JWT 서비스
/// JWT Service for access token issuance and verification
///
/// 로그인/세션 관리는 플랫폼의 인증 서비스가 담당하며,
/// 이 서비스는 같은 비밀키로 서명된 Access Token을 검증합니다.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Access Token 유효 시간 (시간)
    pub const ACCESS_TOKEN_HOURS: i64 = 1;

    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Access Token 발급 (운영 도구/테스트용)
    /// Generate Access Token
    pub fn generate_access_token(
        &self,
        user_id: u64,
        email: String,
        role: UserRole,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, email, role, Self::ACCESS_TOKEN_HOURS);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Access Token 검증 (만료/서명 오류는 모두 InvalidToken)
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_keeps_role() {
        let service = JwtService::new("test-secret");
        let token = service
            .generate_access_token(7, "author@example.com".to_string(), UserRole::Author)
            .unwrap();

        let claims = service.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, UserRole::Author);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a");
        let verifier = JwtService::new("secret-b");
        let token = issuer
            .generate_access_token(1, "a@example.com".to_string(), UserRole::Admin)
            .unwrap();

        assert!(matches!(verifier.verify_access_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new("test-secret");
        let mut claims = Claims::new(1, "a@example.com".to_string(), UserRole::Reader, 1);
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(matches!(service.verify_access_token(&token), Err(AuthError::InvalidToken)));
    }
}
