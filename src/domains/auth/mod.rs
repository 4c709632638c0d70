// Auth domain module
//
// 로그인/회원가입은 플랫폼 인증 서비스의 책임이며, 이 도메인은
// Access Token 검증과 사용자 조회만 제공한다.
pub mod services;
pub mod models;

pub use services::*;
pub use models::*;
