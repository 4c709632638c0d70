// Novel platform coin API
// 웹소설 플랫폼 코인 지갑/원장 및 코인 패키지 API
pub mod domains;
pub mod routes;
pub mod shared;
