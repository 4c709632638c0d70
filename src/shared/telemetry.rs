use anyhow::{anyhow, Result};
use crate::shared::config::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// tracing 구독자 초기화
/// Initialize the global tracing subscriber
///
/// RUST_LOG가 없으면 기본 필터 사용 (info, sqlx 쿼리 로그는 warn).
/// 이미 전역 구독자가 설정되어 있으면 에러를 반환합니다.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info"));

    let builder = fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        // 첫 호출 결과와 무관하게 두 번째 호출은 항상 실패해야 함
        let _ = init_tracing(LogFormat::Pretty);
        assert!(init_tracing(LogFormat::Json).is_err());
    }
}
