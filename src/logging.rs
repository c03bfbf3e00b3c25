//! tracing 기반 로그 초기화.

use tracing_subscriber::{fmt, EnvFilter};

/// 로그 시스템을 초기화한다.
///
/// `RUST_LOG`가 있으면 그것을, 없으면 `default_filter`(설정의 `log_level`)를 쓴다.
/// 로그는 stderr로 보내 CLI 결과 출력과 섞이지 않게 한다.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 이미 설치된 구독자가 있으면 그대로 둔다
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 테스트용 로그 초기화. 테스트 출력 캡처를 사용한다.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
