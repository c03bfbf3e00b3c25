use std::process::ExitCode;

use clap::Parser;
use fuel_composition_toolbox::{app, config, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = app::Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: app::Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    logging::init(&cfg.log_level);
    tracing::debug!(?cfg, "configuration ready");
    app::run(cli, &mut cfg)
}
