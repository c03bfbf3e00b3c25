use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::report::{DEFAULT_DECIMALS, MAX_DECIMALS};
use crate::units::HeatingValueUnit;

/// 작업 디렉터리 기준 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 결과 표시 관련 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 소수 자릿수
    pub decimals: usize,
    /// 발열량 표시 단위
    pub heating_value_unit: HeatingValueUnit,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            heating_value_unit: HeatingValueUnit::MjPerKg,
        }
    }
}

impl DisplaySettings {
    /// 소수 자릿수를 [`MAX_DECIMALS`] 이하로 맞춘다.
    pub fn clamp_decimals(&mut self) {
        if self.decimals > MAX_DECIMALS {
            tracing::warn!(
                decimals = self.decimals,
                max = MAX_DECIMALS,
                "decimals out of range, clamped"
            );
            self.decimals = MAX_DECIMALS;
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySettings,
    /// `RUST_LOG`가 없을 때 쓰는 로그 필터
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplaySettings::default(),
            log_level: "info".to_string(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 읽는다. 파일이 없으면 기본값을 그 경로에 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&content)?;
        cfg.display.clamp_decimals();
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
