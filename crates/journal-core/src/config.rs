//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → `TRADELOG__` 환경 변수 순으로 덮어씁니다.
//!
//! ```toml
//! [journal]
//! store_path = "data/trade_logs.json"
//! personality = "moderate"
//! indicators = ["PER", "W52_HIGH_RATIO"]
//!
//! [display]
//! currency = "USD"
//! exchange_rate = "1350"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{IndicatorPreferences, Personality};
use crate::error::JournalResult;
use crate::logging::LogConfig;
use crate::types::Currency;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사 (예: `TRADELOG__JOURNAL__STORE_PATH`).
pub const ENV_PREFIX: &str = "TRADELOG";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LogConfig,
    /// 매매일지 설정
    #[serde(default)]
    pub journal: JournalConfig,
    /// 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
    /// 재무 데이터 설정
    #[serde(default)]
    pub fundamentals: FundamentalsConfig,
}

/// 매매일지 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JournalConfig {
    /// 매매 기록 JSON 파일 경로
    pub store_path: PathBuf,
    /// 투자 성향 (없으면 중립형으로 평가)
    pub personality: Option<Personality>,
    /// 체크리스트 지표 (필수 지표는 자동 포함)
    pub indicators: IndicatorPreferences,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/trade_logs.json"),
            personality: None,
            indicators: IndicatorPreferences::default(),
        }
    }
}

/// 표시 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// 표시 통화
    #[serde(default)]
    pub currency: Currency,
    /// 원/달러 환율
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
}

/// 재무 데이터 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FundamentalsConfig {
    /// 스냅샷 JSON 파일 경로
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// 조회 결과 캐시 TTL (초)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    300
}

impl Default for FundamentalsConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> JournalResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> JournalResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IndicatorKey;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_load_default_reads_default_path() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config, AppConfig::load(DEFAULT_CONFIG_PATH).unwrap());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.journal.store_path, PathBuf::from("data/trade_logs.json"));
        assert_eq!(config.display.currency, Currency::Krw);
        assert_eq!(config.fundamentals.cache_ttl_secs, 300);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[journal]
store_path = "/tmp/logs.json"
personality = "aggressive"
indicators = ["PER", "W52_HIGH_RATIO"]

[display]
currency = "USD"
exchange_rate = "1350.5"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.journal.personality, Some(Personality::Aggressive));
        assert!(config.journal.indicators.contains(IndicatorKey::W52HighRatio));
        assert!(config.journal.indicators.contains(IndicatorKey::Eps));
        assert_eq!(config.display.currency, Currency::Usd);
        assert_eq!(config.display.exchange_rate, Some(dec!(1350.5)));
        assert_eq!(config.logging.level, "debug");
    }
}
