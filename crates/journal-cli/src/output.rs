//! 출력 형식과 표시 옵션.

use anyhow::{Context, Result};
use journal_core::{format_amount, Currency, DecimalExt, DisplayConfig};
use rust_decimal::Decimal;
use serde::Serialize;

/// 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

/// 금액 표시 옵션.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency: Currency,
    pub exchange_rate: Option<Decimal>,
}

impl DisplayOptions {
    pub fn amount(&self, amount_krw: Decimal) -> String {
        format_amount(amount_krw, self.currency, self.exchange_rate)
    }
}

impl From<&DisplayConfig> for DisplayOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            currency: config.currency,
            exchange_rate: config.exchange_rate,
        }
    }
}

/// JSON 형식 출력.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

/// 백분율 표시 (소수 둘째 자리).
pub fn pct(value: Decimal) -> String {
    value.to_percent_string()
}

/// 문자열 자르기 (UTF-8 안전).
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
