//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod indicators;
pub mod review;
pub mod risk;
pub mod trades;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// 날짜 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", s))
}
