//! 매매 전 리스크 체크.

use anyhow::{Context, Result};
use journal_analytics::{risk_check, RiskChecklistInput};

use crate::output::{pct, to_json, DisplayOptions, OutputFormat};

pub fn risk(
    input: &RiskChecklistInput,
    format: OutputFormat,
    display: &DisplayOptions,
) -> Result<String> {
    let outcome = risk_check(input).context("Invalid risk checklist input")?;

    match format {
        OutputFormat::Json => to_json(&outcome),
        OutputFormat::Table => Ok(format!(
            "손절 시 손실: {}\n계좌 대비 리스크: {} (허용 {})\n결과: {}",
            display.amount(outcome.risk_amount),
            pct(outcome.risk_pct),
            pct(outcome.max_risk_pct),
            if outcome.passed { "통과" } else { "미통과" }
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_table() {
        let input = RiskChecklistInput {
            entry: dec!(50000),
            stop: dec!(48000),
            target: dec!(56000),
            quantity: 50,
            account_size: dec!(10000000),
            max_risk_pct: dec!(0.5),
        };
        let out = risk(&input, OutputFormat::Table, &DisplayOptions::default()).unwrap();
        assert!(out.contains("₩100,000"));
        assert!(out.contains("1.00%"));
        assert!(out.contains("미통과"));
    }
}
