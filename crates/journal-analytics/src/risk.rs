//! 매매 전 리스크 체크리스트.
//!
//! 진입가와 손절가 차이로 계좌 대비 손실 위험(%)을 계산해
//! 허용 한도 이내인지 확인합니다.

use journal_core::{amount_of, rate_pct, JournalResult, Percentage, Price};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 기본 허용 리스크 (%).
pub const DEFAULT_MAX_RISK_PCT: Decimal = Decimal::ONE;

// ==================== 커스텀 검증 함수 ====================

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("not_positive")
            .with_message("0보다 커야 합니다".into()));
    }
    Ok(())
}

/// 허용 리스크 검증 (0.1 ~ 5%)
fn validate_max_risk_pct(value: &Decimal) -> Result<(), ValidationError> {
    if *value < dec!(0.1) {
        return Err(ValidationError::new("max_risk_too_small")
            .with_message("허용 리스크는 최소 0.1% 이상이어야 합니다".into()));
    }
    if *value > dec!(5) {
        return Err(ValidationError::new("max_risk_too_large")
            .with_message("허용 리스크는 5%를 초과할 수 없습니다".into()));
    }
    Ok(())
}

fn default_max_risk_pct() -> Decimal {
    DEFAULT_MAX_RISK_PCT
}

/// 리스크 체크 입력.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskChecklistInput {
    /// 진입가
    #[validate(custom(function = "validate_positive"))]
    pub entry: Price,
    /// 손절가
    #[validate(custom(function = "validate_positive"))]
    pub stop: Price,
    /// 목표가
    #[validate(custom(function = "validate_positive"))]
    pub target: Price,
    /// 수량
    #[validate(range(min = 1, message = "수량은 1 이상이어야 합니다"))]
    pub quantity: u64,
    /// 계좌 규모
    #[validate(custom(function = "validate_positive"))]
    pub account_size: Decimal,
    /// 허용 리스크 (%)
    #[serde(default = "default_max_risk_pct")]
    #[validate(custom(function = "validate_max_risk_pct"))]
    pub max_risk_pct: Percentage,
}

/// 리스크 체크 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCheckOutcome {
    /// 손절 시 손실 금액
    pub risk_amount: Decimal,
    /// 계좌 대비 손실 위험 (%)
    pub risk_pct: Percentage,
    pub max_risk_pct: Percentage,
    pub passed: bool,
}

/// 입력을 검증한 뒤 리스크를 계산합니다.
///
/// 리스크(%) = |진입가 - 손절가| × 수량 ÷ 계좌 규모 × 100.
/// 한도 이하이고 목표가가 있으면 통과입니다.
pub fn risk_check(input: &RiskChecklistInput) -> JournalResult<RiskCheckOutcome> {
    input.validate()?;

    let risk_amount = amount_of((input.entry - input.stop).abs(), input.quantity);
    let risk_pct = rate_pct(risk_amount, input.account_size);
    let passed = risk_pct <= input.max_risk_pct && input.target > Decimal::ZERO;

    tracing::debug!(%risk_pct, max = %input.max_risk_pct, passed, "리스크 체크");

    Ok(RiskCheckOutcome {
        risk_amount,
        risk_pct,
        max_risk_pct: input.max_risk_pct,
        passed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::JournalError;

    fn input(entry: Decimal, stop: Decimal, qty: u64, acct: Decimal) -> RiskChecklistInput {
        RiskChecklistInput {
            entry,
            stop,
            target: dec!(60000),
            quantity: qty,
            account_size: acct,
            max_risk_pct: DEFAULT_MAX_RISK_PCT,
        }
    }

    #[test]
    fn test_within_limit() {
        let outcome = risk_check(&input(dec!(50000), dec!(48000), 5, dec!(10000000))).unwrap();
        assert_eq!(outcome.risk_amount, dec!(10000));
        assert_eq!(outcome.risk_pct, dec!(0.1));
        assert!(outcome.passed);
    }

    #[test]
    fn test_exact_limit_passes() {
        let outcome = risk_check(&input(dec!(50000), dec!(48000), 50, dec!(10000000))).unwrap();
        assert_eq!(outcome.risk_pct, dec!(1));
        assert!(outcome.passed);
    }

    #[test]
    fn test_stop_above_entry_uses_distance() {
        let outcome = risk_check(&input(dec!(48000), dec!(50000), 100, dec!(10000000))).unwrap();
        assert_eq!(outcome.risk_pct, dec!(2));
        assert!(!outcome.passed);
    }

    #[test]
    fn test_huge_position_saturates_and_fails() {
        let huge = input(dec!(10000000000), dec!(1), u64::MAX, dec!(0.0001));
        let outcome = risk_check(&huge).unwrap();
        assert_eq!(outcome.risk_amount, Decimal::MAX);
        assert_eq!(outcome.risk_pct, Decimal::MAX);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut bad = input(dec!(50000), dec!(48000), 5, dec!(10000000));
        bad.max_risk_pct = dec!(7);
        assert!(matches!(risk_check(&bad), Err(JournalError::Validation(_))));

        let bad = input(dec!(50000), dec!(48000), 0, dec!(10000000));
        assert!(risk_check(&bad).is_err());

        let bad = input(dec!(50000), dec!(48000), 5, Decimal::ZERO);
        assert!(risk_check(&bad).is_err());
    }

    #[test]
    fn test_deserialize_default_max_risk() {
        let parsed: RiskChecklistInput = serde_json::from_str(
            r#"{"entry":"100","stop":"95","target":"120","quantity":10,"accountSize":"100000"}"#,
        )
        .unwrap();
        assert_eq!(parsed.max_risk_pct, DEFAULT_MAX_RISK_PCT);
    }
}
