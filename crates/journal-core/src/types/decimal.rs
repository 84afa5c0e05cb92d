//! 금액 및 비율 계산을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격 타입 (원화 또는 달러 단가).
pub type Price = Decimal;

/// 금액 타입 (가격 × 수량).
pub type Amount = Decimal;

/// 백분율 타입 (20.0 = 20%).
pub type Percentage = Decimal;

/// 단가 × 수량 금액.
///
/// 표현 범위를 넘으면 `Decimal::MAX`/`Decimal::MIN`으로 포화됩니다.
pub fn amount_of(price: Price, quantity: u64) -> Amount {
    price.saturating_mul(Amount::from(quantity))
}

/// 0으로 나누기를 방지한 백분율 계산.
///
/// 분모가 0이면 0을 반환합니다. 결과가 표현 범위를 넘으면 부호에 맞춰 포화됩니다.
pub fn rate_pct(numerator: Decimal, denominator: Decimal) -> Percentage {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| saturated(numerator, denominator))
}

/// 0으로 나누기를 방지한 나눗셈.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .unwrap_or_else(|| saturated(numerator, denominator))
}

fn saturated(numerator: Decimal, denominator: Decimal) -> Decimal {
    if numerator.is_sign_negative() == denominator.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    }
}

/// Decimal 표시용 확장 트레이트.
pub trait DecimalExt {
    /// 백분율 문자열로 변환합니다 (예: 20 → "20.00%").
    fn to_percent_string(&self) -> String;

    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn to_percent_string(&self) -> String {
        format!("{:.2}%", self.round_half_up(2))
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_pct_zero_guard() {
        assert_eq!(rate_pct(dec!(20000), dec!(100000)), dec!(20));
        assert_eq!(rate_pct(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_rate_pct_saturates_instead_of_overflowing() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(rate_pct(dec!(1000000), tiny), Decimal::MAX);
        assert_eq!(rate_pct(dec!(-1000000), tiny), Decimal::MIN);
        assert_eq!(safe_div(Decimal::MAX, dec!(0.5)), Decimal::MAX);
    }

    #[test]
    fn test_amount_of_saturates() {
        assert_eq!(amount_of(dec!(12000), 10), dec!(120000));
        assert_eq!(amount_of(dec!(10000000000), u64::MAX), Decimal::MAX);
        assert_eq!(amount_of(dec!(-10000000000), u64::MAX), Decimal::MIN);
    }

    #[test]
    fn test_percent_string() {
        assert_eq!(dec!(2.5).to_percent_string(), "2.50%");
        assert_eq!(dec!(-66.6666).to_percent_string(), "-66.67%");
    }
}
