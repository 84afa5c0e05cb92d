//! 표시 통화 및 금액 포맷팅.
//!
//! 매매 기록은 원화로 저장되며, 달러 표시는 환율(원/달러)로 나누어 변환합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::decimal::DecimalExt;
use crate::error::JournalError;

/// 표시 통화.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// 원화 (소수점 없음)
    #[default]
    Krw,
    /// 미국 달러 (소수점 2자리)
    Usd,
}

impl Currency {
    /// 통화 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Krw => "₩",
            Currency::Usd => "$",
        }
    }

    /// 표시 소수점 자릿수.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::Krw => 0,
            Currency::Usd => 2,
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KRW" => Ok(Self::Krw),
            "USD" => Ok(Self::Usd),
            _ => Err(JournalError::InvalidInput(format!(
                "지원하지 않는 통화: {} (KRW, USD)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Krw => write!(f, "KRW"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// 원화 금액을 표시 통화로 포맷팅합니다.
///
/// `exchange_rate`는 1달러당 원화 금액입니다. 달러 표시인데 환율이 없거나
/// 0이면 변환 없이 원래 금액을 그대로 표시합니다.
pub fn format_amount(
    amount_krw: Decimal,
    currency: Currency,
    exchange_rate: Option<Decimal>,
) -> String {
    let value = match (currency, exchange_rate) {
        (Currency::Usd, Some(rate)) if !rate.is_zero() => amount_krw / rate,
        _ => amount_krw,
    };

    let dp = currency.decimal_places();
    let rounded = value.round_half_up(dp);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, currency.symbol(), grouped, frac),
        None => format!("{}{}{}", sign, currency.symbol(), grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_krw() {
        assert_eq!(format_amount(dec!(120000), Currency::Krw, None), "₩120,000");
        assert_eq!(format_amount(dec!(-3000), Currency::Krw, None), "-₩3,000");
        assert_eq!(format_amount(dec!(999.6), Currency::Krw, None), "₩1,000");
        assert_eq!(format_amount(Decimal::ZERO, Currency::Krw, None), "₩0");
    }

    #[test]
    fn test_format_usd_with_rate() {
        assert_eq!(
            format_amount(dec!(1350000), Currency::Usd, Some(dec!(1350))),
            "$1,000.00"
        );
        assert_eq!(format_amount(dec!(100), Currency::Usd, Some(dec!(3))), "$33.33");
    }

    #[test]
    fn test_format_usd_without_rate() {
        assert_eq!(format_amount(dec!(1234.5), Currency::Usd, None), "$1,234.50");
        assert_eq!(format_amount(dec!(10), Currency::Usd, Some(Decimal::ZERO)), "$10.00");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("eur".parse::<Currency>().is_err());
    }

    proptest! {
        #[test]
        fn krw_grouping_preserves_value(won in -10_000_000_000i64..10_000_000_000i64) {
            let formatted = format_amount(Decimal::from(won), Currency::Krw, None);
            let digits: String = formatted
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            prop_assert_eq!(digits.parse::<i64>().unwrap(), won);
        }
    }
}
