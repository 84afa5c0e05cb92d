//! 투자 지표 정의.
//!
//! - `ValuationIndicator` - 가치/성장 분류에 쓰는 PER, PBR, EPS
//! - `IndicatorKey` - 체크리스트에서 사용자가 켜고 끌 수 있는 지표
//! - `Criterion` - "값 < 기준" 또는 "값 > 기준" 형태의 고정 규칙
//! - `IndicatorPreferences` - 사용자가 선택한 체크리스트 지표 목록

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::JournalError;

/// 비교 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// 값이 기준보다 작아야 충족
    LessThan,
    /// 값이 기준보다 커야 충족
    GreaterThan,
}

impl Comparison {
    /// 비교 연산을 수행합니다 (경계값은 미충족).
    pub fn holds(&self, value: Decimal, bound: Decimal) -> bool {
        match self {
            Comparison::LessThan => value < bound,
            Comparison::GreaterThan => value > bound,
        }
    }

    /// 연산자 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
        }
    }
}

/// 지표 하나에 대한 고정 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// 표시용 지표 이름 (예: "PER")
    pub label: &'static str,
    pub comparison: Comparison,
    pub bound: Decimal,
}

impl Criterion {
    pub const fn new(label: &'static str, comparison: Comparison, bound: Decimal) -> Self {
        Self {
            label,
            comparison,
            bound,
        }
    }

    /// 값이 규칙을 충족하는지 여부.
    pub fn is_satisfied(&self, value: Decimal) -> bool {
        self.comparison.holds(value, self.bound)
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.label,
            self.comparison.symbol(),
            self.bound.normalize()
        )
    }
}

/// 가치/성장 분류에 사용하는 밸류에이션 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValuationIndicator {
    /// 주가수익비율
    Per,
    /// 주가순자산비율
    Pbr,
    /// 주당순이익
    Eps,
}

impl ValuationIndicator {
    pub const ALL: [ValuationIndicator; 3] = [
        ValuationIndicator::Per,
        ValuationIndicator::Pbr,
        ValuationIndicator::Eps,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValuationIndicator::Per => "PER",
            ValuationIndicator::Pbr => "PBR",
            ValuationIndicator::Eps => "EPS",
        }
    }

    /// 좋은 방향. PER/PBR은 낮을수록, EPS는 높을수록 좋습니다.
    pub fn favorable(&self) -> Comparison {
        match self {
            ValuationIndicator::Per | ValuationIndicator::Pbr => Comparison::LessThan,
            ValuationIndicator::Eps => Comparison::GreaterThan,
        }
    }
}

impl std::fmt::Display for ValuationIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 체크리스트에서 선택 가능한 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorKey {
    /// PER (주가수익비율)
    Per,
    /// PBR (주가순자산비율)
    Pbr,
    /// EPS (주당순이익)
    Eps,
    /// 현재가 / 52주 최고가
    #[serde(rename = "W52_HIGH_RATIO")]
    W52HighRatio,
    /// BPS (주당순자산가치)
    Bps,
    /// 외국인 소진율 (%)
    ForeignerRatio,
}

/// 항상 포함되는 필수 지표.
pub const MANDATORY_INDICATORS: [IndicatorKey; 2] = [IndicatorKey::Eps, IndicatorKey::Pbr];

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 6] = [
        IndicatorKey::Per,
        IndicatorKey::Pbr,
        IndicatorKey::Eps,
        IndicatorKey::W52HighRatio,
        IndicatorKey::Bps,
        IndicatorKey::ForeignerRatio,
    ];

    /// 직렬화 키 (예: "W52_HIGH_RATIO").
    pub fn code(&self) -> &'static str {
        match self {
            IndicatorKey::Per => "PER",
            IndicatorKey::Pbr => "PBR",
            IndicatorKey::Eps => "EPS",
            IndicatorKey::W52HighRatio => "W52_HIGH_RATIO",
            IndicatorKey::Bps => "BPS",
            IndicatorKey::ForeignerRatio => "FOREIGNER_RATIO",
        }
    }

    /// 화면 표시용 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            IndicatorKey::Per => "PER (주가수익비율)",
            IndicatorKey::Pbr => "PBR (주가순자산비율)",
            IndicatorKey::Eps => "EPS (주당순이익)",
            IndicatorKey::W52HighRatio => "52주 최고가 대비 하락률",
            IndicatorKey::Bps => "BPS (주당순자산가치)",
            IndicatorKey::ForeignerRatio => "외국인 소진율 (%)",
        }
    }

    /// 체크리스트 규칙. 성향과 무관하게 고정입니다.
    pub fn rule(&self) -> Criterion {
        match self {
            IndicatorKey::Per => Criterion::new("PER", Comparison::LessThan, dec!(20)),
            IndicatorKey::Pbr => Criterion::new("PBR", Comparison::LessThan, dec!(2)),
            IndicatorKey::Eps => Criterion::new("EPS", Comparison::GreaterThan, dec!(0)),
            IndicatorKey::W52HighRatio => {
                Criterion::new("W52_HIGH_RATIO", Comparison::LessThan, dec!(0.9))
            }
            IndicatorKey::Bps => Criterion::new("BPS", Comparison::GreaterThan, dec!(0)),
            IndicatorKey::ForeignerRatio => {
                Criterion::new("FOREIGNER_RATIO", Comparison::GreaterThan, dec!(10))
            }
        }
    }

    pub fn is_mandatory(&self) -> bool {
        MANDATORY_INDICATORS.contains(self)
    }
}

impl std::str::FromStr for IndicatorKey {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        IndicatorKey::ALL
            .into_iter()
            .find(|key| key.code() == upper)
            .ok_or_else(|| JournalError::InvalidInput(format!("알 수 없는 지표: {}", s)))
    }
}

impl std::fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 사용자가 선택한 체크리스트 지표.
///
/// 필수 지표가 항상 앞에 포함되며 중복은 제거됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<IndicatorKey>", into = "Vec<IndicatorKey>")]
pub struct IndicatorPreferences {
    keys: Vec<IndicatorKey>,
}

impl IndicatorPreferences {
    /// 필수 지표와 선택 지표를 합쳐 생성합니다.
    pub fn new(selected: impl IntoIterator<Item = IndicatorKey>) -> Self {
        let mut keys: Vec<IndicatorKey> = Vec::with_capacity(IndicatorKey::ALL.len());
        for key in MANDATORY_INDICATORS.into_iter().chain(selected) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self { keys }
    }

    pub fn keys(&self) -> &[IndicatorKey] {
        &self.keys
    }

    pub fn contains(&self, key: IndicatorKey) -> bool {
        self.keys.contains(&key)
    }
}

impl Default for IndicatorPreferences {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl From<Vec<IndicatorKey>> for IndicatorPreferences {
    fn from(keys: Vec<IndicatorKey>) -> Self {
        Self::new(keys)
    }
}

impl From<IndicatorPreferences> for Vec<IndicatorKey> {
    fn from(prefs: IndicatorPreferences) -> Self {
        prefs.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_display_and_strictness() {
        let rule = IndicatorKey::Pbr.rule();
        assert_eq!(rule.to_string(), "PBR < 2");
        assert!(rule.is_satisfied(dec!(1.99)));
        assert!(!rule.is_satisfied(dec!(2)));

        assert_eq!(IndicatorKey::W52HighRatio.rule().to_string(), "W52_HIGH_RATIO < 0.9");
    }

    #[test]
    fn test_preferences_always_include_mandatory() {
        let prefs = IndicatorPreferences::new([IndicatorKey::Per, IndicatorKey::Pbr]);
        assert_eq!(
            prefs.keys(),
            &[IndicatorKey::Eps, IndicatorKey::Pbr, IndicatorKey::Per]
        );

        let empty = IndicatorPreferences::default();
        assert_eq!(empty.keys(), &MANDATORY_INDICATORS);
    }

    #[test]
    fn test_indicator_key_parse() {
        assert_eq!("w52_high_ratio".parse::<IndicatorKey>().unwrap(), IndicatorKey::W52HighRatio);
        assert_eq!("PER".parse::<IndicatorKey>().unwrap(), IndicatorKey::Per);
        assert!("ROE".parse::<IndicatorKey>().is_err());
    }

    #[test]
    fn test_preferences_serde() {
        let prefs: IndicatorPreferences =
            serde_json::from_str(r#"["FOREIGNER_RATIO","EPS"]"#).unwrap();
        assert_eq!(
            prefs.keys(),
            &[IndicatorKey::Eps, IndicatorKey::Pbr, IndicatorKey::ForeignerRatio]
        );
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"["EPS","PBR","FOREIGNER_RATIO"]"#);
    }
}
