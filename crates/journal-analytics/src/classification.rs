//! 가치주/성장주 기준 지표 분류.
//!
//! PER, PBR, EPS 세 지표를 두 가지 고정 기준(가치주, 성장주)으로 각각 평가합니다.
//! 기준값은 [`IndicatorCategory::criterion`] 한 곳에만 정의됩니다.

use journal_core::{Criterion, Fundamentals, ValuationIndicator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 지표 분류 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    /// 가치주 기준 (엄격)
    Value,
    /// 성장주 기준 (완화)
    Growth,
}

impl IndicatorCategory {
    pub const ALL: [IndicatorCategory; 2] = [IndicatorCategory::Value, IndicatorCategory::Growth];

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorCategory::Value => "가치주",
            IndicatorCategory::Growth => "성장주",
        }
    }

    /// 분류 기준표.
    pub fn criterion(&self, indicator: ValuationIndicator) -> Criterion {
        let bound = match (self, indicator) {
            (IndicatorCategory::Value, ValuationIndicator::Per) => dec!(10),
            (IndicatorCategory::Value, ValuationIndicator::Pbr) => dec!(1),
            (IndicatorCategory::Value, ValuationIndicator::Eps) => dec!(2000),
            (IndicatorCategory::Growth, ValuationIndicator::Per) => dec!(30),
            (IndicatorCategory::Growth, ValuationIndicator::Pbr) => dec!(3),
            (IndicatorCategory::Growth, ValuationIndicator::Eps) => dec!(1000),
        };
        Criterion::new(indicator.label(), indicator.favorable(), bound)
    }
}

impl std::fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// 지표 하나를 기준 하나로 평가한 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorClassification {
    pub indicator: ValuationIndicator,
    pub value: Decimal,
    pub category: IndicatorCategory,
    pub verdict: Verdict,
    /// 표시용 기준 (예: "PER < 10")
    pub criterion: String,
}

/// PER/PBR/EPS를 가치주, 성장주 기준으로 분류합니다.
///
/// 항상 6개 항목을 반환합니다 (가치주 3개 → 성장주 3개, 각각 PER, PBR, EPS 순).
/// 0이나 음수도 비교 연산 그대로 평가합니다.
pub fn classify_indicators(fundamentals: &Fundamentals) -> Vec<IndicatorClassification> {
    IndicatorCategory::ALL
        .into_iter()
        .flat_map(|category| {
            ValuationIndicator::ALL.into_iter().map(move |indicator| {
                let criterion = category.criterion(indicator);
                let value = fundamentals.value(indicator);
                IndicatorClassification {
                    indicator,
                    value,
                    category,
                    verdict: Verdict::from_bool(criterion.is_satisfied(value)),
                    criterion: criterion.to_string(),
                }
            })
        })
        .collect()
}
