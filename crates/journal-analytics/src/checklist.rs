//! 투자 성향별 체크리스트 평가.
//!
//! 사용자가 켠 지표를 각각 고정 규칙으로 평가하고, 충족률이 성향별 기준 이상이면
//! 통과로 판정합니다. 데이터가 없는 지표는 분자와 분모 모두에서 제외됩니다.

use std::collections::BTreeMap;

use journal_core::{rate_pct, IndicatorKey, JournalError, JournalResult, Percentage, Personality};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 종목 하나에 대해 조회한 지표 값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorReadings {
    values: BTreeMap<IndicatorKey, Decimal>,
}

impl IndicatorReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: IndicatorKey, value: Decimal) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn set(&mut self, key: IndicatorKey, value: Decimal) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: IndicatorKey) -> Option<Decimal> {
        self.values.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `KEY=VALUE` 형식의 문자열을 파싱합니다 (예: `PBR=1.5`).
    pub fn parse_entry(entry: &str) -> JournalResult<(IndicatorKey, Decimal)> {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            JournalError::InvalidInput(format!("KEY=VALUE 형식이 아닙니다: {}", entry))
        })?;
        let key: IndicatorKey = key.trim().parse()?;
        let value: Decimal = value
            .trim()
            .parse()
            .map_err(|_| JournalError::InvalidInput(format!("숫자가 아닙니다: {}", value)))?;
        Ok((key, value))
    }
}

impl FromIterator<(IndicatorKey, Decimal)> for IndicatorReadings {
    fn from_iter<I: IntoIterator<Item = (IndicatorKey, Decimal)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// 지표별 평가 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    Pass,
    Fail,
    /// 데이터 없음
    Unavailable,
}

/// 지표 하나의 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorCheck {
    pub key: IndicatorKey,
    pub value: Option<Decimal>,
    pub criterion: String,
    pub status: IndicatorStatus,
}

/// 체크리스트 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistOutcome {
    /// 평가에 적용된 성향 (미설정이면 기본 성향)
    pub personality: Personality,
    pub checks: Vec<IndicatorCheck>,
    /// 충족한 지표 수
    pub passed: usize,
    /// 데이터가 있어 평가된 지표 수
    pub evaluated: usize,
    /// 충족률 (%)
    pub pass_rate: Percentage,
    /// 필요 충족률 (%)
    pub required_rate: Percentage,
    /// 최종 통과 여부
    pub passed_overall: bool,
}

impl ChecklistOutcome {
    /// 데이터가 없어 제외된 지표.
    pub fn unavailable(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.checks
            .iter()
            .filter(|c| c.status == IndicatorStatus::Unavailable)
            .map(|c| c.key)
    }
}

/// 켜진 지표들을 평가하고 성향별 기준으로 통과 여부를 판정합니다.
///
/// 같은 지표가 여러 번 주어지면 처음 것만 평가합니다.
/// 평가된 지표가 하나도 없으면 통과하지 않습니다.
pub fn evaluate_checklist(
    personality: Option<Personality>,
    enabled: &[IndicatorKey],
    readings: &IndicatorReadings,
) -> ChecklistOutcome {
    let personality = Personality::resolve(personality);
    let required_rate = personality.required_pass_rate();

    let mut checks: Vec<IndicatorCheck> = Vec::with_capacity(enabled.len());
    for &key in enabled {
        if checks.iter().any(|c| c.key == key) {
            continue;
        }

        let rule = key.rule();
        let value = readings.get(key);
        let status = match value {
            None => IndicatorStatus::Unavailable,
            Some(v) if rule.is_satisfied(v) => IndicatorStatus::Pass,
            Some(_) => IndicatorStatus::Fail,
        };

        checks.push(IndicatorCheck {
            key,
            value,
            criterion: rule.to_string(),
            status,
        });
    }

    let passed = checks
        .iter()
        .filter(|c| c.status == IndicatorStatus::Pass)
        .count();
    let evaluated = checks
        .iter()
        .filter(|c| c.status != IndicatorStatus::Unavailable)
        .count();
    let pass_rate = rate_pct(Decimal::from(passed), Decimal::from(evaluated));
    let passed_overall = evaluated > 0 && pass_rate >= required_rate;

    tracing::debug!(
        %personality,
        passed,
        evaluated,
        %pass_rate,
        passed_overall,
        "체크리스트 평가"
    );

    ChecklistOutcome {
        personality,
        checks,
        passed,
        evaluated,
        pass_rate,
        required_rate,
        passed_overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unavailable_excluded_from_rate() {
        let readings = IndicatorReadings::new()
            .with(IndicatorKey::Pbr, dec!(1.5))
            .with(IndicatorKey::Eps, dec!(-10));

        let outcome = evaluate_checklist(
            Some(Personality::Aggressive),
            &[IndicatorKey::Eps, IndicatorKey::Pbr, IndicatorKey::ForeignerRatio],
            &readings,
        );

        assert_eq!(outcome.evaluated, 2);
        assert_eq!(outcome.passed, 1);
        assert_eq!(outcome.pass_rate, dec!(50));
        assert!(outcome.passed_overall);
        assert_eq!(
            outcome.unavailable().collect::<Vec<_>>(),
            vec![IndicatorKey::ForeignerRatio]
        );
    }

    #[test]
    fn test_unset_personality_uses_moderate() {
        let readings = IndicatorReadings::new()
            .with(IndicatorKey::Per, dec!(12))
            .with(IndicatorKey::Pbr, dec!(1.1))
            .with(IndicatorKey::Eps, dec!(-1));

        let outcome = evaluate_checklist(
            None,
            &[IndicatorKey::Per, IndicatorKey::Pbr, IndicatorKey::Eps],
            &readings,
        );

        assert_eq!(outcome.personality, Personality::Moderate);
        assert_eq!(outcome.required_rate, dec!(70));
        assert!(!outcome.passed_overall);
    }

    #[test]
    fn test_nothing_evaluated_does_not_pass() {
        let outcome = evaluate_checklist(
            Some(Personality::Aggressive),
            &[IndicatorKey::W52HighRatio],
            &IndicatorReadings::new(),
        );
        assert_eq!(outcome.evaluated, 0);
        assert_eq!(outcome.pass_rate, Decimal::ZERO);
        assert!(!outcome.passed_overall);
    }

    #[test]
    fn test_duplicate_keys_evaluated_once() {
        let readings = IndicatorReadings::new().with(IndicatorKey::Bps, dec!(30000));
        let outcome = evaluate_checklist(
            Some(Personality::Conservative),
            &[IndicatorKey::Bps, IndicatorKey::Bps],
            &readings,
        );
        assert_eq!(outcome.checks.len(), 1);
        assert!(outcome.passed_overall);
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(
            IndicatorReadings::parse_entry("w52_high_ratio=0.85").unwrap(),
            (IndicatorKey::W52HighRatio, dec!(0.85))
        );
        assert!(IndicatorReadings::parse_entry("PBR").is_err());
        assert!(IndicatorReadings::parse_entry("PBR=abc").is_err());
        assert!(IndicatorReadings::parse_entry("ROE=3").is_err());
    }
}
