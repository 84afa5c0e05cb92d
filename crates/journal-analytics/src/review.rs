//! 개인 선호 기준에 따른 매매 복기.

use journal_core::{DecimalExt, Fundamentals, PreferenceValues, ValuationIndicator};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzedTrade;

/// 선호 기준 비교 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Satisfied,
    Unsatisfied,
    /// 값이나 기준이 0 이하라 비교하지 않음
    NotApplicable,
}

/// 지표 하나의 비교 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceCheck {
    pub indicator: ValuationIndicator,
    pub value: Decimal,
    pub preference: Decimal,
    pub status: ReviewStatus,
}

impl PreferenceCheck {
    /// 표시용 기준 (예: "PER < 15").
    pub fn criterion(&self) -> String {
        format!(
            "{} {} {}",
            self.indicator,
            self.indicator.favorable().symbol(),
            self.preference.normalize()
        )
    }

    /// 한 줄 코멘트. 비교하지 않은 지표는 `None`입니다.
    pub fn comment(&self) -> Option<String> {
        let value = self.value.round_half_up(2);
        match self.status {
            ReviewStatus::Satisfied => Some(format!(
                "특히 {}은(는) {:.2}로, 선호 기준({})을 충족하여 긍정적이었습니다.",
                self.indicator,
                value,
                self.criterion()
            )),
            ReviewStatus::Unsatisfied => Some(format!(
                "반면, {}은(는) {:.2}로, 선호 기준({})을 벗어났습니다.",
                self.indicator,
                value,
                self.criterion()
            )),
            ReviewStatus::NotApplicable => None,
        }
    }
}

/// 매매 복기 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReview {
    pub trade_id: String,
    pub symbol: String,
    pub is_profit: bool,
    pub checks: Vec<PreferenceCheck>,
    pub summary: String,
}

impl TradeReview {
    pub fn satisfied(&self) -> impl Iterator<Item = &PreferenceCheck> {
        self.checks
            .iter()
            .filter(|c| c.status == ReviewStatus::Satisfied)
    }

    pub fn unsatisfied(&self) -> impl Iterator<Item = &PreferenceCheck> {
        self.checks
            .iter()
            .filter(|c| c.status == ReviewStatus::Unsatisfied)
    }

    /// 비교 대상이 된 지표 수.
    pub fn applicable_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status != ReviewStatus::NotApplicable)
            .count()
    }

    /// 손익 결과와 선호 지표 충족 수를 담은 한 줄 요약.
    fn summary_line(&self) -> String {
        let mut summary = format!(
            "이 거래는 {}을 기록했습니다.",
            if self.is_profit { "수익" } else { "손실" }
        );
        let applicable = self.applicable_count();
        if applicable > 0 {
            summary.push_str(&format!(
                " 설정한 선호 지표 {}개 중 {}개를 만족했습니다.",
                applicable,
                self.satisfied().count()
            ));
        }
        summary
    }

    /// 긍정 코멘트 뒤에 부정 코멘트가 오는 순서.
    pub fn comments(&self) -> Vec<String> {
        self.satisfied()
            .chain(self.unsatisfied())
            .filter_map(PreferenceCheck::comment)
            .collect()
    }
}

/// 청산 거래를 매수 시점 지표와 개인 선호 기준으로 비교합니다.
pub fn review_trade(
    trade: &AnalyzedTrade,
    fundamentals: &Fundamentals,
    preferences: &PreferenceValues,
) -> TradeReview {
    let checks: Vec<PreferenceCheck> = ValuationIndicator::ALL
        .into_iter()
        .map(|indicator| {
            let value = fundamentals.value(indicator);
            let preference = preference_of(preferences, indicator);
            let status = if value <= Decimal::ZERO || preference <= Decimal::ZERO {
                ReviewStatus::NotApplicable
            } else if indicator.favorable().holds(value, preference) {
                ReviewStatus::Satisfied
            } else {
                ReviewStatus::Unsatisfied
            };
            PreferenceCheck {
                indicator,
                value,
                preference,
                status,
            }
        })
        .collect();

    let mut review = TradeReview {
        trade_id: trade.id.clone(),
        symbol: trade.symbol.clone(),
        is_profit: trade.realized_profit_loss > Decimal::ZERO,
        checks,
        summary: String::new(),
    };
    review.summary = review.summary_line();
    review
}

fn preference_of(preferences: &PreferenceValues, indicator: ValuationIndicator) -> Decimal {
    match indicator {
        ValuationIndicator::Per => preferences.per,
        ValuationIndicator::Pbr => preferences.pbr,
        ValuationIndicator::Eps => preferences.eps,
    }
}
