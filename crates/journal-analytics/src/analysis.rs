//! 매매 성과 분석.
//!
//! 매매 기록 목록을 받아 청산 거래별 손익과 전체 요약을 계산합니다.
//! 입력을 읽기만 하는 순수 함수이며 실패하지 않습니다. 금액이 `Decimal` 표현 범위를
//! 넘으면 패닉 대신 `Decimal::MAX`/`Decimal::MIN`으로 포화됩니다.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use journal_core::{is_closed, rate_pct, Amount, Percentage, Price, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 손익이 계산된 청산 거래.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTrade {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub buy_price: Price,
    pub buy_quantity: u64,
    pub buy_date: NaiveDate,
    pub sell_price: Price,
    pub sell_quantity: u64,
    pub sell_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// 투자 원금 (매수가 × 매수 수량)
    pub investment_principal: Amount,
    /// 총 매도 금액 (매도가 × 매도 수량)
    pub total_sale_amount: Amount,
    /// 실현 손익 (매도 금액 - 원금)
    pub realized_profit_loss: Amount,
    /// 수익률 (%). 원금이 0이면 0
    pub return_rate: Percentage,
    /// 보유 기간 (일)
    pub holding_period: i64,
}

impl AnalyzedTrade {
    /// 수익 거래 여부 (손익 > 0).
    pub fn is_win(&self) -> bool {
        self.realized_profit_loss > Decimal::ZERO
    }

    /// 손실 거래 여부 (손익 < 0).
    pub fn is_loss(&self) -> bool {
        self.realized_profit_loss < Decimal::ZERO
    }
}

/// 매매 성과 요약.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAnalysisSummary {
    /// 총 실현 손익
    pub total_realized_profit_loss: Amount,
    /// 총 투자 원금
    pub total_investment_principal: Amount,
    /// 전체 수익률 (%)
    pub overall_return_rate: Percentage,
    /// 수익 거래 수
    pub win_count: usize,
    /// 손실 거래 수 (본전 거래는 제외)
    pub loss_count: usize,
    /// 승률 (%)
    pub win_rate: Percentage,
    /// 평균 보유 기간 (일)
    pub average_holding_period: Decimal,
    /// 분석된 거래 (입력 순서 유지)
    pub analyzed_trades: Vec<AnalyzedTrade>,
}

impl TradeAnalysisSummary {
    /// 분석에 포함된 청산 거래 수.
    pub fn closed_count(&self) -> usize {
        self.analyzed_trades.len()
    }

    /// 손익이 정확히 0인 거래 수.
    pub fn breakeven_count(&self) -> usize {
        self.closed_count() - self.win_count - self.loss_count
    }
}

/// 매수일부터 매도일까지의 일수.
pub fn holding_days(buy_date: NaiveDate, sell_date: NaiveDate) -> i64 {
    (sell_date - buy_date).num_days()
}

/// 단일 기록을 분석합니다. 미청산 기록이면 `None`입니다.
pub fn analyze_trade(record: &TradeRecord) -> Option<AnalyzedTrade> {
    let leg = record.sell_leg()?;

    let investment_principal = record.investment_principal();
    let total_sale_amount = leg.amount();
    let realized_profit_loss = total_sale_amount.saturating_sub(investment_principal);

    Some(AnalyzedTrade {
        id: record.id.clone(),
        symbol: record.symbol.clone(),
        name: record.name.clone(),
        buy_price: record.buy_price,
        buy_quantity: record.buy_quantity,
        buy_date: record.buy_date,
        sell_price: leg.price,
        sell_quantity: leg.quantity,
        sell_date: leg.date,
        rationale: record.rationale.clone(),
        tags: record.tags.clone(),
        investment_principal,
        total_sale_amount,
        realized_profit_loss,
        return_rate: rate_pct(realized_profit_loss, investment_principal),
        holding_period: holding_days(record.buy_date, leg.date),
    })
}

/// 매매 기록 목록을 분석합니다.
///
/// 미청산 기록은 조용히 제외됩니다. 빈 입력이면 모든 값이 0인 요약을 반환합니다.
pub fn analyze_trades(records: &[TradeRecord]) -> TradeAnalysisSummary {
    let analyzed_trades: Vec<AnalyzedTrade> = records
        .iter()
        .filter(|record| is_closed(record))
        .filter_map(analyze_trade)
        .collect();

    let mut total_realized_profit_loss = Decimal::ZERO;
    let mut total_investment_principal = Decimal::ZERO;
    let mut total_holding_days: i64 = 0;
    let mut win_count = 0;
    let mut loss_count = 0;

    for trade in &analyzed_trades {
        total_realized_profit_loss =
            total_realized_profit_loss.saturating_add(trade.realized_profit_loss);
        total_investment_principal =
            total_investment_principal.saturating_add(trade.investment_principal);
        total_holding_days += trade.holding_period;

        if trade.is_win() {
            win_count += 1;
        } else if trade.is_loss() {
            loss_count += 1;
        }
    }

    let closed = Decimal::from(analyzed_trades.len());
    let average_holding_period = if analyzed_trades.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from(total_holding_days) / closed
    };

    tracing::debug!(
        records = records.len(),
        closed = analyzed_trades.len(),
        win_count,
        loss_count,
        "매매 분석 완료"
    );

    TradeAnalysisSummary {
        total_realized_profit_loss,
        total_investment_principal,
        overall_return_rate: rate_pct(total_realized_profit_loss, total_investment_principal),
        win_count,
        loss_count,
        win_rate: rate_pct(Decimal::from(win_count), closed),
        average_holding_period,
        analyzed_trades,
    }
}
