//! 개인 선호 기준 매매 복기.

use anyhow::{Context, Result};
use journal_analytics::{analyze_trade, fundamentals_at_buy, review_trade, FundamentalsProvider};
use journal_core::{Personality, TradeLogRepository};
use serde::Serialize;

use crate::output::{pct, to_json, DisplayOptions, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewReport<'a> {
    personality: Personality,
    trade: &'a journal_analytics::AnalyzedTrade,
    review: &'a journal_analytics::TradeReview,
    comments: Vec<String>,
}

/// 청산 거래 하나를 매수 시점 지표와 선호 기준으로 복기합니다.
pub fn review<R: TradeLogRepository + ?Sized>(
    store: &R,
    id: &str,
    provider: &dyn FundamentalsProvider,
    personality: Option<Personality>,
    format: OutputFormat,
    display: &DisplayOptions,
) -> Result<String> {
    let record = store
        .get(id)
        .with_context(|| format!("Failed to load trade: {}", id))?;
    let trade = analyze_trade(&record)
        .ok_or_else(|| anyhow::anyhow!("Trade is still open: {}", id))?;
    let fundamentals = fundamentals_at_buy(&trade, provider).ok_or_else(|| {
        anyhow::anyhow!(
            "No fundamentals for {} on {}",
            trade.symbol,
            trade.buy_date
        )
    })?;

    let personality = Personality::resolve(personality);
    let review = review_trade(&trade, &fundamentals, &personality.preference_values());
    let comments = review.comments();

    match format {
        OutputFormat::Json => to_json(&ReviewReport {
            personality,
            trade: &trade,
            review: &review,
            comments,
        }),
        OutputFormat::Table => {
            let mut output = format!(
                "{} ({}) 상세 분석\n{} ~ {} ({}일 보유)\n\n",
                trade.name, trade.symbol, trade.buy_date, trade.sell_date, trade.holding_period
            );
            output.push_str(&format!(
                "실현 손익: {} ({})\n",
                display.amount(trade.realized_profit_loss),
                pct(trade.return_rate)
            ));
            output.push_str(&format!("투자 성향: {}\n\n", personality.title()));

            for check in &review.checks {
                output.push_str(&format!(
                    "  {:<4} {:>12}  기준 {}  {:?}\n",
                    check.indicator,
                    check.value.round_dp(2),
                    check.criterion(),
                    check.status
                ));
            }

            output.push('\n');
            output.push_str(&review.summary);
            for comment in comments {
                output.push('\n');
                output.push_str(&comment);
            }
            Ok(output)
        }
    }
}
