//! 성과 분석 출력.

use anyhow::Result;
use journal_analytics::{
    analyze_trades, classify_closed_trades, FundamentalsProvider, TradeAnalysisSummary,
    TradeClassification,
};
use journal_core::TradeRecord;
use serde::Serialize;

use crate::output::{pct, to_json, truncate, DisplayOptions, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReport<'a> {
    summary: &'a TradeAnalysisSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    classifications: Option<&'a [TradeClassification]>,
}

/// 매매 기록을 분석해 출력 문자열을 만듭니다.
///
/// 재무 데이터 제공자가 주어지면 거래별 매수 시점 지표 분류를 함께 출력합니다.
pub fn analyze(
    records: &[TradeRecord],
    provider: Option<&dyn FundamentalsProvider>,
    format: OutputFormat,
    display: &DisplayOptions,
) -> Result<String> {
    let summary = analyze_trades(records);
    let classifications = provider.map(|p| classify_closed_trades(&summary, p));

    match format {
        OutputFormat::Json => to_json(&AnalysisReport {
            summary: &summary,
            classifications: classifications.as_deref(),
        }),
        OutputFormat::Table => Ok(format_table(
            &summary,
            classifications.as_deref(),
            display,
        )),
    }
}

fn format_table(
    summary: &TradeAnalysisSummary,
    classifications: Option<&[TradeClassification]>,
    display: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str("📊 매매 성과 요약\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "총 실현 손익:   {}\n",
        display.amount(summary.total_realized_profit_loss)
    ));
    output.push_str(&format!(
        "총 투자 원금:   {}\n",
        display.amount(summary.total_investment_principal)
    ));
    output.push_str(&format!("전체 수익률:    {}\n", pct(summary.overall_return_rate)));
    output.push_str(&format!(
        "승률:           {} ({}승 {}패, 청산 {}건)\n",
        pct(summary.win_rate),
        summary.win_count,
        summary.loss_count,
        summary.closed_count()
    ));
    output.push_str(&format!(
        "평균 보유 기간: {}일\n",
        summary.average_holding_period.round_dp(1)
    ));

    if summary.analyzed_trades.is_empty() {
        output.push_str("\n청산된 거래가 없습니다.");
        return output;
    }

    output.push('\n');
    output.push_str(&format!(
        "{:<8} {:<16} {:<10} {:<10} {:>6} {:>16} {:>16} {:>9}\n",
        "SYMBOL", "NAME", "BUY_DATE", "SELL_DATE", "DAYS", "PRINCIPAL", "P/L", "RETURN"
    ));
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for trade in &summary.analyzed_trades {
        output.push_str(&format!(
            "{:<8} {:<16} {:<10} {:<10} {:>6} {:>16} {:>16} {:>9}\n",
            trade.symbol,
            truncate(&trade.name, 16),
            trade.buy_date,
            trade.sell_date,
            trade.holding_period,
            display.amount(trade.investment_principal),
            display.amount(trade.realized_profit_loss),
            pct(trade.return_rate)
        ));
    }

    if let Some(classifications) = classifications {
        output.push_str("\n🔎 매수 시점 지표 분류\n");
        for item in classifications {
            match item.fundamentals {
                None => output.push_str(&format!(
                    "  {} ({}): 데이터 없음\n",
                    item.symbol, item.trade_id
                )),
                Some(f) => {
                    output.push_str(&format!(
                        "  {} PER {} / PBR {} / EPS {}\n",
                        item.symbol,
                        f.per.round_dp(2),
                        f.pbr.round_dp(2),
                        f.eps.round_dp(0)
                    ));
                    for c in &item.classifications {
                        output.push_str(&format!(
                            "    [{}] {:<12} {}\n",
                            c.category,
                            c.criterion,
                            if c.verdict.is_pass() { "✓" } else { "✗" }
                        ));
                    }
                }
            }
        }
    }

    output
}
