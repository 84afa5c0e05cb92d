//! 매매 기록 관리 (추가, 청산, 삭제, 조회).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use journal_core::{NewTradeLog, TradeLogPatch, TradeLogRepository, TradeRecord};
use rust_decimal::Decimal;
use tracing::info;

use crate::output::{pct, to_json, truncate, DisplayOptions, OutputFormat};

/// 매매 기록 추가 설정.
#[derive(Debug)]
pub struct AddTradeConfig {
    pub symbol: String,
    pub name: String,
    pub buy_price: Decimal,
    pub buy_quantity: u64,
    pub buy_date: NaiveDate,
    /// 매도 정보 (가격, 수량, 날짜)
    pub sell: Option<(Decimal, u64, NaiveDate)>,
    pub rationale: Option<String>,
    pub tags: Vec<String>,
}

/// 매매 기록 추가.
pub fn add_trade<R: TradeLogRepository + ?Sized>(
    store: &mut R,
    config: AddTradeConfig,
) -> Result<TradeRecord> {
    let mut input = NewTradeLog::buy(
        config.symbol,
        config.name,
        config.buy_price,
        config.buy_quantity,
        config.buy_date,
    );
    if let Some((price, quantity, date)) = config.sell {
        input = input.sold(price, quantity, date);
    }
    input.rationale = config.rationale;
    input.tags = config.tags.into_iter().collect();

    let record = store.add(input).context("Failed to add trade log")?;
    info!(id = %record.id, "Trade log added");
    Ok(record)
}

/// 미청산 기록에 매도 정보를 입력합니다.
pub fn close_trade<R: TradeLogRepository + ?Sized>(
    store: &mut R,
    id: &str,
    price: Decimal,
    quantity: u64,
    date: NaiveDate,
) -> Result<TradeRecord> {
    let record = store
        .update(id, TradeLogPatch::close(price, quantity, date))
        .with_context(|| format!("Failed to close trade: {}", id))?;
    info!(id, "Trade log closed");
    Ok(record)
}

/// 매매 기록 삭제.
pub fn delete_trade<R: TradeLogRepository + ?Sized>(
    store: &mut R,
    id: &str,
) -> Result<TradeRecord> {
    let record = store
        .delete(id)
        .with_context(|| format!("Failed to delete trade: {}", id))?;
    info!(id, "Trade log deleted");
    Ok(record)
}

/// 매매 기록 목록 출력.
pub fn format_trades(
    records: &[TradeRecord],
    format: OutputFormat,
    display: &DisplayOptions,
    open_only: bool,
) -> Result<String> {
    let records: Vec<&TradeRecord> = records
        .iter()
        .filter(|r| !open_only || !r.is_closed())
        .collect();

    match format {
        OutputFormat::Json => to_json(&records),
        OutputFormat::Table => Ok(format_table(&records, display)),
    }
}

fn format_table(records: &[&TradeRecord], display: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<36} {:<8} {:<16} {:>14} {:>6} {:<10} {:>14} {:<10} {:>9}\n",
        "ID", "SYMBOL", "NAME", "BUY", "QTY", "BUY_DATE", "SELL", "SELL_DATE", "RETURN"
    ));
    output.push_str(&"-".repeat(132));
    output.push('\n');

    for record in records {
        let (sell, sell_date) = match record.sell_leg() {
            Some(leg) => (display.amount(leg.price), leg.date.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        let day_trade = if record.is_day_trade() { " (당일)" } else { "" };

        output.push_str(&format!(
            "{:<36} {:<8} {:<16} {:>14} {:>6} {:<10} {:>14} {:<10} {:>9}{}\n",
            record.id,
            record.symbol,
            truncate(&record.name, 16),
            display.amount(record.buy_price),
            record.buy_quantity,
            record.buy_date,
            sell,
            sell_date,
            record.profit_rate().map(pct).unwrap_or_else(|| "-".to_string()),
            day_trade
        ));
    }

    let closed = records.iter().filter(|r| r.is_closed()).count();
    output.push('\n');
    output.push_str(&format!(
        "Total: {} trades ({} closed, {} open)",
        records.len(),
        closed,
        records.len() - closed
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::InMemoryTradeLog;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn add(store: &mut InMemoryTradeLog, sell: Option<(Decimal, u64, NaiveDate)>) -> TradeRecord {
        add_trade(
            store,
            AddTradeConfig {
                symbol: "005930".into(),
                name: "삼성전자".into(),
                buy_price: dec!(10000),
                buy_quantity: 10,
                buy_date: date("2024-01-01"),
                sell,
                rationale: Some("실적 개선".into()),
                tags: vec!["실적".into()],
            },
        )
        .unwrap()
    }

    #[test]
    fn test_add_close_list() {
        let mut store = InMemoryTradeLog::new();
        let open = add(&mut store, None);
        add(&mut store, Some((dec!(10000), 10, date("2024-01-01"))));

        close_trade(&mut store, &open.id, dec!(12000), 10, date("2024-01-11")).unwrap();

        let records = store.list().unwrap();
        let table = format_trades(&records, OutputFormat::Table, &DisplayOptions::default(), false)
            .unwrap();
        assert!(table.contains("20.00%"));
        assert!(table.contains("(당일)"));
        assert!(table.contains("Total: 2 trades (2 closed, 0 open)"));
    }

    #[test]
    fn test_open_only_filter() {
        let mut store = InMemoryTradeLog::new();
        add(&mut store, None);
        add(&mut store, Some((dec!(11000), 10, date("2024-01-05"))));

        let records = store.list().unwrap();
        let json = format_trades(&records, OutputFormat::Json, &DisplayOptions::default(), true)
            .unwrap();
        let parsed: Vec<TradeRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(!parsed[0].is_closed());
    }

    #[test]
    fn test_close_unknown_trade_fails() {
        let mut store = InMemoryTradeLog::new();
        assert!(close_trade(&mut store, "missing", dec!(1), 1, date("2024-01-01")).is_err());
        assert!(delete_trade(&mut store, "missing").is_err());
    }
}
