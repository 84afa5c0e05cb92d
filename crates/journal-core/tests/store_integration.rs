//! JSON 매매 기록 저장소 통합 테스트

use chrono::NaiveDate;
use journal_core::{JournalError, JsonTradeLog, NewTradeLog, TradeLogPatch, TradeLogRepository};
use rust_decimal_macros::dec;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("trade_logs.json");

    let id = {
        let mut store = JsonTradeLog::open(&path).unwrap();
        assert!(store.list().unwrap().is_empty());

        let added = store
            .add(NewTradeLog::buy("005930", "삼성전자", dec!(10000), 10, date("2024-01-01")))
            .unwrap();
        store
            .update(&added.id, TradeLogPatch::close(dec!(12000), 10, date("2024-01-11")))
            .unwrap();
        store
            .add(NewTradeLog::buy("000660", "SK하이닉스", dec!(130000), 3, date("2024-02-01")))
            .unwrap();
        added.id
    };

    let reopened = JsonTradeLog::open(&path).unwrap();
    let records = reopened.list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, id);
    assert!(records[0].is_closed());
    assert!(!records[1].is_closed());
}

#[test]
fn test_json_store_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trade_logs.json");

    let mut store = JsonTradeLog::open(&path).unwrap();
    store
        .add(
            NewTradeLog::buy("005930", "삼성전자", dec!(70000), 5, date("2024-03-04"))
                .sold(dec!(71000), 5, date("2024-03-04")),
        )
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"buyPrice\""));
    assert!(raw.contains("\"sellDate\""));
}

#[test]
fn test_json_store_rejects_invalid_sell_leg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trade_logs.json");

    let mut store = JsonTradeLog::open(&path).unwrap();
    let err = store
        .add(
            NewTradeLog::buy("005930", "삼성전자", dec!(70000), 5, date("2024-03-04"))
                .sold(dec!(71000), 5, date("2024-03-01")),
        )
        .unwrap_err();

    assert!(matches!(err, JournalError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn test_delete_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonTradeLog::open(dir.path().join("logs.json")).unwrap();
    let err = store.delete("missing").unwrap_err();
    assert!(err.is_user_error());
}
