//! 메모리 기반 매매 기록 저장소.

use uuid::Uuid;
use validator::Validate;

use super::{check_record, NewTradeLog, TradeLogPatch, TradeLogRepository};
use crate::domain::TradeRecord;
use crate::error::{JournalError, JournalResult};

/// 프로세스 메모리에만 보관하는 저장소.
///
/// 입력 순서를 유지합니다. 테스트와 [`super::JsonTradeLog`]의 내부 상태로 사용됩니다.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeLog {
    records: Vec<TradeRecord>,
}

impl InMemoryTradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 검증된 기록으로 저장소를 구성합니다.
    ///
    /// 파일에서 읽은 기록처럼 외부에서 들어온 데이터도 같은 불변식을 검사합니다.
    pub fn from_records(records: Vec<TradeRecord>) -> JournalResult<Self> {
        for record in &records {
            check_record(record)?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &str) -> JournalResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("매매 기록 {}", id)))
    }
}

impl TradeLogRepository for InMemoryTradeLog {
    fn list(&self) -> JournalResult<Vec<TradeRecord>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> JournalResult<TradeRecord> {
        let idx = self.position(id)?;
        Ok(self.records[idx].clone())
    }

    fn add(&mut self, input: NewTradeLog) -> JournalResult<TradeRecord> {
        input.validate()?;

        let record = input.into_record(Uuid::new_v4().to_string());
        check_record(&record)?;

        tracing::info!(
            trade_id = %record.id,
            symbol = %record.symbol,
            closed = record.is_closed(),
            "매매 기록 추가"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: TradeLogPatch) -> JournalResult<TradeRecord> {
        patch.validate()?;

        let idx = self.position(id)?;
        let mut updated = self.records[idx].clone();
        patch.apply(&mut updated);
        check_record(&updated)?;

        tracing::info!(trade_id = %id, closed = updated.is_closed(), "매매 기록 수정");
        self.records[idx] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> JournalResult<TradeRecord> {
        let idx = self.position(id)?;
        let removed = self.records.remove(idx);
        tracing::info!(trade_id = %id, "매매 기록 삭제");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_close_delete() {
        let mut store = InMemoryTradeLog::new();
        let added = store
            .add(NewTradeLog::buy("005930", "삼성전자", dec!(70000), 10, date("2024-01-02")))
            .unwrap();
        assert!(!added.is_closed());

        let closed = store
            .update(&added.id, TradeLogPatch::close(dec!(77000), 10, date("2024-02-01")))
            .unwrap();
        assert!(closed.is_closed());
        assert_eq!(closed.profit_rate(), Some(dec!(10)));

        let removed = store.delete(&added.id).unwrap();
        assert_eq!(removed.id, added.id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejected_update_leaves_record_untouched() {
        let mut store = InMemoryTradeLog::new();
        let added = store
            .add(NewTradeLog::buy("005930", "삼성전자", dec!(70000), 10, date("2024-01-02")))
            .unwrap();

        let err = store
            .update(&added.id, TradeLogPatch::close(dec!(77000), 20, date("2024-02-01")))
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
        assert!(!store.get(&added.id).unwrap().has_any_sell_field());
    }

    #[test]
    fn test_unknown_id() {
        let mut store = InMemoryTradeLog::new();
        assert!(matches!(store.get("nope"), Err(JournalError::NotFound(_))));
        assert!(matches!(store.delete("nope"), Err(JournalError::NotFound(_))));
    }

    #[test]
    fn test_from_records_checks_invariants() {
        let bad = TradeRecord::open("x", "005930", "삼성전자", dec!(1), 1, date("2024-01-02"))
            .with_sell(dec!(1), 2, date("2024-01-03"));
        assert!(InMemoryTradeLog::from_records(vec![bad]).is_err());
    }
}
