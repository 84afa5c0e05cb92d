//! 재무 데이터 제공자와 청산 거래 지표 결합.
//!
//! 외부 시세 서비스는 [`FundamentalsProvider`] 뒤에 숨깁니다. 제공자 오류는
//! 여기서 로그로 남기고 `None`으로 바꾸므로 분석 함수까지 전파되지 않습니다.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use journal_core::{trade_span, FundamentalSnapshot, Fundamentals, JournalResult};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalyzedTrade, TradeAnalysisSummary};
use crate::classification::{classify_indicators, IndicatorClassification};

/// 종목별 재무 스냅샷 제공자.
pub trait FundamentalsProvider {
    /// `date`가 있으면 그 날짜 기준, 없으면 최신 스냅샷을 반환합니다.
    fn fundamentals(
        &self,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> JournalResult<Option<FundamentalSnapshot>>;
}

impl<P: FundamentalsProvider + ?Sized> FundamentalsProvider for &P {
    fn fundamentals(
        &self,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> JournalResult<Option<FundamentalSnapshot>> {
        (**self).fundamentals(symbol, date)
    }
}

// ==================== 메모리 제공자 ====================

/// 메모리에 보관한 스냅샷을 제공합니다.
///
/// JSON 형식: `{ "005930": [ { "date": "2024-01-02", "closePrice": "70000", ... } ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryFundamentals {
    snapshots: HashMap<String, Vec<FundamentalSnapshot>>,
}

impl InMemoryFundamentals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, snapshot: FundamentalSnapshot) {
        self.snapshots.entry(symbol.into()).or_default().push(snapshot);
    }

    pub fn with(mut self, symbol: impl Into<String>, snapshot: FundamentalSnapshot) -> Self {
        self.insert(symbol, snapshot);
        self
    }

    pub fn from_json_str(json: &str) -> JournalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> JournalResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let provider = Self::from_json_str(&raw)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            symbols = provider.snapshots.len(),
            "재무 스냅샷 로드"
        );
        Ok(provider)
    }
}

impl FundamentalsProvider for InMemoryFundamentals {
    /// 날짜가 주어지면 그 날짜 이전의 가장 최근 스냅샷을, 없으면 날짜 없는 스냅샷을 씁니다.
    fn fundamentals(
        &self,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> JournalResult<Option<FundamentalSnapshot>> {
        let Some(snapshots) = self.snapshots.get(symbol) else {
            return Ok(None);
        };

        let dated = snapshots
            .iter()
            .filter(|s| match (s.date, date) {
                (Some(snapshot_date), Some(target)) => snapshot_date <= target,
                (Some(_), None) => true,
                (None, _) => false,
            })
            .max_by_key(|s| s.date);

        let found = dated.or_else(|| snapshots.iter().find(|s| s.date.is_none()));
        Ok(found.cloned())
    }
}

// ==================== TTL 캐시 ====================

type CacheKey = (String, Option<NaiveDate>);

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    snapshot: Option<FundamentalSnapshot>,
}

/// TTL이 있는 제공자 캐시.
///
/// 성공한 조회 결과(스냅샷 없음 포함)만 캐시합니다. 오류는 캐시하지 않습니다.
#[derive(Debug)]
pub struct CachedFundamentals<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl<P: FundamentalsProvider> CachedFundamentals<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// 종목의 캐시 항목을 모두 제거합니다.
    pub fn invalidate(&self, symbol: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|(cached_symbol, _), _| cached_symbol != symbol);
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// 만료되지 않은 캐시 항목 수.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .values()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: FundamentalsProvider> FundamentalsProvider for CachedFundamentals<P> {
    fn fundamentals(
        &self,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> JournalResult<Option<FundamentalSnapshot>> {
        let key = (symbol.to_string(), date);

        {
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    tracing::trace!(symbol, ?date, "재무 캐시 적중");
                    return Ok(entry.snapshot.clone());
                }
            }
        }

        let snapshot = self.inner.fundamentals(symbol, date)?;

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        // 만료된 항목 정리
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                snapshot: snapshot.clone(),
            },
        );
        Ok(snapshot)
    }
}

// ==================== 청산 거래 분류 ====================

/// 청산 거래 하나의 매수 시점 지표 분류.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClassification {
    pub trade_id: String,
    pub symbol: String,
    /// 매수일 기준 지표 (조회 실패 시 없음)
    pub fundamentals: Option<Fundamentals>,
    pub classifications: Vec<IndicatorClassification>,
}

/// 매수일 기준 지표를 조회합니다. 실패하거나 데이터가 없으면 `None`입니다.
pub fn fundamentals_at_buy<P: FundamentalsProvider + ?Sized>(
    trade: &AnalyzedTrade,
    provider: &P,
) -> Option<Fundamentals> {
    match provider.fundamentals(&trade.symbol, Some(trade.buy_date)) {
        Ok(Some(snapshot)) => Some(Fundamentals::from_snapshot(&snapshot)),
        Ok(None) => {
            tracing::warn!(symbol = %trade.symbol, date = %trade.buy_date, "재무 데이터 없음");
            None
        }
        Err(e) => {
            tracing::warn!(symbol = %trade.symbol, error = %e, "재무 데이터 조회 실패");
            None
        }
    }
}

/// 분석된 청산 거래마다 매수 시점 지표를 조회해 분류합니다.
pub fn classify_closed_trades<P: FundamentalsProvider + ?Sized>(
    summary: &TradeAnalysisSummary,
    provider: &P,
) -> Vec<TradeClassification> {
    summary
        .analyzed_trades
        .iter()
        .map(|trade| {
            let _span = trade_span!("classify_trade", trade.id, trade.symbol).entered();
            let fundamentals = fundamentals_at_buy(trade, provider);
            TradeClassification {
                trade_id: trade.id.clone(),
                symbol: trade.symbol.clone(),
                classifications: fundamentals
                    .as_ref()
                    .map(classify_indicators)
                    .unwrap_or_default(),
                fundamentals,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::JournalError;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl FundamentalsProvider for CountingProvider {
        fn fundamentals(
            &self,
            _symbol: &str,
            _date: Option<NaiveDate>,
        ) -> JournalResult<Option<FundamentalSnapshot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(JournalError::Provider("timeout".into()));
            }
            Ok(Some(FundamentalSnapshot::new(dec!(70000), dec!(7000), dec!(35000))))
        }
    }

    #[test]
    fn test_in_memory_picks_latest_on_or_before_date() {
        let provider = InMemoryFundamentals::new()
            .with(
                "005930",
                FundamentalSnapshot::new(dec!(60000), dec!(6000), dec!(30000))
                    .on(date("2024-01-02")),
            )
            .with(
                "005930",
                FundamentalSnapshot::new(dec!(65000), dec!(6500), dec!(30000))
                    .on(date("2024-02-01")),
            )
            .with("005930", FundamentalSnapshot::new(dec!(80000), dec!(8000), dec!(40000)));

        let jan = provider.fundamentals("005930", Some(date("2024-01-15"))).unwrap().unwrap();
        assert_eq!(jan.close_price, dec!(60000));

        let latest = provider.fundamentals("005930", None).unwrap().unwrap();
        assert_eq!(latest.close_price, dec!(65000));

        let before_all = provider
            .fundamentals("005930", Some(date("2023-12-01")))
            .unwrap()
            .unwrap();
        assert_eq!(before_all.close_price, dec!(80000));

        assert!(provider.fundamentals("000660", None).unwrap().is_none());
    }

    #[test]
    fn test_in_memory_from_json() {
        let provider = InMemoryFundamentals::from_json_str(
            r#"{"005930": [
                {"date": "2024-01-02", "closePrice": 70000, "eps": "7000", "bps": "35000"}
            ]}"#,
        )
        .unwrap();
        let snapshot = provider.fundamentals("005930", Some(date("2024-01-03"))).unwrap().unwrap();
        assert_eq!(Fundamentals::from_snapshot(&snapshot).per, dec!(10));
    }

    #[test]
    fn test_cache_hits_within_ttl() {
        let cache = CachedFundamentals::new(CountingProvider::new(false), Duration::from_secs(300));
        cache.fundamentals("005930", None).unwrap();
        cache.fundamentals("005930", None).unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);

        cache.fundamentals("005930", Some(date("2024-01-02"))).unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);

        cache.invalidate("005930");
        assert!(cache.is_empty());
        cache.fundamentals("005930", None).unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_zero_ttl_always_refetches() {
        let cache = CachedFundamentals::new(CountingProvider::new(false), Duration::ZERO);
        cache.fundamentals("005930", None).unwrap();
        cache.fundamentals("005930", None).unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_expired_entries_are_pruned_on_insert() {
        let cache = CachedFundamentals::new(CountingProvider::new(false), Duration::ZERO);
        for day in ["2024-01-02", "2024-01-03", "2024-01-04"] {
            cache.fundamentals("005930", Some(date(day))).unwrap();
        }
        cache.fundamentals("000660", None).unwrap();

        let stored = cache.entries.lock().unwrap().len();
        assert_eq!(stored, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = CachedFundamentals::new(CountingProvider::new(true), Duration::from_secs(300));
        assert!(cache.fundamentals("005930", None).is_err());
        assert!(cache.fundamentals("005930", None).is_err());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        cache.clear();
    }
}
