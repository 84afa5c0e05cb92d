//! 매매 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 청산 거래 손익 분석 및 성과 요약
//! - 가치주/성장주 기준 지표 분류
//! - 투자 성향별 체크리스트 평가
//! - 개인 선호 기준에 따른 매매 복기
//! - 매매 전 리스크 체크
//! - 재무 데이터 제공자 연동 (TTL 캐시 포함)
//!
//! 분석 함수는 모두 입력만 읽는 순수 함수이며 실패하지 않습니다.

pub mod analysis;
pub mod checklist;
pub mod classification;
pub mod fundamentals;
pub mod review;
pub mod risk;

pub use analysis::{
    analyze_trade, analyze_trades, holding_days, AnalyzedTrade, TradeAnalysisSummary,
};
pub use checklist::{
    evaluate_checklist, ChecklistOutcome, IndicatorCheck, IndicatorReadings, IndicatorStatus,
};
pub use classification::{classify_indicators, IndicatorCategory, IndicatorClassification, Verdict};
pub use fundamentals::{
    classify_closed_trades, fundamentals_at_buy, CachedFundamentals, FundamentalsProvider,
    InMemoryFundamentals, TradeClassification,
};
pub use review::{review_trade, PreferenceCheck, ReviewStatus, TradeReview};
pub use risk::{risk_check, RiskCheckOutcome, RiskChecklistInput, DEFAULT_MAX_RISK_PCT};
