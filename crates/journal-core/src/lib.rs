//! # Journal Core
//!
//! 매매일지의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 매매일지 전반에서 사용되는 기본 타입을 제공합니다:
//! - 매매 기록 (`TradeRecord`) 및 청산 여부 판정
//! - 투자 성향 및 선호 지표
//! - 재무 지표 스냅샷
//! - 매매 기록 저장소
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use store::*;
pub use types::*;
