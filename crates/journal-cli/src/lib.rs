//! 매매일지 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 매매 기록 추가/청산/삭제/조회
//! - 성과 분석 및 지표 분류
//! - 체크리스트, 매매 복기, 리스크 체크
//! - 투자 성향 설문

pub mod commands;
pub mod output;
