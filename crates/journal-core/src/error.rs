//! 매매일지 에러 타입.
//!
//! 분석 엔진 자체는 실패하지 않습니다. 이 에러는 저장소, 설정,
//! 외부 재무 데이터 제공자 등 경계 영역에서만 사용됩니다.

use thiserror::Error;

/// 매매일지 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 입력 검증 실패
    #[error("검증 실패: {0}")]
    Validation(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 저장소 입출력 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 재무 데이터 제공자 에러
    #[error("데이터 제공자 에러: {0}")]
    Provider(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 사용자 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            JournalError::Validation(_) | JournalError::InvalidInput(_) | JournalError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        JournalError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for JournalError {
    fn from(err: validator::ValidationErrors) -> Self {
        JournalError::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
