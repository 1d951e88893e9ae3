//! Error types for Playfield
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Playfield 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 리스너 관련
    // ========================================================================
    /// 리스너가 실패를 보고함 (dispatch_event 밖으로 그대로 전파)
    #[error("Listener failed on '{event_type}': {message}")]
    Listener { event_type: String, message: String },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환 (JsonStore 읽기/쓰기)
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 리스너 에러 생성 헬퍼
    pub fn listener(event_type: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Listener {
            event_type: event_type.into(),
            message: message.into(),
        }
    }

    /// 리스너가 일으킨 에러인지 확인
    pub fn is_listener_failure(&self) -> bool {
        matches!(self, Error::Listener { .. })
    }
}
