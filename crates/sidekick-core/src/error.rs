//! Sidekick 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 라이브러리 에러를 이 타입으로 매핑한다.
//! 사용자에게 그대로 노출되는 variant(`MissingApiKey`, `Config`, `Api`,
//! `SafetyBlocked`, `NoContent`, `Validation`)만 메시지를 원문 그대로 출력한다.
//! 나머지 variant의 한국어 메시지는 로그용이다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API 키 미설정. 설정 화면 안내로 복구한다
    #[error("Please set up your Gemini API key in the Sidekick settings first.")]
    MissingApiKey,

    /// 그 외 설정값 오류 (빈 API 키 입력, 알 수 없는 액션 이름 등)
    #[error("{0}")]
    Config(String),

    /// 생성 API 오류 응답 (non-2xx 또는 `error` 객체 포함)
    #[error("{0}")]
    Api(String),

    /// 안전 설정에 의해 후보가 차단됨
    #[error("Content generation blocked due to safety settings: {0}")]
    SafetyBlocked(String),

    /// 후보가 하나도 생성되지 않음
    #[error("No content generated")]
    NoContent,

    /// 필드 유효성 검증 실패
    #[error("Invalid event data ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명 (예: "end.dateTime")
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 저장된 설정 blob 파싱 실패. 호출부에서 기본값으로 복구한다
    #[error("저장된 설정 읽기 실패: {0}")]
    StorageRead(String),

    /// 키-값 저장소 I/O 실패
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 더 최근 액션에 의해 취소됨
    #[error("작업 취소됨")]
    Cancelled,

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 사용자 알림으로 그대로 표시해도 되는 에러인지 여부
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::Config(_)
                | Self::Api(_)
                | Self::SafetyBlocked(_)
                | Self::NoContent
                | Self::Validation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_provider_message_verbatim() {
        let err = CoreError::Api("API key not valid".to_string());
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[test]
    fn validation_error_names_field() {
        let err = CoreError::validation("end.dateTime", "missing");
        let msg = err.to_string();
        assert!(msg.contains("end.dateTime"));
        assert!(err.is_user_facing());
    }

    #[test]
    fn no_content_message() {
        assert_eq!(CoreError::NoContent.to_string(), "No content generated");
        assert!(!CoreError::Network("x".into()).is_user_facing());
    }

    #[test]
    fn missing_api_key_is_distinct_from_config() {
        assert!(CoreError::MissingApiKey.is_user_facing());
        assert!(CoreError::MissingApiKey.to_string().contains("API key"));
        assert!(!matches!(
            CoreError::Config("x".into()),
            CoreError::MissingApiKey
        ));
    }
}
