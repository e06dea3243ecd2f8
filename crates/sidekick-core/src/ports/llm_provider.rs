//! 생성 API 포트.
//!
//! 프롬프트 하나를 보내고 생성된 텍스트 하나를 받는다. 재시도는 없다.

use async_trait::async_trait;

use crate::error::CoreError;

/// 출력 길이 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// TL;DR, 분류 등 짧은 응답
    Short,
    /// 전체 결과
    #[default]
    Full,
}

/// 생성 요청 (호출마다 새로 만든다)
#[derive(Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub api_key: String,
    /// 지정 시 설정의 모델보다 우선
    pub model_override: Option<String>,
    pub mode: OutputMode,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, api_key: impl Into<String>, mode: OutputMode) -> Self {
        Self {
            prompt: prompt.into(),
            api_key: api_key.into(),
            model_override: None,
            mode,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }
}

// API 키가 로그에 남지 않도록 Debug를 직접 구현
impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("prompt_len", &self.prompt.len())
            .field("model_override", &self.model_override)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// 생성 클라이언트
///
/// 구현체: `GeminiClient` (sidekick-network)
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// 프롬프트를 보내고 첫 후보의 텍스트(trim)를 반환
    async fn generate(&self, request: &GenerationRequest) -> Result<String, CoreError>;
}
