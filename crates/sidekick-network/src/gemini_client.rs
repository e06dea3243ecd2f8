//! Gemini `generateContent` 클라이언트.
//!
//! 요청 하나당 정확히 한 번 POST하며 재시도하지 않는다.
//! API 키는 쿼리 파라미터로 전달되고 로그에는 남기지 않는다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use sidekick_core::config::ApiConfig;
use sidekick_core::error::CoreError;
use sidekick_core::ports::llm_provider::{GenerationClient, GenerationRequest, OutputMode};
use sidekick_core::ports::storage::SettingsRepository;
use sidekick_core::settings::DEFAULT_MODEL;

/// 제공자 오류 메시지가 없을 때의 기본 메시지
const DEFAULT_API_ERROR: &str = "Error generating content";

/// 모든 카테고리 차단 해제
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// ============================================================
// 요청/응답 와이어 타입
// ============================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: [WireContent<'a>; 1],
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    parts: [WirePart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl GenerationConfig {
    fn for_mode(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Full => Self {
                temperature: 0.4,
                top_k: 32,
                top_p: 0.95,
                max_output_tokens: 8192,
            },
            OutputMode::Short => Self {
                temperature: 0.3,
                top_k: 32,
                top_p: 0.95,
                max_output_tokens: 800,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// ============================================================
// GeminiClient
// ============================================================

/// Gemini 생성 클라이언트
///
/// 모델 우선순위: 요청의 `model_override` → 설정의 `model` → `gemini-2.0-flash-lite`
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    settings: Arc<dyn SettingsRepository>,
}

impl GeminiClient {
    pub fn new(
        config: &ApiConfig,
        settings: Arc<dyn SettingsRepository>,
    ) -> Result<Self, CoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            base_url = %config.base_url,
            timeout = config.timeout_secs,
            "GeminiClient 초기화"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            settings,
        })
    }

    /// 요청에 사용할 모델 결정
    fn resolve_model(&self, request: &GenerationRequest) -> String {
        if let Some(model) = request
            .model_override
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
        {
            return model.to_string();
        }
        self.settings
            .get()
            .stored_model()
            .unwrap_or(DEFAULT_MODEL)
            .to_string()
    }

    fn endpoint(&self, model: &str, api_key: &str) -> Result<Url, CoreError> {
        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        ))
        .map_err(|e| CoreError::Internal(format!("잘못된 API URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    fn request_body<'a>(prompt: &'a str, mode: OutputMode) -> GenerateContentBody<'a> {
        GenerateContentBody {
            contents: [WireContent {
                parts: [WirePart { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
            generation_config: GenerationConfig::for_mode(mode),
        }
    }

    /// 응답 상태와 본문을 결과 텍스트 또는 에러로 변환
    fn interpret_response(success: bool, body: &str) -> Result<String, CoreError> {
        let parsed = serde_json::from_str::<GenerateContentResponse>(body);

        if !success {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
            return Err(CoreError::Api(message));
        }

        let response = parsed.map_err(|e| {
            CoreError::Internal(format!(
                "생성 API 응답 파싱 실패: {} (raw: {})",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })?;

        if let Some(error) = response.error {
            return Err(CoreError::Api(
                error.message.unwrap_or_else(|| DEFAULT_API_ERROR.to_string()),
            ));
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(CoreError::SafetyBlocked(reason));
            }
            return Err(CoreError::NoContent);
        };

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(CoreError::SafetyBlocked("SAFETY".to_string()));
        }

        candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|text| text.trim().to_string())
            .ok_or(CoreError::NoContent)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, CoreError> {
        let model = self.resolve_model(request);
        let url = self.endpoint(&model, &request.api_key)?;

        debug!(
            model = %model,
            mode = ?request.mode,
            prompt_len = request.prompt.len(),
            "생성 API 호출"
        );

        let response = self
            .http_client
            .post(url)
            .json(&Self::request_body(&request.prompt, request.mode))
            .send()
            .await
            .map_err(|e| {
                warn!(model = %model, "생성 API 연결 실패");
                CoreError::Network(format!("생성 API 호출 실패: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("생성 API 응답 읽기 실패: {}", e.without_url())))?;

        let result = Self::interpret_response(status.is_success(), &body);
        match &result {
            Ok(text) => debug!(model = %model, len = text.len(), "생성 완료"),
            Err(e) => warn!(model = %model, status = %status, error = %e, "생성 실패"),
        }
        result
    }
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use sidekick_core::settings::Settings;

    struct FixedSettings(Settings);

    impl SettingsRepository for FixedSettings {
        fn load(&self) -> Result<Option<Settings>, CoreError> {
            Ok(Some(self.0.clone()))
        }
        fn get(&self) -> Settings {
            self.0.clone()
        }
        fn set(&self, _: &Settings) -> Result<(), CoreError> {
            Ok(())
        }
        fn save_api_key(&self, _: &str) -> Result<(), CoreError> {
            Ok(())
        }
        fn reset_templates(&self) -> Result<(), CoreError> {
            Ok(())
        }
    }

    fn client_with_model(base_url: &str, model: &str) -> GeminiClient {
        let mut settings = Settings::default();
        settings.model = model.to_string();
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        GeminiClient::new(&config, Arc::new(FixedSettings(settings))).unwrap()
    }

    fn request(mode: OutputMode) -> GenerationRequest {
        GenerationRequest::new("Summarize this", "test key", mode)
    }

    const PATH_LITE: &str = "/v1beta/models/gemini-2.0-flash-lite:generateContent";

    #[tokio::test]
    async fn returns_trimmed_first_part() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::UrlEncoded("key".into(), "test key".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "Summarize this"}]}],
                "generationConfig": {"maxOutputTokens": 8192, "topK": 32}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"  hello world \n"}]},"finishReason":"STOP"}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let text = client.generate(&request(OutputMode::Full)).await.unwrap();
        assert_eq!(text, "hello world");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn short_mode_uses_small_token_budget() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "generationConfig": {"maxOutputTokens": 800}
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"short"}]}}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        assert_eq!(
            client.generate(&request(OutputMode::Short)).await.unwrap(),
            "short"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn safety_settings_disable_blocking() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "safetySettings": [
                    {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE"},
                    {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        client.generate(&request(OutputMode::Full)).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn model_override_beats_settings() {
        let mut server = mockito::Server::new_async().await;
        let settings_model = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let override_model = server
            .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"pro"}]}}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "gemini-1.5-flash");
        let req = request(OutputMode::Full).with_model(Some("gemini-1.5-pro".to_string()));
        assert_eq!(client.generate(&req).await.unwrap(), "pro");
        override_model.assert_async().await;
        settings_model.assert_async().await;
    }

    #[tokio::test]
    async fn stored_model_used_without_override() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"flash"}]}}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "gemini-1.5-flash");
        assert_eq!(client.generate(&request(OutputMode::Full)).await.unwrap(), "flash");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_candidates_is_no_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::NoContent));
    }

    #[tokio::test]
    async fn safety_finish_reason_is_blocked() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::SafetyBlocked(_)));
    }

    #[tokio::test]
    async fn prompt_block_reason_is_blocked() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        match err {
            CoreError::SafetyBlocked(reason) => assert_eq!(reason, "OTHER"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_error_uses_provider_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key."}}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[tokio::test]
    async fn api_error_without_message_uses_default() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::Api(ref m) if m == "Error generating content"));
    }

    #[tokio::test]
    async fn error_object_with_ok_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_LITE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client = client_with_model(&server.url(), "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::Api(ref m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let client = client_with_model("http://127.0.0.1:1", "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_base_url_is_internal_not_config() {
        let client = client_with_model("not a url", "");
        let err = client.generate(&request(OutputMode::Full)).await.unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
        assert!(!err.to_string().contains("test key"));
    }

    #[test]
    fn missing_text_is_no_content() {
        let body = r#"{"candidates":[{"content":{"parts":[]},"finishReason":"STOP"}]}"#;
        assert!(matches!(
            GeminiClient::interpret_response(true, body),
            Err(CoreError::NoContent)
        ));
    }
}
