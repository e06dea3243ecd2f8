//! # sidekick-network
//!
//! 생성 API 네트워크 어댑터.
//! [`GenerationClient`](sidekick_core::ports::llm_provider::GenerationClient) 포트를
//! Gemini `generateContent` 엔드포인트 위에 구현한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use sidekick_network::gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new(&config.api, settings_repo)?;
//! let text = client.generate(&request).await?;
//! ```

pub mod gemini_client;
