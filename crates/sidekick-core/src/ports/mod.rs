//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `sidekick-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 네트워크/호스트 경계는 `async_trait`을 사용하고,
//! 동기식 키-값 저장소와 렌더링 경계는 일반 trait이다.

pub mod llm_provider;
pub mod mail_host;
pub mod renderer;
pub mod storage;
