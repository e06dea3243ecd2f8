//! Sidekick 도메인 모델.
//!
//! 액션 종류, 캘린더 이벤트, 알림, 결과 뷰 등 크레이트 간 공유되는
//! 데이터 구조체를 정의한다. 대부분 `serde` Serialize/Deserialize를 구현한다.

pub mod event;
pub mod notification;
pub mod result;
pub mod task;
