//! # sidekick-pipeline
//!
//! 생성 작업 오케스트레이션.
//! 호스트에서 현재 메일을 읽고, 템플릿으로 프롬프트를 만들어 생성 API를 호출한 뒤
//! 작업별 후처리(TL;DR, 답장 분리, 캘린더 검증)를 거쳐 렌더링 계층에 전달한다.
//!
//! - [`generation`]: 작업 실행 (TL;DR 모드에서는 짧은 호출 → 전체 호출)
//! - [`session`]: 액션당 취소 가능한 태스크와 세대(epoch) 가드
//! - [`calendar_flow`]: 캘린더 추출 상태 머신, 이벤트 여부 분류
//! - [`commands`]: 툴바 명령 버튼 진입점
//! - [`presenter`]: 에러/결과 → 사용자 문구

pub mod calendar_flow;
pub mod commands;
pub mod generation;
pub mod presenter;
pub mod session;
