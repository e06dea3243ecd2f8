//! # sidekick-core
//!
//! Sidekick 도메인 모델, 포트(trait) 정의, 에러 타입과
//! 네트워크/호스트에 의존하지 않는 순수 로직(프롬프트, TL;DR, 답장, 캘린더).
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`] / [`config_manager`]: 런타임 설정과 설정 파일 관리
//! - [`settings`] / [`settings_manager`]: 사용자 설정 레코드와 저장소
//! - [`prompt`], [`tldr`], [`reply`], [`calendar`]: 생성 전후 처리

pub mod calendar;
pub mod config;
pub mod config_manager;
pub mod error;
pub mod language;
pub mod models;
pub mod ports;
pub mod prompt;
pub mod reply;
pub mod settings;
pub mod settings_manager;
pub mod tldr;
