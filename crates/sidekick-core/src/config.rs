//! 애플리케이션 런타임 설정 구조체.
//!
//! 생성 API 엔드포인트, 요청 타임아웃, 설정 저장소 위치, 로그 레벨 등
//! 사용자에게 노출되지 않는 런타임 설정을 정의한다.
//! 사용자 설정(API 키, 템플릿 등)은 [`crate::settings`]를 참조.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 생성 API 설정
    pub api: ApiConfig,
    /// 설정 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================================
// 생성 API 설정
// ============================================================

/// 생성 API 엔드포인트 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API 기본 URL (경로 `/v1beta/models/...`는 클라이언트가 붙인다)
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

// ============================================================
// 저장소 / 로깅 설정
// ============================================================

/// 설정 저장소 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite DB 파일 경로 (None이면 플랫폼 기본 경로)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// 설정 blob이 저장되는 키
    #[serde(default = "default_settings_key")]
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            settings_key: default_settings_key(),
        }
    }
}

/// 로깅 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 기본 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ============================================================
// 기본값 함수
// ============================================================

/// 설정 blob 저장 키 (여러 이름을 거쳐 하나로 통일)
pub const DEFAULT_SETTINGS_KEY: &str = "sidekick_settings";

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_api_timeout_secs() -> u64 {
    60
}
fn default_settings_key() -> String {
    DEFAULT_SETTINGS_KEY.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
