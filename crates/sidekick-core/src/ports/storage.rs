//! 설정 저장소 포트.
//!
//! 구현: `sidekick-storage` crate (rusqlite, 메모리)

use crate::error::CoreError;
use crate::settings::Settings;

/// 문자열 키-값 저장소 (동기식)
pub trait KeyValueStore: Send + Sync {
    /// 값 조회 (없으면 None)
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// 값 저장 (기존 값 덮어쓰기)
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// 사용자 설정 저장소
///
/// 모든 쓰기는 레코드 전체를 덮어쓴다 (마지막 쓰기 우선, 병합 없음).
pub trait SettingsRepository: Send + Sync {
    /// 저장된 설정. 없으면 `Ok(None)`, 손상된 blob은 `StorageRead`
    fn load(&self) -> Result<Option<Settings>, CoreError>;

    /// 저장된 설정 또는 기본값 (실패하지 않음)
    fn get(&self) -> Settings;

    /// 설정 전체 저장
    fn set(&self, settings: &Settings) -> Result<(), CoreError>;

    /// API 키 저장 (trim, 빈 키 거부)
    fn save_api_key(&self, key: &str) -> Result<(), CoreError>;

    /// 템플릿을 기본값으로 복원
    fn reset_templates(&self) -> Result<(), CoreError>;
}
