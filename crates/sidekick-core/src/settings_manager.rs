//! 사용자 설정 관리자.
//!
//! [`KeyValueStore`] 위에서 설정 레코드를 단일 JSON blob으로 읽고 쓴다.
//! 읽기 실패는 호출부에 `Result`로 드러나고, [`SettingsRepository::get`]만
//! 기본값으로 복구하는 정책을 가진다.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DEFAULT_SETTINGS_KEY;
use crate::error::CoreError;
use crate::ports::storage::{KeyValueStore, SettingsRepository};
use crate::settings::Settings;

/// 키-값 저장소 기반 설정 저장소
#[derive(Clone)]
pub struct SettingsManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SettingsManager {
    /// 기본 키(`sidekick_settings`)로 생성
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_SETTINGS_KEY)
    }

    /// 지정된 키로 생성
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// 읽기-수정-쓰기 (레코드 전체 저장)
    pub fn update_with<F>(&self, updater: F) -> Result<Settings, CoreError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.get();
        updater(&mut settings);
        self.set(&settings)?;
        Ok(settings)
    }
}

impl SettingsRepository for SettingsManager {
    fn load(&self) -> Result<Option<Settings>, CoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::StorageRead(e.to_string()))
    }

    fn get(&self) -> Settings {
        match self.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!(key = %self.key, "저장된 설정 없음, 기본값 사용");
                Settings::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "설정 읽기 실패, 기본값과 기본 템플릿으로 복구");
                Settings::default()
            }
        }
    }

    fn set(&self, settings: &Settings) -> Result<(), CoreError> {
        let raw = serde_json::to_string(settings)?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, "설정 저장 완료");
        Ok(())
    }

    fn save_api_key(&self, key: &str) -> Result<(), CoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::Config("Please enter a valid API key".to_string()));
        }
        self.update_with(|s| s.api_key = key.to_string())?;
        info!("API 키 저장 완료");
        Ok(())
    }

    fn reset_templates(&self) -> Result<(), CoreError> {
        self.update_with(Settings::reset_templates)?;
        info!("템플릿 기본값 복원");
        Ok(())
    }
}
