//! 런타임 설정 파일 로드.
//!
//! `config.json`에서 [`AppConfig`]를 읽는다. 파일이 없으면 기본값으로 만들어 둔다.

use crate::config::AppConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.json";

/// 로드된 런타임 설정과 그 파일 경로
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// 플랫폼 설정 디렉토리의 `config.json`
    pub fn new() -> Result<Self, CoreError> {
        let dirs = ProjectDirs::from("com", "sidekick", "sidekick").ok_or_else(|| {
            CoreError::Config("홈 디렉토리를 찾을 수 없습니다".to_string())
        })?;
        Self::with_path(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// 지정된 경로의 설정 파일
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| {
                CoreError::Config(format!("설정 파일 읽기 실패: {}: {e}", config_path.display()))
            })?;
            let config = serde_json::from_str(&content).map_err(|e| {
                CoreError::Config(format!("설정 파일 파싱 실패: {}: {e}", config_path.display()))
            })?;
            debug!("설정 파일 로드: {}", config_path.display());
            config
        } else {
            let config = AppConfig::default_config();
            write_default(&config_path, &config)?;
            info!("기본 설정 파일 생성: {}", config_path.display());
            config
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 현재 설정 (복제본)
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn write_default(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CoreError::Config(format!("설정 디렉토리 생성 실패: {}: {e}", parent.display()))
        })?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| {
        CoreError::Config(format!("설정 파일 저장 실패: {}: {e}", path.display()))
    })
}
