//! # sidekick-app
//!
//! Sidekick CLI 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 어댑터 조립(DI) 후 하위 명령을 실행한다.
//! 메일 아이템은 `Subject:` 줄을 가진 텍스트 파일로 대신한다.

mod console_host;
mod message;
mod settings_cli;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use sidekick_core::config::AppConfig;
use sidekick_core::config_manager::ConfigManager;
use sidekick_core::models::task::{CommandAction, GenerationTask};
use sidekick_core::ports::llm_provider::GenerationClient;
use sidekick_core::ports::mail_host::MailHost;
use sidekick_core::ports::storage::{KeyValueStore, SettingsRepository};
use sidekick_core::settings_manager::SettingsManager;
use sidekick_network::gemini_client::GeminiClient;
use sidekick_pipeline::commands::CommandRunner;
use sidekick_pipeline::generation::GenerationPipeline;
use sidekick_pipeline::session::ActionSession;
use sidekick_storage::sqlite::SqliteKvStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::console_host::{ConsoleHost, ConsoleSink};
use crate::message::MailMessage;

/// Sidekick: Gemini 기반 메일 요약/번역/답장/일정 추출 도우미
#[derive(Parser, Debug)]
#[command(name = "sidekick")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 데이터 저장 경로 (기본: 플랫폼별 데이터 디렉토리)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error). 미지정 시 설정 파일 값
    #[arg(long, short = 'l', global = true)]
    log_level: Option<String>,

    /// 런타임 설정 파일 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 생성 API 기본 URL 덮어쓰기
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// taskpane 액션 실행 (summarize, translate, translateSummarize, reply, calendar)
    Run {
        action: String,
        /// 메일 파일 (첫 `Subject:` 줄이 제목)
        #[arg(long, short = 'm')]
        message: PathBuf,
    },
    /// 명령 버튼 실행 (위 액션 + translateBody)
    Command {
        action: String,
        #[arg(long, short = 'm')]
        message: PathBuf,
    },
    /// 메일이 일정 관련인지 판별
    DetectEvent {
        #[arg(long, short = 'm')]
        message: PathBuf,
    },
    /// 메일 아이템 변경 시뮬레이션 (자동 실행 설정 반영)
    Open {
        #[arg(long, short = 'm')]
        message: PathBuf,
    },
    /// API 키 저장
    SetKey { key: String },
    /// 현재 설정 출력 (API 키 마스킹)
    ShowSettings,
    /// 템플릿을 기본값으로 되돌림
    ResetTemplates,
    /// 설정 필드 하나 변경 (예: `set theme dark`, `set template.reply "..."`)
    Set { field: String, value: String },
}

/// 데이터베이스 경로 결정
///
/// 우선순위: `--data-dir` → 설정 파일의 `storage.db_path` → 플랫폼 기본 경로
fn resolve_db_path(data_dir: Option<&str>, config: &AppConfig) -> PathBuf {
    data_dir
        .map(|d| PathBuf::from(d).join("sidekick.db"))
        .or_else(|| config.storage.db_path.clone())
        .or_else(|| {
            ProjectDirs::from("com", "sidekick", "sidekick")
                .map(|p| p.data_dir().join("sidekick.db"))
        })
        .unwrap_or_else(|| PathBuf::from("./sidekick.db"))
}

fn init_tracing(level: &str) {
    let filter = format!(
        "sidekick_app={level},sidekick_core={level},sidekick_network={level},\
         sidekick_storage={level},sidekick_pipeline={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_message(path: &Path) -> Result<MailMessage> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("메일 파일 읽기 실패: {}", path.display()))?;
    Ok(MailMessage::parse(&text))
}

fn open_settings(db_path: &Path, config: &AppConfig) -> Result<Arc<SettingsManager>> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("데이터 디렉토리 생성 실패: {}", parent.display()))?;
        }
    }
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::open(db_path)?);
    Ok(Arc::new(SettingsManager::with_key(
        store,
        config.storage.settings_key.clone(),
    )))
}

/// 어댑터 조립
fn build_pipeline(
    config: &AppConfig,
    settings: Arc<SettingsManager>,
    host: Arc<ConsoleHost>,
) -> Result<Arc<GenerationPipeline>> {
    let settings: Arc<dyn SettingsRepository> = settings;
    let client: Arc<dyn GenerationClient> =
        Arc::new(GeminiClient::new(&config.api, settings.clone())?);
    let host: Arc<dyn MailHost> = host;
    Ok(Arc::new(GenerationPipeline::new(client, settings, host)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.get();
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level);

    let db_path = resolve_db_path(args.data_dir.as_deref(), &config);
    info!(
        config = %config_manager.config_path().display(),
        db = %db_path.display(),
        "Sidekick 시작"
    );
    let settings = open_settings(&db_path, &config)?;

    match args.command {
        Command::Run { action, message } => {
            let task: GenerationTask = action.parse()?;
            let host = Arc::new(ConsoleHost::new(load_message(&message)?));
            let pipeline = build_pipeline(&config, settings, host)?;
            let session = ActionSession::new(pipeline, Arc::new(ConsoleSink));
            session
                .start(task)
                .wait()
                .await
                .map_err(|e| anyhow!("{task} 실패: {e}"))?;
        }
        Command::Command { action, message } => {
            let action: CommandAction = action.parse()?;
            let host = Arc::new(ConsoleHost::new(load_message(&message)?));
            let pipeline = build_pipeline(&config, settings, host.clone())?;
            let result = CommandRunner::new(pipeline).run(action).await;
            debug!(completed = host.completed_count(), "명령 종료");
            result?;
        }
        Command::DetectEvent { message } => {
            let host = Arc::new(ConsoleHost::new(load_message(&message)?));
            let pipeline = build_pipeline(&config, settings, host)?;
            println!("{}", pipeline.detect_calendar_event().await);
        }
        Command::Open { message } => {
            let host = Arc::new(ConsoleHost::new(load_message(&message)?));
            let pipeline = build_pipeline(&config, settings, host)?;
            let session = ActionSession::new(pipeline, Arc::new(ConsoleSink));
            match session.on_item_changed() {
                Some(handle) => {
                    let task = handle.task();
                    handle
                        .wait()
                        .await
                        .map_err(|e| anyhow!("{task} 실패: {e}"))?;
                }
                None => info!("자동 실행 꺼짐 또는 API 키 없음"),
            }
        }
        Command::SetKey { key } => {
            settings.save_api_key(&key)?;
            println!("Settings saved successfully!");
        }
        Command::ShowSettings => {
            println!("{}", settings_cli::masked_settings_json(&settings.get())?);
        }
        Command::ResetTemplates => {
            settings.reset_templates()?;
            println!("Templates reset to defaults.");
        }
        Command::Set { field, value } => {
            let mut current = settings.get();
            settings_cli::apply_setting(&mut current, &field, &value)?;
            settings.set(&current)?;
            println!("{field} updated.");
        }
    }

    Ok(())
}
