//! 파이프라인 통합 테스트용 가짜 포트.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use sidekick_core::error::CoreError;
use sidekick_core::models::event::AppointmentForm;
use sidekick_core::models::notification::Notification;
use sidekick_core::models::result::ResultUpdate;
use sidekick_core::ports::llm_provider::{GenerationClient, GenerationRequest, OutputMode};
use sidekick_core::ports::mail_host::MailHost;
use sidekick_core::ports::renderer::ResultSink;
use sidekick_core::ports::storage::SettingsRepository;
use sidekick_core::settings::Settings;
use sidekick_core::settings_manager::SettingsManager;
use sidekick_pipeline::generation::GenerationPipeline;
use sidekick_storage::memory::MemoryKvStore;

/// 호출/렌더링 순서 기록
pub type EventLog = Arc<Mutex<Vec<String>>>;

// ============================================================
// 생성 클라이언트
// ============================================================

/// 미리 정한 응답을 순서대로 돌려주는 클라이언트 (소진되면 NoContent)
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, CoreError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
    log: EventLog,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, CoreError>>, log: EventLog) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
            log,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn modes(&self) -> Vec<OutputMode> {
        self.requests.lock().iter().map(|r| r.mode).collect()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, CoreError> {
        self.log.lock().push(format!("call:{:?}", request.mode));
        self.requests.lock().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().pop_front();
        next.unwrap_or(Err(CoreError::NoContent))
    }
}

// ============================================================
// 호스트
// ============================================================

pub struct FakeHost {
    pub subject: String,
    pub body: String,
    pub notifications: Mutex<Vec<Notification>>,
    pub inserted: Mutex<Vec<String>>,
    pub forms: Mutex<Vec<AppointmentForm>>,
    pub completed: AtomicUsize,
    log: EventLog,
}

impl FakeHost {
    pub fn new(subject: &str, body: &str, log: EventLog) -> Self {
        Self {
            subject: subject.to_string(),
            body: body.to_string(),
            notifications: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
            forms: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
            log,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.notifications.lock().last().cloned()
    }
}

#[async_trait]
impl MailHost for FakeHost {
    async fn current_item_subject(&self) -> Result<String, CoreError> {
        Ok(self.subject.clone())
    }

    async fn current_item_body_as_text(&self) -> Result<String, CoreError> {
        Ok(self.body.trim().to_string())
    }

    async fn replace_selected_text_or_insert_at_cursor(&self, text: &str) -> Result<(), CoreError> {
        self.inserted.lock().push(text.to_string());
        Ok(())
    }

    fn show_notification(&self, notification: &Notification) {
        self.log.lock().push(format!("notify:{}", notification.id));
        self.notifications.lock().push(notification.clone());
    }

    fn display_new_appointment_form(&self, form: &AppointmentForm) {
        self.forms.lock().push(form.clone());
    }

    fn complete_command(&self) {
        self.log.lock().push("complete".to_string());
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================
// 렌더링
// ============================================================

pub struct RecordingSink {
    pub updates: Mutex<Vec<ResultUpdate>>,
    log: EventLog,
}

impl RecordingSink {
    pub fn new(log: EventLog) -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            log,
        }
    }

    pub fn updates(&self) -> Vec<ResultUpdate> {
        self.updates.lock().clone()
    }
}

impl ResultSink for RecordingSink {
    fn render(&self, update: ResultUpdate) {
        let label = match &update {
            ResultUpdate::Loading(_) => "Loading",
            ResultUpdate::Interim(_) => "Interim",
            ResultUpdate::Complete(_) => "Complete",
            ResultUpdate::Reply(_) => "Reply",
            ResultUpdate::AppointmentCreated(_) => "AppointmentCreated",
            ResultUpdate::SettingsRequired => "SettingsRequired",
            ResultUpdate::Failed(_) => "Failed",
        };
        self.log.lock().push(format!("render:{label}"));
        self.updates.lock().push(update);
    }
}

// ============================================================
// 조립
// ============================================================

pub struct Harness {
    pub log: EventLog,
    pub client: Arc<ScriptedClient>,
    pub host: Arc<FakeHost>,
    pub sink: Arc<RecordingSink>,
    pub settings: Arc<SettingsManager>,
    pub pipeline: Arc<GenerationPipeline>,
}

/// API 키가 설정된 기본 설정으로 조립
pub fn harness(responses: Vec<Result<String, CoreError>>) -> Harness {
    harness_with(responses, |s| s.api_key = "test-key".to_string(), None)
}

pub fn harness_with(
    responses: Vec<Result<String, CoreError>>,
    configure: impl FnOnce(&mut Settings),
    delay: Option<Duration>,
) -> Harness {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));

    let mut client = ScriptedClient::new(responses, log.clone());
    if let Some(delay) = delay {
        client = client.with_delay(delay);
    }
    let client = Arc::new(client);
    let host = Arc::new(FakeHost::new(
        "Quarterly planning",
        "Let's meet next Tuesday at 10am to plan Q3.",
        log.clone(),
    ));
    let sink = Arc::new(RecordingSink::new(log.clone()));

    let settings = Arc::new(SettingsManager::new(Arc::new(MemoryKvStore::new())));
    let mut initial = Settings::default();
    configure(&mut initial);
    settings.set(&initial).expect("settings write");

    let pipeline = Arc::new(
        GenerationPipeline::new(client.clone(), settings.clone(), host.clone())
            .with_reference_date(chrono::NaiveDate::from_ymd_opt(2025, 6, 2).expect("date")),
    );

    Harness {
        log,
        client,
        host,
        sink,
        settings,
        pipeline,
    }
}
