//! 생성 파이프라인.
//!
//! 프롬프트 빌더 → 생성 클라이언트 → 작업별 후처리 → 렌더링.
//! TL;DR 모드에서는 짧은 호출 결과를 먼저 렌더링한 뒤에 전체 호출을 보낸다.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use sidekick_core::error::CoreError;
use sidekick_core::language;
use sidekick_core::models::event::AppointmentForm;
use sidekick_core::models::result::{ExpandState, ReplyDraft, ResultUpdate, ResultView};
use sidekick_core::models::task::{GenerationTask, PostProcess};
use sidekick_core::ports::llm_provider::{GenerationClient, GenerationRequest, OutputMode};
use sidekick_core::ports::mail_host::MailHost;
use sidekick_core::ports::renderer::ResultSink;
use sidekick_core::ports::storage::SettingsRepository;
use sidekick_core::prompt::{self, PromptVars};
use sidekick_core::reply::format_reply_output;
use sidekick_core::settings::Settings;

use crate::calendar_flow::CalendarFlow;
use crate::presenter;

/// 작업 실행 결과
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Markdown(ResultView),
    Reply(ReplyDraft),
    Appointment(AppointmentForm),
}

/// TL;DR 단계 사용 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TldrPolicy {
    /// 설정의 `tldrMode`를 따른다
    FromSettings,
    /// 항상 단일 호출
    Disabled,
}

/// 현재 메일 아이템 (호출 시점에 읽음)
struct MailItem {
    subject: String,
    content: String,
}

/// 생성 파이프라인
pub struct GenerationPipeline {
    client: Arc<dyn GenerationClient>,
    settings: Arc<dyn SettingsRepository>,
    host: Arc<dyn MailHost>,
    reference_date: Option<NaiveDate>,
}

impl GenerationPipeline {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        settings: Arc<dyn SettingsRepository>,
        host: Arc<dyn MailHost>,
    ) -> Self {
        Self {
            client,
            settings,
            host,
            reference_date: None,
        }
    }

    /// 캘린더 프롬프트의 기준일 고정 (기본값은 오늘)
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn client(&self) -> &Arc<dyn GenerationClient> {
        &self.client
    }

    pub fn settings(&self) -> &Arc<dyn SettingsRepository> {
        &self.settings
    }

    pub fn host(&self) -> &Arc<dyn MailHost> {
        &self.host
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// 작업을 실행하고 실패도 렌더링한다.
    ///
    /// API 키가 없으면 `SettingsRequired`, 그 외 에러는 `Failed`로 전달된다.
    pub async fn execute(
        &self,
        task: GenerationTask,
        sink: &dyn ResultSink,
    ) -> Result<ActionOutcome, CoreError> {
        let result = self.run(task, sink, TldrPolicy::FromSettings).await;
        if let Err(e) = &result {
            match e {
                CoreError::MissingApiKey => sink.render(ResultUpdate::SettingsRequired),
                CoreError::Cancelled => {}
                other => {
                    warn!(task = %task, error = %other, "작업 실패");
                    sink.render(ResultUpdate::Failed(presenter::failure_message(
                        presenter::task_label(task),
                        other,
                    )));
                }
            }
        }
        result
    }

    /// 작업 실행 (에러는 렌더링하지 않고 반환)
    pub async fn run(
        &self,
        task: GenerationTask,
        sink: &dyn ResultSink,
        tldr: TldrPolicy,
    ) -> Result<ActionOutcome, CoreError> {
        let settings = self.settings.get();
        if !settings.has_api_key() {
            warn!(task = %task, "API 키 미설정");
            return Err(CoreError::MissingApiKey);
        }

        info!(task = %task, "작업 시작");
        sink.render(ResultUpdate::Loading(task.loading_message().to_string()));

        let item = self.read_item().await?;

        match task.post_process() {
            PostProcess::Markdown => {
                let use_tldr = tldr == TldrPolicy::FromSettings && settings.tldr_mode;
                self.run_markdown(task, &settings, &item, use_tldr, sink)
                    .await
                    .map(ActionOutcome::Markdown)
            }
            PostProcess::Reply => self
                .run_reply(&settings, &item, sink)
                .await
                .map(ActionOutcome::Reply),
            PostProcess::Calendar => self
                .run_calendar(&settings, &item, sink)
                .await
                .map(ActionOutcome::Appointment),
        }
    }

    /// 현재 아이템이 캘린더 이벤트인지 분류 (실패는 false)
    pub async fn detect_calendar_event(&self) -> bool {
        let settings = self.settings.get();
        if !settings.has_api_key() {
            return false;
        }
        match self.read_item().await {
            Ok(item) => {
                crate::calendar_flow::is_calendar_event(
                    self.client.as_ref(),
                    &settings.api_key,
                    &item.subject,
                    &item.content,
                )
                .await
            }
            Err(e) => {
                warn!(error = %e, "메일 읽기 실패");
                false
            }
        }
    }

    async fn read_item(&self) -> Result<MailItem, CoreError> {
        let subject = self.host.current_item_subject().await?;
        let content = self.host.current_item_body_as_text().await?;
        Ok(MailItem { subject, content })
    }

    async fn run_markdown(
        &self,
        task: GenerationTask,
        settings: &Settings,
        item: &MailItem,
        use_tldr: bool,
        sink: &dyn ResultSink,
    ) -> Result<ResultView, CoreError> {
        let vars = PromptVars {
            subject: &item.subject,
            content: &item.content,
            language: language::display_name(&settings.default_language),
        };

        let tldr = if use_tldr {
            let tldr_prompt = prompt::build(&prompt::template_for(settings, "tldr"), &vars);
            // 짧은 응답이 곧 TL;DR (재파싱하지 않음)
            let tldr = self
                .generate(tldr_prompt, settings, None, OutputMode::Short)
                .await?;
            debug!(task = %task, len = tldr.len(), "TL;DR 생성 완료");
            sink.render(ResultUpdate::Interim(ResultView {
                task,
                tldr: Some(tldr.clone()),
                full: None,
                expand: ExpandState::Loading,
            }));
            Some(tldr)
        } else {
            None
        };

        let full_prompt = prompt::build(&prompt::template_for(settings, task.template_name()), &vars);
        let full = self
            .generate(full_prompt, settings, None, OutputMode::Full)
            .await?;

        let view = ResultView {
            task,
            expand: if tldr.is_some() {
                ExpandState::Enabled
            } else {
                ExpandState::Hidden
            },
            tldr,
            full: Some(full),
        };
        sink.render(ResultUpdate::Complete(view.clone()));
        Ok(view)
    }

    async fn run_reply(
        &self,
        settings: &Settings,
        item: &MailItem,
        sink: &dyn ResultSink,
    ) -> Result<ReplyDraft, CoreError> {
        let vars = PromptVars {
            subject: &item.subject,
            content: &item.content,
            language: language::display_name(&settings.default_language),
        };
        let reply_prompt = prompt::build(&prompt::template_for(settings, "reply"), &vars);
        let model = settings.reply_model().map(str::to_string);
        let text = self
            .generate(reply_prompt, settings, model, OutputMode::Full)
            .await?;

        let draft = format_reply_output(&text);
        sink.render(ResultUpdate::Reply(draft.clone()));
        Ok(draft)
    }

    async fn run_calendar(
        &self,
        settings: &Settings,
        item: &MailItem,
        sink: &dyn ResultSink,
    ) -> Result<AppointmentForm, CoreError> {
        let mut flow = CalendarFlow::new();
        let form = flow
            .extract(
                self.client.as_ref(),
                &settings.api_key,
                &item.subject,
                &item.content,
                &settings.event_title_language,
                self.reference_date(),
            )
            .await?;
        let subject = flow.create(self.host.as_ref())?;
        sink.render(ResultUpdate::AppointmentCreated(subject));
        Ok(form)
    }

    async fn generate(
        &self,
        prompt: String,
        settings: &Settings,
        model_override: Option<String>,
        mode: OutputMode,
    ) -> Result<String, CoreError> {
        let request =
            GenerationRequest::new(prompt, settings.api_key.clone(), mode).with_model(model_override);
        self.client.generate(&request).await
    }
}
