//! 툴바 명령 버튼 진입점.
//!
//! taskpane 없이 실행되므로 결과는 알림으로만 보여준다.
//! 모든 경로에서 마지막 알림 뒤에 `complete_command()`를 정확히 한 번 호출한다.

use std::sync::Arc;

use tracing::{info, warn};

use sidekick_core::error::CoreError;
use sidekick_core::language;
use sidekick_core::models::notification::Notification;
use sidekick_core::models::result::ResultUpdate;
use sidekick_core::models::task::{CommandAction, GenerationTask};
use sidekick_core::ports::llm_provider::{GenerationRequest, OutputMode};
use sidekick_core::ports::renderer::ResultSink;
use sidekick_core::prompt;
use sidekick_core::settings::DEFAULT_MODEL;

use crate::generation::{ActionOutcome, GenerationPipeline, TldrPolicy};
use crate::presenter::{self, MISSING_API_KEY_MESSAGE};

/// 렌더링 업데이트를 버리는 sink (명령 경로에는 taskpane이 없음)
struct DiscardSink;

impl ResultSink for DiscardSink {
    fn render(&self, _update: ResultUpdate) {}
}

/// 명령 버튼 실행기
pub struct CommandRunner {
    pipeline: Arc<GenerationPipeline>,
}

impl CommandRunner {
    pub fn new(pipeline: Arc<GenerationPipeline>) -> Self {
        Self { pipeline }
    }

    /// 명령 실행. 성공/실패 알림을 띄운 뒤 명령 완료를 알린다.
    pub async fn run(&self, action: CommandAction) -> Result<String, CoreError> {
        let host = self.pipeline.host().clone();

        let result = self.dispatch(action).await;
        match &result {
            Ok(message) => {
                info!(?action, "명령 완료");
                host.show_notification(&Notification::success(message.clone()));
            }
            Err(e) => {
                warn!(?action, error = %e, "명령 실패");
                let message = match e {
                    CoreError::MissingApiKey => MISSING_API_KEY_MESSAGE.to_string(),
                    other => presenter::failure_message(action_label(action), other),
                };
                host.show_notification(&Notification::error(message));
            }
        }

        host.complete_command();
        result
    }

    async fn dispatch(&self, action: CommandAction) -> Result<String, CoreError> {
        match action {
            CommandAction::TranslateBody => self.translate_body().await,
            CommandAction::Task(task) => self.run_task(task).await,
        }
    }

    async fn run_task(&self, task: GenerationTask) -> Result<String, CoreError> {
        if !self.pipeline.settings().get().has_api_key() {
            return Err(CoreError::MissingApiKey);
        }
        self.pipeline
            .host()
            .show_notification(&Notification::processing(task.loading_message()));

        let outcome = self
            .pipeline
            .run(task, &DiscardSink, TldrPolicy::Disabled)
            .await?;

        if let ActionOutcome::Reply(draft) = &outcome {
            self.pipeline
                .host()
                .replace_selected_text_or_insert_at_cursor(&draft.body)
                .await?;
        }
        Ok(presenter::outcome_message(&outcome))
    }

    /// 본문 전체를 기본 언어로 번역해 선택 영역에 넣는다 (고정 모델)
    async fn translate_body(&self) -> Result<String, CoreError> {
        let settings = self.pipeline.settings().get();
        if !settings.has_api_key() {
            return Err(CoreError::MissingApiKey);
        }
        let language = language::display_name(&settings.default_language);
        let host = self.pipeline.host();

        host.show_notification(&Notification::processing(format!(
            "Translating email body to {language}..."
        )));

        let subject = host.current_item_subject().await?;
        let content = host.current_item_body_as_text().await?;

        let request = GenerationRequest::new(
            prompt::translate_body_prompt(&subject, &content, language),
            settings.api_key.clone(),
            OutputMode::Full,
        )
        .with_model(Some(DEFAULT_MODEL.to_string()));
        let translated = self.pipeline.client().generate(&request).await?;

        host.replace_selected_text_or_insert_at_cursor(&translated)
            .await?;

        Ok(format!(
            "Email body translated to {language} and replaced selection/inserted at cursor."
        ))
    }
}

fn action_label(action: CommandAction) -> &'static str {
    match action {
        CommandAction::TranslateBody => "Translation",
        CommandAction::Task(task) => presenter::task_label(task),
    }
}
