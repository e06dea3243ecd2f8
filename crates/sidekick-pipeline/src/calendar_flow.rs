//! 캘린더 추출 흐름.
//!
//! ```text
//! Idle → RequestingExtraction → Validated | ExtractionFailed
//! Validated → CreatingAppointment → Created | CreationFailed
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use sidekick_core::calendar;
use sidekick_core::error::CoreError;
use sidekick_core::models::event::AppointmentForm;
use sidekick_core::ports::llm_provider::{GenerationClient, GenerationRequest, OutputMode};
use sidekick_core::ports::mail_host::MailHost;
use sidekick_core::prompt;

/// 캘린더 흐름 상태
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarState {
    Idle,
    RequestingExtraction,
    Validated(AppointmentForm),
    ExtractionFailed(String),
    CreatingAppointment,
    /// 생성된 약속 제목
    Created(String),
    CreationFailed(String),
}

/// 캘린더 추출 상태 머신 (한 번의 액션에 하나)
#[derive(Debug)]
pub struct CalendarFlow {
    state: CalendarState,
}

impl Default for CalendarFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarFlow {
    pub fn new() -> Self {
        Self {
            state: CalendarState::Idle,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// 이벤트 추출 및 검증
    pub async fn extract(
        &mut self,
        client: &dyn GenerationClient,
        api_key: &str,
        subject: &str,
        content: &str,
        title_language: &str,
        reference_date: NaiveDate,
    ) -> Result<AppointmentForm, CoreError> {
        self.state = CalendarState::RequestingExtraction;

        let prompt = calendar::extraction_prompt(subject, content, title_language, reference_date);
        let request = GenerationRequest::new(prompt, api_key, OutputMode::Full);

        let result = match client.generate(&request).await {
            Ok(text) => calendar::extract_appointment(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(form) => {
                debug!(subject = %form.subject, start = %form.start, "이벤트 검증 완료");
                self.state = CalendarState::Validated(form.clone());
                Ok(form)
            }
            Err(e) => {
                warn!(error = %e, "이벤트 추출 실패");
                self.state = CalendarState::ExtractionFailed(e.to_string());
                Err(e)
            }
        }
    }

    /// 검증된 이벤트로 호스트의 새 약속 양식을 연다
    pub fn create(&mut self, host: &dyn MailHost) -> Result<String, CoreError> {
        let form = match std::mem::replace(&mut self.state, CalendarState::CreatingAppointment) {
            CalendarState::Validated(form) => form,
            other => {
                let message = format!("no validated event to create (state: {other:?})");
                self.state = CalendarState::CreationFailed(message.clone());
                return Err(CoreError::Internal(message));
            }
        };

        host.display_new_appointment_form(&form);
        info!(subject = %form.subject, "새 약속 양식 표시");
        self.state = CalendarState::Created(form.subject.clone());
        Ok(form.subject)
    }
}

/// 메일이 캘린더 이벤트인지 짧은 호출로 분류한다.
///
/// 응답이 `true`로 시작하면 참. 호출 실패는 로그만 남기고 `false`.
pub async fn is_calendar_event(
    client: &dyn GenerationClient,
    api_key: &str,
    subject: &str,
    content: &str,
) -> bool {
    let request = GenerationRequest::new(
        prompt::calendar_classifier_prompt(subject, content),
        api_key,
        OutputMode::Short,
    );
    match client.generate(&request).await {
        Ok(answer) => answer.trim().to_ascii_lowercase().starts_with("true"),
        Err(e) => {
            warn!(error = %e, "캘린더 이벤트 분류 실패");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use sidekick_core::models::notification::Notification;

    /// 고정 응답 (None이면 NoContent)
    struct Reply(Option<String>);

    #[async_trait]
    impl GenerationClient for Reply {
        async fn generate(&self, _: &GenerationRequest) -> Result<String, CoreError> {
            self.0.clone().ok_or(CoreError::NoContent)
        }    }

    #[derive(Default)]
    struct FormHost(Mutex<Vec<AppointmentForm>>);

    #[async_trait]
    impl MailHost for FormHost {
        async fn current_item_subject(&self) -> Result<String, CoreError> {
            Ok(String::new())
        }
        async fn current_item_body_as_text(&self) -> Result<String, CoreError> {
            Ok(String::new())
        }
        async fn replace_selected_text_or_insert_at_cursor(&self, _: &str) -> Result<(), CoreError> {
            Ok(())
        }
        fn show_notification(&self, _: &Notification) {}
        fn display_new_appointment_form(&self, form: &AppointmentForm) {
            self.0.lock().push(form.clone());
        }
        fn complete_command(&self) {}
    }

    const EVENT: &str = r#"{"subject":"Kickoff","start":{"dateTime":"2025-05-02T09:00:00"},"end":{"dateTime":"2025-05-02T10:00:00"}}"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn validated_then_created() {
        let client = Reply(Some(EVENT.to_string()));
        let host = FormHost::default();
        let mut flow = CalendarFlow::new();
        assert_eq!(flow.state(), &CalendarState::Idle);

        let form = flow.extract(&client, "k", "s", "c", "en", date()).await.unwrap();
        assert!(matches!(flow.state(), CalendarState::Validated(_)));
        assert_eq!(form.subject, "Kickoff");

        assert_eq!(flow.create(&host).unwrap(), "Kickoff");
        assert_eq!(flow.state(), &CalendarState::Created("Kickoff".to_string()));
        assert_eq!(host.0.lock().len(), 1);
    }

    #[tokio::test]
    async fn invalid_payload_fails_extraction() {
        let client = Reply(Some(r#"{"subject":"x"}"#.to_string()));
        let mut flow = CalendarFlow::new();
        let err = flow.extract(&client, "k", "s", "c", "en", date()).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "start.dateTime"));
        assert!(matches!(flow.state(), CalendarState::ExtractionFailed(_)));
    }

    #[test]
    fn create_without_validation_fails() {
        let host = FormHost::default();
        let mut flow = CalendarFlow::new();
        assert!(flow.create(&host).is_err());
        assert!(matches!(flow.state(), CalendarState::CreationFailed(_)));
        assert!(host.0.lock().is_empty());
    }

    #[tokio::test]
    async fn classifier_reads_true_false_and_swallows_errors() {
        assert!(is_calendar_event(&Reply(Some("True".into())), "k", "s", "c").await);
        assert!(!is_calendar_event(&Reply(Some("false".into())), "k", "s", "c").await);
        assert!(!is_calendar_event(&Reply(None), "k", "s", "c").await);
    }
}
