//! 콘솔 호스트 어댑터.
//!
//! 메시지 파일을 현재 메일 아이템으로 삼고, 알림/약속 양식/결과를
//! 터미널로 출력한다. 알림은 stderr, 결과는 stdout.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use sidekick_core::calendar::DATE_TIME_FORMAT;
use sidekick_core::error::CoreError;
use sidekick_core::models::event::AppointmentForm;
use sidekick_core::models::notification::{Notification, NotificationKind};
use sidekick_core::models::result::ResultUpdate;
use sidekick_core::ports::mail_host::MailHost;
use sidekick_core::ports::renderer::ResultSink;

use crate::message::MailMessage;

/// 콘솔 `MailHost`
pub struct ConsoleHost {
    message: MailMessage,
    completed: AtomicUsize,
}

impl ConsoleHost {
    pub fn new(message: MailMessage) -> Self {
        Self {
            message,
            completed: AtomicUsize::new(0),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailHost for ConsoleHost {
    async fn current_item_subject(&self) -> Result<String, CoreError> {
        Ok(self.message.subject.clone())
    }

    async fn current_item_body_as_text(&self) -> Result<String, CoreError> {
        Ok(self.message.body.trim().to_string())
    }

    async fn replace_selected_text_or_insert_at_cursor(&self, text: &str) -> Result<(), CoreError> {
        println!("{text}");
        Ok(())
    }

    fn show_notification(&self, notification: &Notification) {
        let tag = match notification.kind {
            NotificationKind::Informational => "info",
            NotificationKind::Error => "error",
        };
        eprintln!("[{tag}] {}", notification.message);
    }

    fn display_new_appointment_form(&self, form: &AppointmentForm) {
        println!("{}", format_appointment(form));
    }

    fn complete_command(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        debug!("명령 완료 신호");
    }
}

/// 약속 양식 출력 형식
pub fn format_appointment(form: &AppointmentForm) -> String {
    let mut out = format!(
        "New appointment\n  Subject:  {}\n  Start:    {}\n  End:      {}",
        form.subject,
        form.start.format(DATE_TIME_FORMAT),
        form.end.format(DATE_TIME_FORMAT)
    );
    if !form.location.is_empty() {
        out.push_str(&format!("\n  Location: {}", form.location));
    }
    if !form.required_attendees.is_empty() {
        out.push_str(&format!("\n  Required: {}", form.required_attendees.join(", ")));
    }
    if !form.optional_attendees.is_empty() {
        out.push_str(&format!("\n  Optional: {}", form.optional_attendees.join(", ")));
    }
    if form.is_online_meeting {
        out.push_str("\n  Online meeting");
    }
    if !form.body.is_empty() {
        out.push_str(&format!("\n\n{}", form.body));
    }
    out
}

/// 콘솔 렌더링 sink
#[derive(Default)]
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn render(&self, update: ResultUpdate) {
        match update {
            ResultUpdate::Loading(message) => eprintln!("{message}"),
            ResultUpdate::Interim(view) => {
                if let Some(tldr) = view.tldr {
                    println!("TL;DR\n{tldr}\n");
                }
                eprintln!("Loading full content...");
            }
            ResultUpdate::Complete(view) => {
                // TL;DR은 중간 결과에서 이미 출력됨
                if let Some(full) = view.full {
                    println!("{full}");
                }
            }
            ResultUpdate::Reply(draft) => println!("{}", draft.combined_raw),
            ResultUpdate::AppointmentCreated(subject) => {
                eprintln!("Appointment form opened: {subject}")
            }
            ResultUpdate::SettingsRequired => {
                eprintln!("API key is not set. Run `sidekick set-key <KEY>` first.")
            }
            ResultUpdate::Failed(message) => eprintln!("{message}"),
        }
    }
}
