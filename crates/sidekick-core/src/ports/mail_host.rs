//! 메일 클라이언트 호스트 포트.
//!
//! 현재 열린 아이템 접근, 알림, 새 약속 양식, 명령 완료 신호를 제공한다.
//! 구현: `sidekick-app`의 콘솔 호스트

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::event::AppointmentForm;
use crate::models::notification::Notification;

/// 호스트 메일 클라이언트
#[async_trait]
pub trait MailHost: Send + Sync {
    /// 현재 아이템 제목
    async fn current_item_subject(&self) -> Result<String, CoreError>;

    /// 현재 아이템 본문 (평문, trim)
    async fn current_item_body_as_text(&self) -> Result<String, CoreError>;

    /// 선택 영역을 교체하거나 커서 위치에 삽입
    async fn replace_selected_text_or_insert_at_cursor(&self, text: &str)
        -> Result<(), CoreError>;

    /// 알림 표시 (같은 ID의 기존 알림은 교체)
    fn show_notification(&self, notification: &Notification);

    /// 새 약속 양식 열기 (fire-and-forget)
    fn display_new_appointment_form(&self, form: &AppointmentForm);

    /// 명령 처리 완료 신호. 명령 호출당 정확히 한 번
    fn complete_command(&self);
}
