//! 호스트 알림 모델.

use serde::{Deserialize, Serialize};

/// 처리 중 알림 ID
pub const PROCESSING_NOTIFICATION_ID: &str = "ProcessingNotification";
/// 완료 알림 ID
pub const ACTION_COMPLETE_NOTIFICATION_ID: &str = "ActionCompleteNotification";
/// 에러 알림 ID
pub const ACTION_ERROR_NOTIFICATION_ID: &str = "ActionErrorNotification";

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Informational,
    Error,
}

/// 메일 아이템에 표시되는 알림 (같은 ID는 교체된다)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub persistent: bool,
}

impl Notification {
    /// 비영구 "처리 중" 알림
    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            id: PROCESSING_NOTIFICATION_ID.to_string(),
            kind: NotificationKind::Informational,
            message: message.into(),
            persistent: false,
        }
    }

    /// 영구 성공 알림
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            id: ACTION_COMPLETE_NOTIFICATION_ID.to_string(),
            kind: NotificationKind::Informational,
            message: message.into(),
            persistent: true,
        }
    }

    /// 영구 에러 알림
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: ACTION_ERROR_NOTIFICATION_ID.to_string(),
            kind: NotificationKind::Error,
            message: message.into(),
            persistent: true,
        }
    }
}
