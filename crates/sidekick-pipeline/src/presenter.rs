//! 결과 프레젠터.
//!
//! 에러와 작업 결과를 사용자에게 보여줄 한 줄 문구로 변환한다.

use sidekick_core::error::CoreError;
use sidekick_core::models::task::GenerationTask;
use sidekick_core::tldr::extract_tldr;

use crate::generation::ActionOutcome;

/// API 키 미설정 안내
pub const MISSING_API_KEY_MESSAGE: &str =
    "Please set up your Gemini API key in the Sidekick settings first.";

/// 에러 → 사용자 문구
///
/// 내부 variant의 상세 메시지는 로그에만 남기고 여기서는 영어 안내만 준다.
pub fn present_error(err: &CoreError) -> String {
    match err {
        e if e.is_user_facing() => e.to_string(),
        CoreError::Cancelled => "The action was cancelled.".to_string(),
        CoreError::Network(_) => {
            "Could not reach the Gemini API. Check your connection and try again.".to_string()
        }
        CoreError::Storage(_) | CoreError::StorageRead(_) => {
            "Could not access Sidekick settings.".to_string()
        }
        CoreError::Serialization(_) => "Received an unexpected response.".to_string(),
        _ => "An unexpected error occurred.".to_string(),
    }
}

/// 실패 알림 문구 (작업 이름 포함)
pub fn failure_message(task_label: &str, err: &CoreError) -> String {
    format!("{task_label} failed: {}", present_error(err))
}

/// 작업 표시 이름
pub fn task_label(task: GenerationTask) -> &'static str {
    match task {
        GenerationTask::Summarize => "Summary",
        GenerationTask::Translate => "Translation",
        GenerationTask::TranslateAndSummarize => "Translation and summary",
        GenerationTask::Reply => "Reply",
        GenerationTask::ExtractCalendarEvent => "Calendar extraction",
    }
}

/// 명령 완료 알림 문구
///
/// 마크다운 결과는 TL;DR을, 답장은 제목을, 약속은 제목을 보여준다.
pub fn outcome_message(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Markdown(view) => {
            let preview = view
                .tldr
                .clone()
                .or_else(|| view.full.as_deref().map(extract_tldr))
                .unwrap_or_default();
            format!("{}: {}", task_label(view.task), preview)
        }
        ActionOutcome::Reply(draft) => format!("Reply drafted: {}", draft.subject),
        ActionOutcome::Appointment(form) => format!("Appointment form opened: {}", form.subject),
    }
}
