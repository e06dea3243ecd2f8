//! 렌더링 계층으로 전달되는 결과 뷰 모델.

use serde::{Deserialize, Serialize};

use crate::models::task::GenerationTask;

/// "전체 내용 보기" 컨트롤 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpandState {
    /// 전체 결과 생성 중 (TL;DR만 표시)
    Loading,
    /// 전체 결과 사용 가능
    Enabled,
    /// TL;DR 모드 꺼짐. 전체 결과만 표시
    Hidden,
}

/// 마크다운 결과 뷰
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub task: GenerationTask,
    /// TL;DR 미리보기
    pub tldr: Option<String>,
    /// 전체 결과 (중간 상태에서는 None)
    pub full: Option<String>,
    pub expand: ExpandState,
}

/// 생성된 답장 (제목/본문 분리)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDraft {
    pub subject: String,
    pub body: String,
    /// 항상 `"Subject: {subject}\n\n{body}"`
    pub combined_raw: String,
}

/// 렌더링 계층 업데이트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultUpdate {
    /// 로딩 표시
    Loading(String),
    /// TL;DR 중간 결과 (전체 결과 대기 중)
    Interim(ResultView),
    /// 최종 결과
    Complete(ResultView),
    /// 답장 결과
    Reply(ReplyDraft),
    /// 새 약속 양식이 호스트에 전달됨
    AppointmentCreated(String),
    /// API 키 미설정 (설정 패널 열기)
    SettingsRequired,
    /// 실패. 사용자에게 보여줄 메시지
    Failed(String),
}
