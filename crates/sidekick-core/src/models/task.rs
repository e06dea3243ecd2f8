//! 생성 작업(액션) 모델.
//!
//! 요약/번역/번역+요약/답장/캘린더 추출을 하나의 태그드 variant로 통합한다.
//! 각 variant는 템플릿 이름과 후처리 전략을 함께 가진다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 생성 결과 후처리 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// 마크다운 결과 그대로 표시 (TL;DR 미리보기 포함)
    Markdown,
    /// 제목/본문 분리
    Reply,
    /// JSON 이벤트 추출 → 약속 양식
    Calendar,
}

/// 사용자가 트리거하는 생성 작업
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GenerationTask {
    #[default]
    Summarize,
    Translate,
    #[serde(rename = "translateSummarize", alias = "translateAndSummarize")]
    TranslateAndSummarize,
    Reply,
    #[serde(rename = "calendar", alias = "extractCalendarEvent")]
    ExtractCalendarEvent,
}

impl GenerationTask {
    /// 모든 작업 목록
    pub const ALL: [GenerationTask; 5] = [
        GenerationTask::Summarize,
        GenerationTask::Translate,
        GenerationTask::TranslateAndSummarize,
        GenerationTask::Reply,
        GenerationTask::ExtractCalendarEvent,
    ];

    /// 설정의 `templates` 맵에서 사용하는 키
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Translate => "translate",
            Self::TranslateAndSummarize => "translateSummarize",
            Self::Reply => "reply",
            Self::ExtractCalendarEvent => "calendar",
        }
    }

    /// 후처리 전략
    pub fn post_process(self) -> PostProcess {
        match self {
            Self::Summarize | Self::Translate | Self::TranslateAndSummarize => {
                PostProcess::Markdown
            }
            Self::Reply => PostProcess::Reply,
            Self::ExtractCalendarEvent => PostProcess::Calendar,
        }
    }

    /// 로딩 중 표시 문구
    pub fn loading_message(self) -> &'static str {
        match self {
            Self::Summarize => "Summarizing email...",
            Self::Translate => "Translating email...",
            Self::TranslateAndSummarize => "Translating and summarizing...",
            Self::Reply => "Generating reply...",
            Self::ExtractCalendarEvent => "Extracting calendar event...",
        }
    }

    /// TL;DR 2단계 생성 대상인지 여부
    pub fn supports_tldr(self) -> bool {
        self.post_process() == PostProcess::Markdown
    }
}

impl fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

impl FromStr for GenerationTask {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "summarize" => Ok(Self::Summarize),
            "translate" => Ok(Self::Translate),
            "translateSummarize" | "translate-summarize" | "translateAndSummarize" => {
                Ok(Self::TranslateAndSummarize)
            }
            "reply" => Ok(Self::Reply),
            "calendar" | "extractCalendarEvent" => Ok(Self::ExtractCalendarEvent),
            other => Err(CoreError::Config(format!("Unknown action: {other}"))),
        }
    }
}

/// 툴바 명령 버튼 액션
///
/// 작업(taskpane과 동일한 파이프라인) 외에, 본문 전체를 번역해
/// 선택 영역에 삽입하는 독립 명령이 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// 파이프라인 작업 실행 후 결과를 알림으로 표시
    Task(GenerationTask),
    /// 본문 전체 번역 → 선택 영역 교체 또는 커서 위치 삽입
    TranslateBody,
}

impl FromStr for CommandAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "translateBody" | "translate-body" => Ok(Self::TranslateBody),
            other => other.parse().map(Self::Task),
        }
    }
}
