//! 답장 출력 포맷터.
//!
//! 모델이 생성한 답장 텍스트를 제목과 본문으로 분리한다.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::result::ReplyDraft;

/// 제목을 찾지 못했을 때 사용하는 기본 제목
pub const FALLBACK_SUBJECT: &str = "Re: Your email";

static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:SUBJECT:|Subject:)\s*(.+?)(?:\n|$)").expect("valid regex")
});

static SUBJECT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:SUBJECT:|Subject:)\s*.+?(?:\n+|\z)").expect("valid regex")
});

/// 답장 텍스트를 [`ReplyDraft`]로 변환한다.
///
/// `SUBJECT:`(또는 `Subject:`) 줄이 있으면 그 값이 제목이고 해당 줄을 뺀 나머지가 본문이다.
/// 없으면 첫 줄이 제목, 나머지 줄이 본문이다.
pub fn format_reply_output(text: &str) -> ReplyDraft {
    let (subject, body) = split_reply(text);
    let combined_raw = format!("Subject: {subject}\n\n{body}");
    ReplyDraft {
        subject,
        body,
        combined_raw,
    }
}

fn split_reply(text: &str) -> (String, String) {
    if let Some(caps) = SUBJECT_RE.captures(text) {
        let subject = caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let body = SUBJECT_LINE_RE.replace(text, "").trim().to_string();
        return (subject, body);
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (FALLBACK_SUBJECT.to_string(), String::new());
    }

    let mut lines = trimmed.lines();
    let subject = lines.next().unwrap_or_default().trim().to_string();
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    (subject, body)
}
