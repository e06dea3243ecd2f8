//! 캘린더 이벤트 추출 및 검증.
//!
//! 모델에게 고정 스키마의 JSON 객체만 출력하도록 요청하고,
//! 응답에서 JSON 블록을 꺼내 [`EventDetails`]로 파싱한 뒤
//! 호스트 약속 양식에 넘길 [`AppointmentForm`]으로 검증한다.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CoreError;
use crate::language;
use crate::models::event::{AppointmentForm, EventDetails, EventTime};

/// 이벤트 시각 형식 (타임존 없음)
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("valid regex"));

const EVENT_SCHEMA: &str = r#"{
  "subject": "string",
  "body": { "content": "string" },
  "start": { "dateTime": "YYYY-MM-DDTHH:mm:ss" },
  "end": { "dateTime": "YYYY-MM-DDTHH:mm:ss" },
  "location": { "displayName": "string" },
  "attendees": [
    { "emailAddress": { "address": "string", "name": "string" }, "type": "required | optional" }
  ],
  "isOnlineMeeting": false
}"#;

// ============================================================
// 프롬프트
// ============================================================

/// 이벤트 제목 작성 지침 (제목 언어별)
fn title_instructions(title_language: &str) -> String {
    match title_language.trim().to_ascii_lowercase().as_str() {
        "en" => "Write the event subject in English as a short noun phrase \
(for example \"Project kickoff meeting\"). Do not include dates or times in the subject."
            .to_string(),
        "ko" => "Write the event subject in Korean as a short noun phrase ending with the event type \
(for example \"프로젝트 킥오프 회의\"). Do not include dates or times in the subject."
            .to_string(),
        "ja" => "Write the event subject in Japanese as a short noun phrase \
(for example \"プロジェクト開始会議\"). Do not include dates or times in the subject."
            .to_string(),
        "zh" | "zh_cn" | "zh-cn" => "Write the event subject in Simplified Chinese as a short noun phrase \
(for example \"项目启动会议\"). Do not include dates or times in the subject."
            .to_string(),
        other => format!(
            "Write the event subject in {} as a short noun phrase. \
Do not include dates or times in the subject.",
            language::display_name(other)
        ),
    }
}

/// 이벤트 추출 프롬프트
///
/// `reference_date`는 "내일", "다음 주 화요일" 같은 상대 표현의 기준일이다.
pub fn extraction_prompt(
    subject: &str,
    content: &str,
    title_language: &str,
    reference_date: NaiveDate,
) -> String {
    format!(
        "You extract calendar events from emails. Emit ONLY a JSON object, with no markdown fences \
and no commentary, matching this schema:\n{EVENT_SCHEMA}\n\n\
Rules:\n\
- Today's date is {reference}. Resolve relative dates against it.\n\
- start.dateTime and end.dateTime MUST use the format YYYY-MM-DDTHH:mm:ss with no timezone.\n\
- If no end time is given, assume the event lasts one hour.\n\
- Use \"optional\" only for attendees explicitly marked optional; everyone else is \"required\".\n\
- {title}\n\n\
Email subject: {subject}\n\nEmail content:\n{content}",
        reference = reference_date.format("%Y-%m-%d"),
        title = title_instructions(title_language),
    )
}

// ============================================================
// 파싱 / 검증
// ============================================================

/// 응답에서 첫 `{`부터 마지막 `}`까지의 블록
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// 응답 텍스트를 [`EventDetails`]로 파싱
pub fn parse_event(text: &str) -> Result<EventDetails, CoreError> {
    let block = extract_json_block(text)
        .ok_or_else(|| CoreError::validation("json", "no JSON object found in response"))?;
    serde_json::from_str(block)
        .map_err(|e| CoreError::validation("json", format!("malformed event JSON: {e}")))
}

/// 필수 필드를 검증하고 약속 양식으로 변환한다.
///
/// 검사 순서: `subject` → `start.dateTime` → `end.dateTime`.
/// 시작/종료 순서는 검사하지 않는다.
pub fn validate_event(event: &EventDetails) -> Result<AppointmentForm, CoreError> {
    let subject = event
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::validation("subject", "missing or empty"))?;

    let start = parse_date_time("start.dateTime", event.start.as_ref())?;
    let end = parse_date_time("end.dateTime", event.end.as_ref())?;

    let mut required_attendees = Vec::new();
    let mut optional_attendees = Vec::new();
    for attendee in event.attendees.iter().flatten() {
        let Some(address) = attendee.address() else {
            continue;
        };
        if attendee.is_optional() {
            optional_attendees.push(address.to_string());
        } else {
            required_attendees.push(address.to_string());
        }
    }

    Ok(AppointmentForm {
        subject: subject.to_string(),
        start,
        end,
        location: event
            .location
            .as_ref()
            .and_then(|l| l.display_name.clone())
            .unwrap_or_default(),
        body: event
            .body
            .as_ref()
            .and_then(|b| b.content.clone())
            .unwrap_or_default(),
        required_attendees,
        optional_attendees,
        is_online_meeting: event.is_online_meeting.unwrap_or(false),
    })
}

/// 응답 텍스트 → 검증된 약속 양식
pub fn extract_appointment(text: &str) -> Result<AppointmentForm, CoreError> {
    validate_event(&parse_event(text)?)
}

fn parse_date_time(field: &str, time: Option<&EventTime>) -> Result<NaiveDateTime, CoreError> {
    let raw = time
        .and_then(|t| t.date_time.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::validation(field, "missing"))?;

    if !DATE_TIME_RE.is_match(raw) {
        return Err(CoreError::validation(
            field,
            format!("'{raw}' does not match YYYY-MM-DDTHH:mm:ss"),
        ));
    }

    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).map_err(|_| {
        CoreError::validation(field, format!("'{raw}' is not a valid date and time"))
    })
}
