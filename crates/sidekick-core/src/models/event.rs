//! 캘린더 이벤트 모델.
//!
//! LLM이 반환하는 JSON 이벤트(`EventDetails`)와 호스트의 새 약속 양식에
//! 전달되는 검증된 값(`AppointmentForm`)을 정의한다.
//! 모델 출력은 신뢰할 수 없으므로 모든 필드를 `Option`으로 받고
//! 검증은 [`crate::calendar::validate_event`]에서 수행한다.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// LLM이 추출한 이벤트 JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<EventBody>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub location: Option<EventLocation>,
    #[serde(default)]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(default)]
    pub is_online_meeting: Option<bool>,
}

/// 이벤트 본문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    #[serde(default)]
    pub content: Option<String>,
}

/// 이벤트 시각 (`YYYY-MM-DDTHH:mm:ss`, 타임존 없음)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
}

/// 이벤트 장소
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// 참석자
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default)]
    pub email_address: Option<EmailAddress>,
    /// "required" | "optional" (그 외 값은 필수로 취급)
    #[serde(default, rename = "type")]
    pub attendee_type: Option<String>,
}

impl Attendee {
    /// 선택 참석자 여부
    pub fn is_optional(&self) -> bool {
        self.attendee_type.as_deref() == Some("optional")
    }

    /// 이메일 주소 (없으면 이름)
    pub fn address(&self) -> Option<&str> {
        let email = self.email_address.as_ref()?;
        email
            .address
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| email.name.as_deref().filter(|n| !n.trim().is_empty()))
    }
}

/// 참석자 이메일 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// 호스트 새 약속 양식 입력값 (검증 완료)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub body: String,
    pub required_attendees: Vec<String>,
    pub optional_attendees: Vec<String>,
    pub is_online_meeting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_model_output_with_nulls() {
        let json = r#"{
            "subject": "Design review",
            "body": {"content": "Agenda"},
            "start": {"dateTime": "2025-03-04T10:00:00"},
            "end": {"dateTime": "2025-03-04T11:00:00"},
            "location": null,
            "attendees": [
                {"emailAddress": {"address": "kim@example.com", "name": "Kim"}, "type": "required"},
                {"emailAddress": {"address": "", "name": "Lee"}, "type": "optional"}
            ],
            "isOnlineMeeting": true
        }"#;
        let event: EventDetails = serde_json::from_str(json).unwrap();
        assert_eq!(event.subject.as_deref(), Some("Design review"));
        assert!(event.location.is_none());
        let attendees = event.attendees.unwrap();
        assert_eq!(attendees[0].address(), Some("kim@example.com"));
        assert!(attendees[1].is_optional());
        assert_eq!(attendees[1].address(), Some("Lee"));
        assert_eq!(event.is_online_meeting, Some(true));
    }

    #[test]
    fn unknown_attendee_type_is_required() {
        let a = Attendee {
            email_address: None,
            attendee_type: Some("resource".to_string()),
        };
        assert!(!a.is_optional());
        assert!(a.address().is_none());
    }
}
