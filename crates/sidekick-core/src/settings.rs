//! 사용자 설정 레코드.
//!
//! 설치당 하나의 레코드가 키-값 저장소에 단일 JSON blob으로 저장된다.
//! 필드 이름은 기존 blob과의 호환을 위해 camelCase이며,
//! 불리언 필드는 `"true"`/`"false"` 문자열로 직렬화된다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::task::GenerationTask;
use crate::prompt;

/// 기본 생성 모델
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// UI 테마
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// 결과 글꼴 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// 사용자 설정
///
/// 필드는 하나씩 관대하게 읽는다. 알 수 없는 값이나 `null`은 그 필드만
/// 기본값으로 바뀌고, 나머지 필드(특히 API 키)는 그대로 유지된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 생성 API 키 (모든 생성 호출에 필수)
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub api_key: String,
    /// 기본 생성 모델
    #[serde(default = "default_model", deserialize_with = "lenient::model")]
    pub model: String,
    /// 답장 전용 모델 (비어 있으면 기본 모델)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    pub reply_model: Option<String>,
    /// 결과 언어 코드
    #[serde(default = "default_language", deserialize_with = "lenient::language")]
    pub default_language: String,
    /// 캘린더 이벤트 제목 언어 코드
    #[serde(
        default = "default_event_title_language",
        deserialize_with = "lenient::event_title_language"
    )]
    pub event_title_language: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub theme: Theme,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub font_size: FontSize,
    /// TL;DR 미리보기 후 전체 결과 생성
    #[serde(
        default = "default_true",
        serialize_with = "bool_string::serialize",
        deserialize_with = "bool_string::deserialize_on"
    )]
    pub tldr_mode: bool,
    /// 답장 버튼 표시
    #[serde(
        default = "default_true",
        serialize_with = "bool_string::serialize",
        deserialize_with = "bool_string::deserialize_on"
    )]
    pub show_reply: bool,
    /// 아이템 변경 시 자동 실행
    #[serde(
        default,
        serialize_with = "bool_string::serialize",
        deserialize_with = "bool_string::deserialize_off"
    )]
    pub autorun: bool,
    /// 자동 실행할 작업
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub autorun_option: GenerationTask,
    /// 작업 이름 → 템플릿 (없으면 내장 기본값)
    #[serde(default, deserialize_with = "lenient::templates")]
    pub templates: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            reply_model: None,
            default_language: default_language(),
            event_title_language: default_event_title_language(),
            theme: Theme::default(),
            font_size: FontSize::default(),
            tldr_mode: true,
            show_reply: true,
            autorun: false,
            autorun_option: GenerationTask::default(),
            templates: prompt::default_templates(),
        }
    }
}

impl Settings {
    /// API 키 설정 여부
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// 비어 있지 않은 답장 모델
    pub fn reply_model(&self) -> Option<&str> {
        self.reply_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// 비어 있지 않은 기본 모델
    pub fn stored_model(&self) -> Option<&str> {
        Some(self.model.trim()).filter(|m| !m.is_empty())
    }

    /// 이름에 해당하는 템플릿 (사용자 값이 비어 있으면 내장 기본값)
    pub fn template(&self, name: &str) -> String {
        self.templates
            .get(name)
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| prompt::default_template(name).to_string())
    }

    /// 템플릿을 내장 기본값으로 초기화
    pub fn reset_templates(&mut self) {
        self.templates = prompt::default_templates();
    }
}

fn default_true() -> bool {
    true
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_language() -> String {
    "ko".to_string()
}
fn default_event_title_language() -> String {
    "en".to_string()
}

/// 불리언 ↔ `"true"`/`"false"` 문자열 (읽기 시 JSON bool도 허용)
mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    fn parse<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
            _ => None,
        })
    }

    /// 읽을 수 없는 값은 `true`
    pub fn deserialize_on<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(parse(deserializer)?.unwrap_or(true))
    }

    /// 읽을 수 없는 값은 `false`
    pub fn deserialize_off<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(parse(deserializer)?.unwrap_or(false))
    }
}

/// 필드 단위 관대한 읽기
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    /// 타입이 맞지 않으면 `Default`
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).unwrap_or_default())
    }

    fn text_or<'de, D: Deserializer<'de>>(
        deserializer: D,
        fallback: fn() -> String,
    ) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            _ => fallback(),
        })
    }

    pub fn model<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text_or(deserializer, super::default_model)
    }

    pub fn language<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text_or(deserializer, super::default_language)
    }

    pub fn event_title_language<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<String, D::Error> {
        text_or(deserializer, super::default_event_title_language)
    }

    /// 문자열이 아닌 템플릿 항목은 버린다
    pub fn templates<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(name, value)| match value {
                    Value::String(text) => Some((name, text)),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        })
    }
}
