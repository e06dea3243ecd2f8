//! `sidekick set <field> <value>` 처리.

use anyhow::{anyhow, bail, Result};

use sidekick_core::models::task::GenerationTask;
use sidekick_core::settings::{FontSize, Settings, Theme};

/// 설정 필드 하나를 문자열 값으로 갱신한다.
///
/// 필드 이름은 저장 형식과 같은 camelCase이며, 템플릿은 `template.<name>`.
pub fn apply_setting(settings: &mut Settings, field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match field {
        "model" => settings.model = value.to_string(),
        "replyModel" => {
            settings.reply_model = Some(value.to_string()).filter(|v| !v.is_empty());
        }
        "defaultLanguage" => settings.default_language = value.to_string(),
        "eventTitleLanguage" => settings.event_title_language = value.to_string(),
        "theme" => {
            settings.theme = match value {
                "light" => Theme::Light,
                "dark" => Theme::Dark,
                "system" => Theme::System,
                other => bail!("invalid theme: {other} (light, dark, system)"),
            }
        }
        "fontSize" => {
            settings.font_size = match value {
                "small" => FontSize::Small,
                "medium" => FontSize::Medium,
                "large" => FontSize::Large,
                other => bail!("invalid font size: {other} (small, medium, large)"),
            }
        }
        "tldrMode" => settings.tldr_mode = parse_bool(value)?,
        "showReply" => settings.show_reply = parse_bool(value)?,
        "autorun" => settings.autorun = parse_bool(value)?,
        "autorunOption" => settings.autorun_option = value.parse::<GenerationTask>()?,
        other => match other.strip_prefix("template.") {
            Some(name) if !name.is_empty() => {
                settings
                    .templates
                    .insert(name.to_string(), value.to_string());
            }
            _ => bail!("unknown setting: {other}"),
        },
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(anyhow!("expected true or false, got {other}")),
    }
}

/// 출력용 설정 JSON (API 키는 앞 4자만)
pub fn masked_settings_json(settings: &Settings) -> Result<String> {
    let mut shown = settings.clone();
    if shown.has_api_key() {
        let prefix: String = shown.api_key.chars().take(4).collect();
        shown.api_key = format!("{prefix}****");
    }
    Ok(serde_json::to_string_pretty(&shown)?)
}
