//! 언어 코드 → 표시 이름.

/// 언어 코드를 프롬프트에 넣을 영어 표시 이름으로 변환한다.
/// 알 수 없는 코드는 English.
pub fn display_name(code: &str) -> &'static str {
    match code.trim().to_ascii_lowercase().as_str() {
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" | "zh_cn" | "zh-cn" => "Chinese",
        _ => "English",
    }
}
