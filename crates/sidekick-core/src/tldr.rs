//! TL;DR 추출.
//!
//! 생성 결과에서 짧은 미리보기를 뽑는다. 순수 함수이며 결정적이다.

use once_cell::sync::Lazy;
use regex::Regex;

static TLDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)TL;DR:?\s*(.*?)(?:\n\n|$)").expect("valid regex"));

static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Summary:?\s*(.*?)(?:\n\n|$)").expect("valid regex"));

/// 첫 문단 길이 상한 (이상이면 잘라냄)
const PARAGRAPH_LIMIT: usize = 300;
/// 긴 첫 문단을 자를 길이
const PARAGRAPH_CUT: usize = 250;
/// 첫 문단이 비었을 때 전체 텍스트에서 취할 길이
const FALLBACK_CUT: usize = 200;

/// 텍스트에서 TL;DR을 추출한다.
///
/// 1. `TL;DR` 마커, 다음으로 `Summary` 마커 뒤의 첫 문단
/// 2. 마커가 없으면 첫 문단 (300자 이상이면 250자 + `...`)
/// 3. 첫 문단이 비었으면 전체 텍스트 앞 200자 + `...` (길이와 무관)
///
/// 길이는 바이트가 아닌 문자 단위다.
pub fn extract_tldr(text: &str) -> String {
    for re in [&*TLDR_RE, &*SUMMARY_RE] {
        if let Some(m) = re.captures(text).and_then(|c| c.get(1)) {
            if !m.as_str().is_empty() {
                return m.as_str().to_string();
            }
        }
    }

    let first_paragraph = text.split("\n\n").next().unwrap_or_default();
    if !first_paragraph.is_empty() {
        if first_paragraph.chars().count() < PARAGRAPH_LIMIT {
            return first_paragraph.to_string();
        }
        return truncate_with_ellipsis(first_paragraph, PARAGRAPH_CUT);
    }

    truncate_with_ellipsis(text, FALLBACK_CUT)
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tldr_marker() {
        assert_eq!(extract_tldr("TL;DR: short take\n\nmore text"), "short take");
        assert_eq!(extract_tldr("intro\ntl;dr everything is fine"), "everything is fine");
    }

    #[test]
    fn summary_marker_when_no_tldr() {
        assert_eq!(
            extract_tldr("# Report\nSummary: budget approved\n\nDetails follow"),
            "budget approved"
        );
    }

    #[test]
    fn empty_marker_capture_falls_through() {
        assert_eq!(extract_tldr("TL;DR:"), "TL;DR:");
    }

    #[test]
    fn short_first_paragraph() {
        assert_eq!(extract_tldr("First para.\n\nSecond para."), "First para.");
    }

    #[test]
    fn long_first_paragraph_is_cut_to_250() {
        let text = format!("{}\n\nrest", "a".repeat(310));
        let out = extract_tldr(&text);
        assert_eq!(out.chars().count(), 253);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..250], "a".repeat(250));
    }

    #[test]
    fn exactly_300_chars_is_cut() {
        let out = extract_tldr(&"b".repeat(300));
        assert_eq!(out, format!("{}...", "b".repeat(250)));
        assert_eq!(extract_tldr(&"b".repeat(299)), "b".repeat(299));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "가".repeat(299);
        assert_eq!(extract_tldr(&text), text);
    }

    #[test]
    fn leading_blank_paragraph_always_gets_ellipsis() {
        assert_eq!(extract_tldr("\n\nbody"), "\n\nbody...");
        let long = format!("\n\n{}", "c".repeat(300));
        let out = extract_tldr(&long);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("c..."));
        assert_eq!(extract_tldr(""), "...");
    }

    #[test]
    fn deterministic_and_stable_on_short_text() {
        let text = "Quarterly numbers look good.\n\nMore below.";
        let once = extract_tldr(text);
        assert_eq!(once, extract_tldr(text));
        let twice = extract_tldr(&once);
        assert!(twice.chars().count() <= once.chars().count());
        assert_eq!(twice, once);
    }
}
