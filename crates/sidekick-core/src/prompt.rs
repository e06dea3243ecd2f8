//! 프롬프트 템플릿과 빌더.
//!
//! 템플릿은 `{subject}`, `{content}`, `{language}` 플레이스홀더를 가진 문자열이다.
//! 치환은 리터럴이며 각 플레이스홀더의 첫 번째 등장만 바꾼다
//! (subject → content → language 순서, 이스케이프 없음).

use std::collections::BTreeMap;

use crate::settings::Settings;

/// 템플릿 치환 값
#[derive(Debug, Clone, Default)]
pub struct PromptVars<'a> {
    pub subject: &'a str,
    pub content: &'a str,
    /// 언어 표시 이름 (예: "Korean")
    pub language: &'a str,
}

/// 템플릿에 값을 치환한다.
///
/// 두 번째 이후의 플레이스홀더와 없는 플레이스홀더는 그대로 남는다.
pub fn build(template: &str, vars: &PromptVars<'_>) -> String {
    template
        .replacen("{subject}", vars.subject, 1)
        .replacen("{content}", vars.content, 1)
        .replacen("{language}", vars.language, 1)
}

/// 설정의 사용자 템플릿 (비어 있으면 내장 기본값)
pub fn template_for(settings: &Settings, name: &str) -> String {
    settings.template(name)
}

// ============================================================
// 내장 템플릿
// ============================================================

pub const SUMMARIZE_TEMPLATE: &str = r#"You are an expert researcher. Your task is to carefully review the provided research document and perform the following tasks:

1. Summarize the Research Background:
Provide a concise yet comprehensive summary of the research background, highlighting the context and motivation behind the study.

2. Extract the Problem Statement:
Identify and articulate the central problem or challenge addressed by the research in clear and precise terms.

3. Identify Strengths:
List between three and five key strengths of the study. Focus on aspects such as methodology, innovation, robustness of results, or any other notable positive attributes.

4. Identify Weaknesses:
Enumerate between four and five significant weaknesses or limitations present in the research. Consider issues like methodological gaps, limited scope, or any areas lacking clarity.

5. Propose Research Topics:
Based on the weaknesses identified, suggest three potential research topics that could address these limitations or explore related areas further.

Ensure your response is thorough and balanced, with academical depth and varied sentence structures that reflect both detailed insight and succinct clarity.

Subject: {subject}

Content:
{content}"#;

pub const TRANSLATE_TEMPLATE: &str = r#"You are an expert translator and interpreter with extensive proficiency in various languages, specializing in translating texts into polished, academic {language}. Your task is to translate the provided text from the source language into the target language, ensuring that every nuance, stylistic detail, and analytical aspect is accurately and naturally conveyed. Please follow these guidelines:

Preserve Nuance and Style:
- Accurately reflect the original text's tone, emotional nuance, and stylistic characteristics.
- Adapt idiomatic expressions, metaphors, and culturally specific references to ensure they resonate with the target readers.

Maintain Analytical Precision:
- Carefully dissect complex sentences and ideas, ensuring that your translation maintains the original text's logical flow and depth of analysis.
- Where necessary, integrate brief annotations or contextual clarifications to help convey any cultural or conceptual subtleties.

Ensure Accuracy and Consistency:
- Translate specialized vocabulary, technical terms, and academic language with precision and maintain consistency throughout the text.
- Verify that the structure and argumentative progression of the source material are preserved in the translated version.

Uphold Contextual Integrity:
- Ensure that the overall message and intent of the original text are fully maintained in your translation.
- Make sure that transitions between ideas and sections remain coherent and logically connected.

Review and Refine:
- Reassess your translation for any potential ambiguities or loss of nuance, refining as necessary to enhance clarity and precision.
- Strive for a balanced outcome that honors the original text while ensuring the translation is engaging and accessible.

Deliver your final translation in refined, academic prose that faithfully embodies the original text's analytical and stylistic essence.

Subject: {subject}

Content:
{content}"#;

pub const TRANSLATE_SUMMARIZE_TEMPLATE: &str = r#"You are an expert translator and summarizer with extensive proficiency in various languages, specializing in translating texts into polished, academic {language}. Your task is to translate the provided text from the source language into the target language AND create a concise summary of the main points. Please follow these guidelines:

Translation Aspects:
- Accurately reflect the original text's tone, emotional nuance, and stylistic characteristics.
- Adapt idiomatic expressions, metaphors, and culturally specific references to ensure they resonate with the target readers.
- Maintain analytical precision and logical flow in the translation.

Summarization Requirements:
- Create a concise and focused summary of the key points in the target language.
- Prioritize clarity and brevity while maintaining the essential meaning.
- Ensure the summary captures the main ideas, arguments, and conclusions.
- Limit the summary to approximately 30-40% of the original length.

Final Delivery Format:
1. First provide a concise summary section (heading: Summary)
2. Then provide the full translation (heading: Full Translation)

Subject: {subject}

Content:
{content}"#;

pub const REPLY_TEMPLATE: &str = r#"You are a professional email composer. Based on the following email content, draft a concise, professional reply. The reply MUST include:

1. Start with "SUBJECT: " followed by an appropriate subject line, then a blank line
2. A professional, concise email body

Make the response clear, helpful, and to the point. Use a professional tone.

Email content to reply to:
Subject: {subject}

{content}"#;

pub const TLDR_TEMPLATE: &str = r#"Write a TL;DR of the following email in 2-3 sentences, in {language}. Respond with the summary only, without headings or introductory remarks.

Subject: {subject}

Content:
{content}"#;

/// 내장 기본 템플릿 (없는 이름은 빈 문자열)
pub fn default_template(name: &str) -> &'static str {
    match name {
        "summarize" => SUMMARIZE_TEMPLATE,
        "translate" => TRANSLATE_TEMPLATE,
        "translateSummarize" => TRANSLATE_SUMMARIZE_TEMPLATE,
        "reply" => REPLY_TEMPLATE,
        "tldr" => TLDR_TEMPLATE,
        _ => "",
    }
}

/// 설정 초기화용 기본 템플릿 맵
pub fn default_templates() -> BTreeMap<String, String> {
    ["summarize", "translate", "translateSummarize", "reply", "tldr"]
        .into_iter()
        .map(|name| (name.to_string(), default_template(name).to_string()))
        .collect()
}

// ============================================================
// 고정 프롬프트
// ============================================================

/// 명령 버튼의 본문 전체 번역 프롬프트
pub fn translate_body_prompt(subject: &str, content: &str, language: &str) -> String {
    format!(
        "Translate the following email content entirely into {language}. \
Preserve the original meaning and tone as much as possible.\n\n\
Email Subject (for context): {subject}\n\
Email Content:\n---\n{content}\n---\n\n\
Provide only the translated {language} text. Do not add any introductory or concluding remarks."
    )
}

/// 캘린더 이벤트 여부 분류 프롬프트 (응답은 `true`/`false`)
pub fn calendar_classifier_prompt(subject: &str, content: &str) -> String {
    format!(
        "Does the following email describe a meeting, appointment, or other event \
that could be added to a calendar? Answer with exactly one word: true or false.\n\n\
Subject: {subject}\n\nContent:\n{content}"
    )
}
