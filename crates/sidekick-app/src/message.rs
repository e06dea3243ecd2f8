//! 메시지 파일 파싱.
//!
//! 첫 번째 `Subject:` 줄이 제목이고 나머지 줄이 본문이다.

/// 콘솔 호스트에 열린 메일 아이템
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn parse(text: &str) -> Self {
        let mut subject = None;
        let mut body_lines = Vec::new();

        for line in text.lines() {
            if subject.is_none() {
                if let Some(rest) = strip_subject(line) {
                    subject = Some(rest.trim().to_string());
                    continue;
                }
            }
            body_lines.push(line);
        }

        Self {
            subject: subject.unwrap_or_default(),
            body: body_lines.join("\n").trim().to_string(),
        }
    }
}

fn strip_subject(line: &str) -> Option<&str> {
    let prefix = line.get(..8)?;
    prefix
        .eq_ignore_ascii_case("subject:")
        .then(|| &line[8..])
}
