//! Cleanup of user-typed text before it is embedded in a prompt.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum chat message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 2_000;

/// Maximum free-text answer length in characters.
pub const MAX_ANSWER_CHARS: usize = 500;

/// Text after sanitization plus what was changed (kinds only, no user text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedInput {
    pub text: String,
    pub modifications: Vec<InputModification>,
}

impl SanitizedInput {
    pub fn was_modified(&self) -> bool {
        !self.modifications.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModification {
    InvisibleUnicodeRemoved,
    ControlCharacterRemoved,
    InjectionPatternRemoved,
    ExcessiveLengthTruncated,
}

/// Sanitize user input: strip invisible Unicode and control characters,
/// filter prompt-injection phrases, trim and cap the length.
pub fn sanitize_user_input(raw: &str, max_chars: usize) -> SanitizedInput {
    let mut modifications = Vec::new();

    let mut text = remove_invisible_unicode(raw);
    if text != raw {
        modifications.push(InputModification::InvisibleUnicodeRemoved);
    }

    let before = text.clone();
    text = remove_control_characters(&text);
    if text != before {
        modifications.push(InputModification::ControlCharacterRemoved);
    }

    let before = text.clone();
    text = remove_injection_patterns(&text);
    if text != before {
        modifications.push(InputModification::InjectionPatternRemoved);
    }

    let mut text = text.trim().to_string();
    if text.chars().count() > max_chars {
        text = truncate_at_word_boundary(&text, max_chars);
        modifications.push(InputModification::ExcessiveLengthTruncated);
    }

    if !modifications.is_empty() {
        tracing::debug!(?modifications, "User input sanitized");
    }

    SanitizedInput {
        text,
        modifications,
    }
}

/// Free-text interview answer, sanitized with the answer length cap.
pub fn sanitize_free_text(raw: &str) -> String {
    sanitize_user_input(raw, MAX_ANSWER_CHARS).text
}

fn remove_invisible_unicode(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{2069}'
                | '\u{FEFF}'
                | '\u{00AD}'
            )
        })
        .collect()
}

/// Keeps newline and tab.
fn remove_control_characters(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn remove_injection_patterns(text: &str) -> String {
    static INJECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
        [
            r"(?i)ignore\s+(?:previous|above|all\s+prior|the\s+above)\s+(?:instructions?|rules?|prompts?)",
            r"(?i)new\s+instructions?:",
            r"(?i)you\s+are\s+now\s+(?:a|an)\s+",
            r"(?i)system\s*:",
            r"(?i)assistant\s*:",
            r"\[INST\]",
            r"<\|im_start\|>",
            r"<\|im_end\|>",
            r"(?i)bỏ\s+qua\s+(?:mọi|tất\s+cả|các)\s+(?:hướng\s+dẫn|chỉ\s+dẫn|quy\s+tắc)",
            r"(?i)hướng\s+dẫn\s+mới\s*:",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    });

    let mut result = text.to_string();
    for pattern in INJECTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, "[FILTERED]").into_owned();
    }
    result
}

/// Cut to at most `max` characters, backing off to the last whitespace.
fn truncate_at_word_boundary(text: &str, max: usize) -> String {
    let end = text
        .char_indices()
        .nth(max)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let truncated = &text[..end];
    match truncated.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => truncated[..pos].to_string(),
        _ => truncated.to_string(),
    }
}
