//! Preconditions a text must satisfy before it is worth submitting to a
//! detection backend. Degenerate inputs (punctuation, digits, addresses,
//! links) yield no detection instead of a garbage language tag.

use std::sync::LazyLock;

use regex::Regex;

static RE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|s?ftp|ftps|scp)://[A-Za-z0-9][A-Za-z0-9.\-]*(?::\d+)?(?:/\S*)?$").ok()
});

/// True when the text has no alphanumeric character at all.
pub fn contains_only_punctuation(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// The text with everything except alphanumerics and whitespace removed.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// True when, ignoring punctuation and whitespace, only digits remain.
pub fn contains_only_numbers(text: &str) -> bool {
    let stripped: String = strip_punctuation(text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

/// True when every whitespace-separated token contains an `@`.
pub fn contains_only_emails(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    !tokens.is_empty() && tokens.iter().all(|t| t.contains('@'))
}

/// True when every whitespace-separated token matches the URL grammar
/// (http/https/ftp/sftp/ftps/scp scheme, domain, optional port and path).
pub fn contains_only_links(text: &str) -> bool {
    let Some(re) = RE_URL.as_ref() else {
        return false;
    };
    let tokens: Vec<&str> = text.split_whitespace().collect();
    !tokens.is_empty() && tokens.iter().all(|t| re.is_match(t))
}

/// Whether the text is worth handing to a backend at all.
pub fn is_detectable(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !contains_only_punctuation(trimmed)
        && !contains_only_numbers(trimmed)
        && !contains_only_emails(trimmed)
        && !contains_only_links(trimmed)
}
