//! Input text cleanup applied before language detection and
//! pseudonymization.

/// Split on newlines, trim outer whitespace per line, drop empty lines and
/// rejoin with single newlines. Returns the cleaned text and the kept lines.
pub fn clean_up_content(content: &str) -> (String, Vec<String>) {
    let lines: Vec<String> = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    (lines.join("\n"), lines)
}
