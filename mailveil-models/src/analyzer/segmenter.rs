//! Rule-based sentence segmentation over the token stream.
//!
//! `.`, `!` and `?` mark sentence boundaries. Periods that close ordinal
//! numbers ("17. April"), known month/day abbreviations ("abr.", "mié.")
//! or that are followed by lowercase material (file extensions, e-mail
//! addresses) do not break. A newline between tokens always breaks.

use super::lexicon;
use super::tokenizer::RawToken;

/// Sentence byte ranges over `text`, given its tokens.
pub fn split_sentences(text: &str, raw: &[RawToken]) -> Vec<(usize, usize)> {
    let mut sentences = Vec::new();
    if raw.is_empty() {
        return sentences;
    }

    let mut sent_start = raw[0].start;
    let mut i = 0;
    while i < raw.len() {
        let boundary = is_boundary(text, raw, i)
            || (i + 1 < raw.len() && text[raw[i].end..raw[i + 1].start].contains('\n'));
        if boundary {
            // absorb a run of closing punctuation
            let mut last = i;
            while last + 1 < raw.len()
                && raw[last].end == raw[last + 1].start
                && is_closer(token_text(text, &raw[last + 1]))
            {
                last += 1;
            }
            sentences.push((sent_start, raw[last].end));
            i = last + 1;
            if i < raw.len() {
                sent_start = raw[i].start;
            } else {
                return sentences;
            }
        } else {
            i += 1;
        }
    }
    sentences.push((sent_start, raw[raw.len() - 1].end));
    sentences
}

fn token_text<'a>(text: &'a str, tok: &RawToken) -> &'a str {
    &text[tok.start..tok.end]
}

fn is_boundary(text: &str, raw: &[RawToken], i: usize) -> bool {
    match token_text(text, &raw[i]) {
        "!" | "?" => true,
        "." => period_breaks(text, raw, i),
        _ => false,
    }
}

fn period_breaks(text: &str, raw: &[RawToken], i: usize) -> bool {
    // end of text closes the last sentence anyway
    let Some(next) = raw.get(i + 1) else {
        return true;
    };

    if i > 0 {
        let prev = token_text(text, &raw[i - 1]);
        // ordinal day number ("17.")
        if prev.len() <= 2 && prev.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if lexicon::is_abbreviation(&prev.to_lowercase()) {
            return false;
        }
    }

    // only break when something sentence-like follows
    let next_first = text[next.start..next.end].chars().next();
    matches!(next_first, Some(c) if c.is_uppercase() || c.is_ascii_digit())
}

fn is_closer(s: &str) -> bool {
    matches!(s, "." | "!" | "?" | ")" | "\"" | "'" | "»")
}

#[cfg(test)]
mod tests {
    use super::super::tokenizer::tokenize;
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        let raw = tokenize(text);
        split_sentences(text, &raw)
            .into_iter()
            .map(|(s, e)| &text[s..e])
            .collect()
    }

    #[test]
    fn splits_on_sentence_punctuation() {
        assert_eq!(
            sentences("Francois et Agathe sont amis. Mon numéro est 12."),
            [
                "Francois et Agathe sont amis.",
                "Mon numéro est 12.",
            ]
        );
    }

    #[test]
    fn ordinal_and_abbreviation_periods_do_not_split() {
        assert_eq!(
            sentences("Mittwoch, 17. April 2024 um 17:23 Uhr war es."),
            ["Mittwoch, 17. April 2024 um 17:23 Uhr war es."]
        );
        assert_eq!(
            sentences("Le mié., 17 abr. 2024 nous irons."),
            ["Le mié., 17 abr. 2024 nous irons."]
        );
    }

    #[test]
    fn lowercase_continuation_does_not_split() {
        assert_eq!(
            sentences("Alice (alice@gmail.com) viendra à 10h00. Nous verrons."),
            [
                "Alice (alice@gmail.com) viendra à 10h00.",
                "Nous verrons.",
            ]
        );
    }

    #[test]
    fn empty_text_yields_no_sentences() {
        assert!(sentences("").is_empty());
        assert!(sentences("   \n  ").is_empty());
    }
}
