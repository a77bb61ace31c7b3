//! Lexicon-driven POS tagging.
//!
//! The tagger only has to be right about the token shapes the downstream
//! pattern matching distinguishes: digit tokens, punctuation, month/day
//! vocabulary, function words and foreign-language material. Unknown
//! capitalized words default to proper nouns, everything else to nouns.

use mailveil_core::models::Pos;

use super::lexicon::{self, Lexicon};
use super::tokenizer::RawToken;

pub fn tag(text: &str, raw: &[RawToken], lex: &Lexicon) -> Vec<Pos> {
    let mut tags: Vec<Pos> = raw
        .iter()
        .map(|tok| base_tag(&text[tok.start..tok.end], lex))
        .collect();
    apply_context_rules(text, raw, &mut tags);
    tags
}

fn base_tag(surface: &str, lex: &Lexicon) -> Pos {
    let mut chars = surface.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Pos::Other,
    };

    if surface.chars().count() == 1 && !first.is_alphanumeric() {
        return Pos::Punct;
    }

    let has_digit = surface.chars().any(|c| c.is_ascii_digit());
    let has_alpha = surface.chars().any(char::is_alphabetic);

    if has_digit && !has_alpha {
        if surface.chars().all(|c| c.is_ascii_digit()) {
            // refined by the context rules below
            return if surface.starts_with('0') {
                Pos::Noun
            } else {
                Pos::Num
            };
        }
        // digit token with internal separators or a timezone sign
        return Pos::Noun;
    }
    if has_digit && has_alpha {
        // ordinals ("17th"), clock shorthands ("10h00")
        return Pos::X;
    }

    let lower = surface.to_lowercase();
    if let Some(pos) = lex.tag_own(&lower) {
        return pos;
    }
    if lexicon::known_elsewhere(&lower, lex) {
        return Pos::X;
    }
    if first.is_uppercase() {
        Pos::Propn
    } else {
        Pos::Noun
    }
}

/// Context refinements for pure-digit tokens.
fn apply_context_rules(text: &str, raw: &[RawToken], tags: &mut [Pos]) {
    for i in 0..raw.len() {
        let surface = &text[raw[i].start..raw[i].end];
        if !surface.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        // Digit chained to a following "-digit" with no whitespace:
        // the leading elements of ISO-style dates read as nouns.
        if joined_to_hyphen_digit(text, raw, i) {
            tags[i] = Pos::Noun;
            continue;
        }

        // A digit token right after a mixed alphanumeric token is carried
        // along as foreign material ("April 17th 2024").
        if i > 0 && tags[i - 1] == Pos::X && token_is_mixed(text, &raw[i - 1]) {
            tags[i] = Pos::X;
        }
    }
}

fn token_is_mixed(text: &str, tok: &RawToken) -> bool {
    let s = &text[tok.start..tok.end];
    s.chars().any(|c| c.is_ascii_digit()) && s.chars().any(char::is_alphabetic)
}

/// True when token `i` is immediately followed by `-` and another digit
/// token, all without intervening whitespace.
fn joined_to_hyphen_digit(text: &str, raw: &[RawToken], i: usize) -> bool {
    let Some(hyphen) = raw.get(i + 1) else {
        return false;
    };
    let Some(next) = raw.get(i + 2) else {
        return false;
    };
    &text[hyphen.start..hyphen.end] == "-"
        && raw[i].end == hyphen.start
        && hyphen.end == next.start
        && text[next.start..next.end]
            .chars()
            .all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::super::lexicon::FRENCH;
    use super::super::tokenizer::tokenize;
    use super::*;

    fn tags_of(text: &str) -> Vec<Pos> {
        let raw = tokenize(text);
        tag(text, &raw, &FRENCH)
    }

    #[test]
    fn iso_date_reads_noun_noun_num() {
        // 2025 - 03 - 12
        assert_eq!(
            tags_of("2025-03-12"),
            [Pos::Noun, Pos::Punct, Pos::Noun, Pos::Punct, Pos::Num]
        );
        // trailing element with a leading zero stays a noun
        assert_eq!(
            tags_of("2025-03-01"),
            [Pos::Noun, Pos::Punct, Pos::Noun, Pos::Punct, Pos::Noun]
        );
    }

    #[test]
    fn leading_zero_day_reads_noun() {
        assert_eq!(tags_of("09 février 2009"), [Pos::Noun, Pos::Noun, Pos::Num]);
        assert_eq!(tags_of("12 mars 2025"), [Pos::Num, Pos::Noun, Pos::Num]);
    }

    #[test]
    fn foreign_material_reads_x() {
        // English date words inside a French text
        assert_eq!(
            tags_of("Wednesday April 17th 2024 at"),
            [Pos::X, Pos::X, Pos::X, Pos::X, Pos::X]
        );
        // ...but a year after a plain foreign word stays numeric
        assert_eq!(tags_of("17. April 2024"), [Pos::Num, Pos::Punct, Pos::X, Pos::Num]);
    }

    #[test]
    fn own_function_words_are_not_foreign() {
        assert_eq!(tags_of("le"), [Pos::Det]);
        assert_eq!(tags_of("à"), [Pos::Adp]);
        assert_eq!(tags_of("vendredi"), [Pos::Noun]);
    }
}
