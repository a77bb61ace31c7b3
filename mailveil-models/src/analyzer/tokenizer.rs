//! Deterministic tokenizer.
//!
//! Invariants the rest of the pipeline relies on:
//! * every non-whitespace character belongs to exactly one token;
//! * numeric tokens keep internal `.`, `/`, `:` separators when both sides
//!   are digits (`28.03.2025`, `14/03/2025`, `17:20:18`), and a leading `+`
//!   when followed by a digit (`+0200`);
//! * `-` is always its own token;
//! * any other punctuation or symbol character is a single-character token.

/// A raw token before tagging: byte offsets into the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    pub start: usize,
    pub end: usize,
}

pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut iter = text.char_indices().peekable();

    while let Some(&(idx, ch)) = iter.peek() {
        if ch.is_whitespace() {
            iter.next();
            continue;
        }

        if ch.is_alphanumeric() || (ch == '+' && peek_digit(bytes, idx + 1)) {
            let start = idx;
            let mut end = idx;
            if ch == '+' {
                iter.next();
                end = idx + 1;
            }
            let mut all_digits = true;
            while let Some(&(i, c)) = iter.peek() {
                if c.is_alphanumeric() {
                    if !c.is_ascii_digit() {
                        all_digits = false;
                    }
                    iter.next();
                    end = i + c.len_utf8();
                } else if all_digits
                    && matches!(c, '.' | '/' | ':')
                    && peek_digit(bytes, i + 1)
                {
                    // numeric separator with digits on both sides
                    iter.next();
                    end = i + 1;
                } else {
                    break;
                }
            }
            tokens.push(RawToken { start, end });
            continue;
        }

        // single punctuation/symbol character
        iter.next();
        tokens.push(RawToken {
            start: idx,
            end: idx + ch.len_utf8(),
        });
    }

    tokens
}

fn peek_digit(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx).is_some_and(|b| b.is_ascii_digit())
}
