use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags assigned by the lexicon analyzer.
///
/// `X` marks foreign-language material, mixed alphanumeric tokens and other
/// words the tagger cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Noun,
    Num,
    Propn,
    Verb,
    Pron,
    X,
    Adv,
    Adp,
    Det,
    Punct,
    Other,
}

/// One token of an analyzed text. Offsets are byte offsets into the
/// document text; the surface is always recovered by slicing so that
/// multi-token span text preserves the original spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub pos: Pos,
}

/// A tokenized, POS-tagged and sentence-segmented text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDoc {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Byte ranges of the sentences within `text`, in order.
    pub sentences: Vec<(usize, usize)>,
}

impl AnalyzedDoc {
    /// Surface text of token `i`.
    pub fn token_text(&self, i: usize) -> &str {
        let tok = &self.tokens[i];
        &self.text[tok.start..tok.end]
    }

    /// Surface text of the token range `[first, last]` (inclusive),
    /// including any characters between the tokens.
    pub fn span_text(&self, first: usize, last: usize) -> &str {
        &self.text[self.tokens[first].start..self.tokens[last].end]
    }

    /// Byte range covered by the inclusive token range `[first, last]`.
    pub fn span_bounds(&self, first: usize, last: usize) -> (usize, usize) {
        (self.tokens[first].start, self.tokens[last].end)
    }

    /// The sentence surfaces in order.
    pub fn sentence_texts(&self) -> Vec<String> {
        self.sentences
            .iter()
            .map(|&(s, e)| self.text[s..e].to_string())
            .collect()
    }
}
