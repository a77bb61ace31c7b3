//! The per-language lexicon analyzer: tokenizer, POS tagger and sentence
//! segmenter behind the [`ITextAnalyzer`] seam.

pub mod lexicon;
mod segmenter;
mod tagger;
mod tokenizer;

use mailveil_core::errors::{MailveilResult, ModelError};
use mailveil_core::models::{AnalyzedDoc, Token};
use mailveil_core::traits::ITextAnalyzer;
use tracing::debug;

use lexicon::Lexicon;

/// Analyzer models compiled into this crate, keyed by model identifier.
pub const KNOWN_MODELS: &[(&str, &str)] = &[
    ("fr-lex-md", "fr"),
    ("es-lex-md", "es"),
    ("de-lex-md", "de"),
    ("pt-lex-md", "pt"),
    ("en-lex-md", "en"),
];

/// Deterministic tokenizer + tagger + segmenter for one language.
pub struct LexAnalyzer {
    lang: String,
    model_id: String,
    lexicon: &'static Lexicon,
}

impl LexAnalyzer {
    /// Load an analyzer model by identifier. Unknown identifiers fail the
    /// load; the caller decides fallbacks before asking for a model.
    pub fn load(model_id: &str) -> MailveilResult<Self> {
        let Some((_, lang)) = KNOWN_MODELS.iter().find(|(id, _)| *id == model_id) else {
            return Err(ModelError::LoadFailed {
                model: model_id.to_string(),
                reason: "not a known analyzer model".to_string(),
            }
            .into());
        };
        let lexicon = lexicon::lexicon_for(lang).ok_or_else(|| ModelError::LoadFailed {
            model: model_id.to_string(),
            reason: format!("no lexicon for language '{lang}'"),
        })?;
        debug!(model = model_id, lang, "analyzer model loaded");
        Ok(Self {
            lang: lang.to_string(),
            model_id: model_id.to_string(),
            lexicon,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl ITextAnalyzer for LexAnalyzer {
    fn analyze(&self, text: &str) -> MailveilResult<AnalyzedDoc> {
        let raw = tokenizer::tokenize(text);
        let tags = tagger::tag(text, &raw, self.lexicon);
        let sentences = segmenter::split_sentences(text, &raw);
        let tokens = raw
            .iter()
            .zip(tags)
            .map(|(tok, pos)| Token {
                start: tok.start,
                end: tok.end,
                pos,
            })
            .collect();
        Ok(AnalyzedDoc {
            text: text.to_string(),
            tokens,
            sentences,
        })
    }

    fn lang(&self) -> &str {
        &self.lang
    }
}
