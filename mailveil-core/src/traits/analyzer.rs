use crate::errors::MailveilResult;
use crate::models::AnalyzedDoc;

/// Tokenization, POS tagging and sentence segmentation for one language.
///
/// Analysis must be deterministic for a given text: the engine relies on
/// re-segmentation producing identical sentences when a run is repeated.
pub trait ITextAnalyzer: Send + Sync {
    /// Tokenize, tag and segment `text`.
    fn analyze(&self, text: &str) -> MailveilResult<AnalyzedDoc>;

    /// The language this analyzer was built for.
    fn lang(&self) -> &str;

    /// Sentence surfaces of `text`, in order. Empty input yields an empty
    /// sequence.
    fn segment(&self, text: &str) -> MailveilResult<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.analyze(text)?.sentence_texts())
    }
}
