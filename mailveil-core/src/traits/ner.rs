use crate::errors::MailveilResult;
use crate::models::NamedEntity;

/// Named-entity recognition over a single sentence.
///
/// Returned spans carry byte offsets relative to the given sentence, are
/// non-overlapping and sorted ascending by start. Contiguous sub-tokens of
/// one entity are already aggregated into a single span. The model is
/// language-agnostic; a sentence is never rejected on language grounds.
pub trait INerModel: Send + Sync {
    fn recognize(&self, sentence: &str) -> MailveilResult<Vec<NamedEntity>>;

    fn name(&self) -> &str {
        "ner"
    }
}
