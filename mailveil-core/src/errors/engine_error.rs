/// Pseudonymization-engine errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(
        "no pseudonyms left for language '{lang}' after collision filtering; \
         configure a larger pseudonym list"
    )]
    InsufficientPseudonyms { lang: String },

    #[error("no pseudonym list registered for any language")]
    NoPseudonymLists,
}
