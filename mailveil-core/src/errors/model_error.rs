/// Model-adapter errors (analyzer, NER, transformer pipelines).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load model '{model}': {reason}")]
    LoadFailed { model: String, reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("unknown pipeline feature '{feature}'")]
    UnknownFeature { feature: String },

    #[error("invalid pipeline descriptor: {reason}")]
    InvalidPipeline { reason: String },
}
