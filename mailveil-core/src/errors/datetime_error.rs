/// Date/time detector errors. All of these are raised at configuration
/// time; a running detector never sees a malformed pattern.
#[derive(Debug, thiserror::Error)]
pub enum DateTimeError {
    #[error("invalid date pattern: {reason}")]
    InvalidPattern { reason: String },

    #[error("pattern is already present for mode '{mode}'")]
    DuplicatePattern { mode: String },

    #[error("pattern is not present for mode '{mode}'")]
    UnknownPattern { mode: String },
}
