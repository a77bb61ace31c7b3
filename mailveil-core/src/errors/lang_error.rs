/// Language-router errors.
#[derive(Debug, thiserror::Error)]
pub enum LangError {
    #[error("language backend '{name}' unavailable: {reason}")]
    BackendUnavailable { name: String, reason: String },

    #[error("allowed language set {requested:?} has no intersection with the backend's native classes")]
    EmptyConstraint { requested: Vec<String> },

    #[error("unknown language detection backend '{name}'")]
    UnknownBackend { name: String },
}
