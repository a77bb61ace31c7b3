/// Workflow-settings errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read settings file '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("settings file '{path}' is not valid JSON: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("pseudo_first_names must map at least one language to a non-empty name list")]
    MissingPseudonymLists,

    #[error("could not persist settings to '{path}': {reason}")]
    WriteFailed { path: String, reason: String },
}
