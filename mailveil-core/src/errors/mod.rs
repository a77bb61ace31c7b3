//! Error taxonomy for the mailveil workspace.
//!
//! One enum per subsystem, wrapped by [`MailveilError`]. Adapters catch
//! third-party errors at the boundary and reclassify them into these kinds.

mod config_error;
mod datetime_error;
mod engine_error;
mod lang_error;
mod model_error;

pub use config_error::ConfigError;
pub use datetime_error::DateTimeError;
pub use engine_error::EngineError;
pub use lang_error::LangError;
pub use model_error::ModelError;

/// Result alias used throughout the workspace.
pub type MailveilResult<T> = Result<T, MailveilError>;

/// Top-level error wrapping every subsystem error kind.
#[derive(Debug, thiserror::Error)]
pub enum MailveilError {
    #[error(transparent)]
    Lang(#[from] LangError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
