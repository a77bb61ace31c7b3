use crate::errors::MailveilResult;
use crate::models::Detection;

/// A language identification backend.
///
/// Implementations must return detections sorted descending by confidence.
/// Preconditions on the input text (non-degenerate content) are enforced by
/// the router, not by backends.
pub trait ILanguageBackend: Send + Sync {
    /// Detect candidate languages for `text`.
    fn detect(&self, text: &str) -> MailveilResult<Vec<Detection>>;

    /// Stable backend name used in configuration and logs.
    fn name(&self) -> &'static str;
}
