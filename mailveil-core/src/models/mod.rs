mod date_span;
mod email;
mod entity;
mod interval_map;
mod token;

pub use date_span::{DateTimeSpan, ParsingMode};
pub use email::EmailRecord;
pub use entity::{EntityCategory, NamedEntity};
pub use interval_map::LangIntervals;
pub use token::{AnalyzedDoc, Pos, Token};

use serde::{Deserialize, Serialize};

/// Selects which categories the pseudonymization engine redacts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RedactionFlags {
    pub emails: bool,
    pub entities: bool,
    pub numbers: bool,
}

impl Default for RedactionFlags {
    fn default() -> Self {
        Self {
            emails: true,
            entities: true,
            numbers: true,
        }
    }
}

/// A single language detection: tag plus confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub lang: String,
    pub confidence: f64,
}
