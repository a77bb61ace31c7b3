use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parsing mode of the date/time detector.
///
/// Non-strict permits incomplete expressions (bare times, bare years);
/// strict requires an explicit day, month and year, and the strict pattern
/// set additionally demands an adjacent time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParsingMode {
    #[serde(rename = "strict")]
    #[default]
    Strict,
    #[serde(rename = "non-strict")]
    NonStrict,
}

impl ParsingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::NonStrict => "non-strict",
        }
    }
}

/// A detected date/time expression with byte offsets into the whole text.
///
/// `parsed` is absent only for spans accepted in non-strict mode whose
/// re-parse after unification was not attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeSpan {
    pub surface: String,
    pub parsed: Option<NaiveDateTime>,
    pub start: usize,
    pub end: usize,
}

impl DateTimeSpan {
    pub fn new(
        surface: impl Into<String>,
        parsed: Option<NaiveDateTime>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            surface: surface.into(),
            parsed,
            start,
            end,
        }
    }
}
