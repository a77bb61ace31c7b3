//! # mailveil-datetime
//!
//! Detection of multi-token date and time expressions by pattern matching
//! over a POS-tagged token stream, so that the pseudonymization engine can
//! preserve them during number redaction.

pub mod calendar;
pub mod detector;
pub mod matcher;
pub mod pattern;

pub use detector::TimeDetector;
pub use pattern::{Pattern, TextConstraint, TokenConstraint};
