//! # mailveil-core
//!
//! Foundation crate for the mailveil pseudonymization system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{PseudonymizeConfig, WorkflowSettings};
pub use errors::{MailveilError, MailveilResult};
pub use models::{
    AnalyzedDoc, DateTimeSpan, Detection, EmailRecord, EntityCategory, LangIntervals,
    NamedEntity, ParsingMode, Pos, RedactionFlags, Token,
};
