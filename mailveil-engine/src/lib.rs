//! # mailveil-engine
//!
//! The pseudonymization engine: orchestrates segmentation, NER, email and
//! number redaction over per-email state, keeps pseudonym identity stable
//! across sentences, and drives whole-batch workflows.

pub mod cleanup;
pub mod pseudonymize;
pub mod pseudonyms;
pub mod workflow;

pub use cleanup::clean_up_content;
pub use pseudonymize::Pseudonymize;
pub use pseudonyms::PseudonymTable;
pub use workflow::Workflow;
