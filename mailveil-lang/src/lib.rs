//! # mailveil-lang
//!
//! Language routing: decide the dominant language of a text, or a
//! per-sentence interval map, through one of three interchangeable
//! detection backends.

pub mod backends;
pub mod precheck;
pub mod profiles;
pub mod router;

pub use backends::{BayesBackend, NgramBackend, TransformerBackend};
pub use router::LangRouter;
