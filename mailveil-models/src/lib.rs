//! # mailveil-models
//!
//! Adapters around the external models the pipeline consumes: the
//! per-language lexicon analyzer (tokenizer, POS tagger, sentence
//! segmenter), the ONNX transformer pipelines (NER token classification,
//! language text classification) and the process-lifetime loader caches.

pub mod analyzer;
pub mod loader;
pub mod ner;
pub mod textclass;

pub use analyzer::LexAnalyzer;
pub use loader::{AnalyzerLoader, PipelineLoader};
pub use ner::OnnxNerPipeline;
pub use textclass::OnnxTextClassifier;
