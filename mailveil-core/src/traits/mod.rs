mod analyzer;
mod language;
mod ner;

pub use analyzer::ITextAnalyzer;
pub use language::ILanguageBackend;
pub use ner::INerModel;
