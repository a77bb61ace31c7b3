//! Transformer text-classification backend.

use std::sync::Arc;

use mailveil_core::errors::MailveilResult;
use mailveil_core::models::Detection;
use mailveil_core::traits::ILanguageBackend;
use mailveil_models::OnnxTextClassifier;

/// Number of candidate labels reported per detection.
const TOP_K: usize = 2;

pub struct TransformerBackend {
    classifier: Arc<OnnxTextClassifier>,
}

impl TransformerBackend {
    pub fn new(classifier: Arc<OnnxTextClassifier>) -> Self {
        Self { classifier }
    }
}

impl ILanguageBackend for TransformerBackend {
    fn detect(&self, text: &str) -> MailveilResult<Vec<Detection>> {
        let scored = self.classifier.classify(text, TOP_K)?;
        Ok(scored
            .into_iter()
            .map(|(lang, confidence)| Detection { lang, confidence })
            .collect())
    }

    fn name(&self) -> &'static str {
        "transformer"
    }
}
