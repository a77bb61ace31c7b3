//! Backend dispatch and per-sentence interval construction.

use mailveil_core::config::{LangBackendKind, PipelineSpec};
use mailveil_core::errors::{LangError, MailveilResult};
use mailveil_core::models::{Detection, LangIntervals};
use mailveil_core::traits::ILanguageBackend;
use mailveil_models::PipelineLoader;
use tracing::debug;

use crate::backends::{BayesBackend, NgramBackend, TransformerBackend};
use crate::precheck;

/// Routes detection requests to the configured backend and derives
/// per-sentence language intervals.
pub struct LangRouter {
    backend: Box<dyn ILanguageBackend>,
}

impl LangRouter {
    /// Build a router for the configured backend kind.
    ///
    /// `allowed` constrains the ngram backend's class set (fatal when the
    /// intersection with its native classes is empty); `pipeline` overrides
    /// the transformer descriptor.
    pub fn new(
        kind: LangBackendKind,
        allowed: Option<&[String]>,
        loader: &PipelineLoader,
        pipeline: Option<&PipelineSpec>,
    ) -> MailveilResult<Self> {
        let backend: Box<dyn ILanguageBackend> = match kind {
            LangBackendKind::Ngram => {
                let mut backend = NgramBackend::new();
                if let Some(langs) = allowed {
                    backend.constrain(langs)?;
                }
                Box::new(backend)
            }
            LangBackendKind::Bayes => Box::new(BayesBackend::new()),
            LangBackendKind::Transformer => {
                let classifier =
                    loader
                        .get_lang_detector(pipeline)
                        .map_err(|e| LangError::BackendUnavailable {
                            name: "transformer".to_string(),
                            reason: e.to_string(),
                        })?;
                Box::new(TransformerBackend::new(classifier))
            }
        };
        debug!(backend = backend.name(), "language router ready");
        Ok(Self { backend })
    }

    /// Build a router around an arbitrary backend.
    pub fn with_backend(backend: Box<dyn ILanguageBackend>) -> Self {
        Self { backend }
    }

    /// Detections for a text, or an empty list when the text fails the
    /// detection preconditions ("no language").
    pub fn get_detections(&self, text: &str) -> MailveilResult<Vec<Detection>> {
        if !precheck::is_detectable(text) {
            return Ok(Vec::new());
        }
        self.backend.detect(text)
    }

    /// Dominant language of a text, if one can be determined.
    pub fn detect_language(&self, text: &str) -> MailveilResult<Option<Detection>> {
        Ok(self.get_detections(text)?.into_iter().next())
    }

    /// Assign each contiguous run of sentences a language tag.
    ///
    /// Sentences that yield no detection extend the surrounding run; a run
    /// that never sees a detection is labeled with the empty tag.
    pub fn detect_sentence_languages(
        &self,
        sentences: &[String],
    ) -> MailveilResult<LangIntervals> {
        let mut intervals = LangIntervals::new();
        if sentences.is_empty() {
            return Ok(intervals);
        }

        let mut marked = 0usize;
        let mut current: Option<String> = None;
        for (i, sentence) in sentences.iter().enumerate() {
            if sentence.is_empty() {
                continue;
            }
            let lang = self
                .get_detections(sentence)?
                .into_iter()
                .next()
                .map(|d| d.lang);
            if lang != current {
                if let Some(cur) = current.take() {
                    intervals.insert(marked, i, cur);
                    marked = i;
                }
                current = lang;
            }
        }
        intervals.insert(marked, sentences.len(), current.unwrap_or_default());
        Ok(intervals)
    }
}
