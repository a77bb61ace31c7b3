//! Process-lifetime model loader caches.
//!
//! `AnalyzerLoader` caches lexicon analyzers keyed by `(language, model)`;
//! `PipelineLoader` caches transformer pipelines keyed by feature name.
//! Each key is initialized exactly once; concurrent first requests for the
//! same key serialize on the cache entry.

use std::sync::Arc;

use dashmap::DashMap;
use mailveil_core::config::PipelineSpec;
use mailveil_core::constants::{DEFAULT_LANGUAGE, DEFAULT_MODEL};
use mailveil_core::errors::{MailveilResult, ModelError};
use moka::sync::Cache;
use tracing::{debug, warn};

use crate::analyzer::LexAnalyzer;
use crate::ner::OnnxNerPipeline;
use crate::textclass::OnnxTextClassifier;

/// Resolve the default analyzer model for a language tag.
///
/// Galician redirects to the Portuguese model; any unknown language falls
/// back to the universal default.
pub fn default_model_for(lang: &str) -> &'static str {
    let lang = match lang {
        "gl" => "pt",
        other => other,
    };
    match lang {
        "fr" => "fr-lex-md",
        "es" => "es-lex-md",
        "de" => "de-lex-md",
        "pt" => "pt-lex-md",
        "en" => "en-lex-md",
        other => {
            warn!(lang = other, fallback = DEFAULT_LANGUAGE, "no analyzer model for language");
            "de-lex-md"
        }
    }
}

/// Cache of lexicon analyzers keyed by `(language, model identifier)`.
pub struct AnalyzerLoader {
    cache: Cache<(String, String), Arc<LexAnalyzer>>,
}

impl AnalyzerLoader {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().max_capacity(64).build(),
        }
    }

    /// Get or initialize the analyzer for `lang`. `model` may be the
    /// `default` sentinel, resolved through the per-language default map.
    /// Model load failures are fatal and propagate.
    pub fn get(&self, lang: &str, model: &str) -> MailveilResult<Arc<LexAnalyzer>> {
        let resolved = if model == DEFAULT_MODEL {
            default_model_for(lang).to_string()
        } else {
            model.to_string()
        };
        let key = (lang.to_string(), resolved.clone());
        self.cache
            .try_get_with(key, || {
                debug!(lang, model = %resolved, "initializing analyzer");
                LexAnalyzer::load(&resolved).map(Arc::new)
            })
            .map_err(|e| {
                ModelError::LoadFailed {
                    model: resolved,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AnalyzerLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache of transformer pipelines keyed by feature name.
pub struct PipelineLoader {
    ner: DashMap<String, Arc<OnnxNerPipeline>>,
    textclass: DashMap<String, Arc<OnnxTextClassifier>>,
}

impl PipelineLoader {
    pub fn new() -> Self {
        Self {
            ner: DashMap::new(),
            textclass: DashMap::new(),
        }
    }

    /// Default pipeline descriptor for a feature name.
    pub fn default_spec(feature: &str) -> MailveilResult<PipelineSpec> {
        match feature {
            "ner" => {
                let mut spec =
                    PipelineSpec::new("token-classification", "models/ner-conll03.onnx");
                spec.aggregation_strategy = Some("simple".to_string());
                Ok(spec)
            }
            "lang_detector" => Ok(PipelineSpec::new(
                "text-classification",
                "models/lang-id.onnx",
            )),
            other => Err(ModelError::UnknownFeature {
                feature: other.to_string(),
            }
            .into()),
        }
    }

    /// Get or initialize the NER pipeline. `spec` overrides the default
    /// descriptor for the `ner` feature.
    pub fn get_ner(&self, spec: Option<&PipelineSpec>) -> MailveilResult<Arc<OnnxNerPipeline>> {
        let spec = match spec {
            Some(s) => s.clone(),
            None => Self::default_spec("ner")?,
        };
        if let Some(existing) = self.ner.get("ner") {
            return Ok(existing.clone());
        }
        let entry = self.ner.entry("ner".to_string());
        match entry {
            dashmap::mapref::entry::Entry::Occupied(o) => Ok(o.get().clone()),
            dashmap::mapref::entry::Entry::Vacant(v) => {
                let pipeline = Arc::new(OnnxNerPipeline::load(&spec)?);
                v.insert(pipeline.clone());
                Ok(pipeline)
            }
        }
    }

    /// Get or initialize the language-detection classifier.
    pub fn get_lang_detector(
        &self,
        spec: Option<&PipelineSpec>,
    ) -> MailveilResult<Arc<OnnxTextClassifier>> {
        let spec = match spec {
            Some(s) => s.clone(),
            None => Self::default_spec("lang_detector")?,
        };
        if let Some(existing) = self.textclass.get("lang_detector") {
            return Ok(existing.clone());
        }
        let entry = self.textclass.entry("lang_detector".to_string());
        match entry {
            dashmap::mapref::entry::Entry::Occupied(o) => Ok(o.get().clone()),
            dashmap::mapref::entry::Entry::Vacant(v) => {
                let pipeline = Arc::new(OnnxTextClassifier::load(&spec)?);
                v.insert(pipeline.clone());
                Ok(pipeline)
            }
        }
    }
}

impl Default for PipelineLoader {
    fn default() -> Self {
        Self::new()
    }
}
