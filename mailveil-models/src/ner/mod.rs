//! ONNX token-classification pipeline for named-entity recognition.
//!
//! Wraps an ort `Session` over a multilingual NER head. The pipeline is
//! language-agnostic: sentences are never rejected on language grounds.

pub mod aggregation;
pub mod labels;

use std::path::Path;
use std::sync::Mutex;

use mailveil_core::config::PipelineSpec;
use mailveil_core::errors::{MailveilResult, ModelError};
use mailveil_core::models::NamedEntity;
use mailveil_core::traits::INerModel;
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use aggregation::TokenPrediction;

/// NER adapter backed by an ONNX token-classification model.
///
/// `Session::run` needs `&mut self`, so the session sits behind a Mutex to
/// satisfy the `&self` trait surface.
pub struct OnnxNerPipeline {
    session: Mutex<Session>,
    model_name: String,
}

// Safety: Session is Send but not Sync by default. The Mutex provides Sync.
unsafe impl Sync for OnnxNerPipeline {}

impl OnnxNerPipeline {
    /// Build the pipeline from a validated descriptor. A missing or
    /// unloadable model file is fatal.
    pub fn load(spec: &PipelineSpec) -> MailveilResult<Self> {
        spec.validate()?;
        let path = Path::new(&spec.model);
        if !path.exists() {
            return Err(ModelError::LoadFailed {
                model: spec.model.clone(),
                reason: "model file not found".to_string(),
            }
            .into());
        }

        let session = Session::builder()
            .map_err(|e| ModelError::LoadFailed {
                model: spec.model.clone(),
                reason: e.to_string(),
            })?
            .with_intra_threads(2)
            .map_err(|e| ModelError::LoadFailed {
                model: spec.model.clone(),
                reason: e.to_string(),
            })?
            .commit_from_file(&spec.model)
            .map_err(|e| ModelError::LoadFailed {
                model: spec.model.clone(),
                reason: e.to_string(),
            })?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("ner-onnx")
            .to_string();
        debug!(model = %model_name, "NER model loaded");

        Ok(Self {
            session: Mutex::new(session),
            model_name,
        })
    }

    /// Word-level input pieces with byte offsets into the sentence.
    fn word_spans(sentence: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = None;
        for (i, c) in sentence.char_indices() {
            if c.is_alphanumeric() || c == '_' {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                spans.push((s, i));
            }
        }
        if let Some(s) = start {
            spans.push((s, sentence.len()));
        }
        spans
    }

    /// Hash a word into the embedding vocabulary range.
    fn token_id(word: &str) -> u32 {
        let mut h: u32 = 0x811c9dc5;
        for b in word.to_lowercase().as_bytes() {
            h ^= *b as u32;
            h = h.wrapping_mul(0x01000193);
        }
        1 + (h % 29999)
    }

    fn infer(&self, sentence: &str) -> MailveilResult<Vec<TokenPrediction>> {
        let spans = Self::word_spans(sentence);
        if spans.is_empty() {
            return Ok(Vec::new());
        }

        // [CLS] word-ids [SEP]
        let mut ids: Vec<i64> = vec![101];
        ids.extend(
            spans
                .iter()
                .map(|&(s, e)| Self::token_id(&sentence[s..e]) as i64),
        );
        ids.push(102);
        let seq_len = ids.len();
        let mask: Vec<i64> = vec![1; seq_len];

        let ids_tensor =
            Tensor::from_array((vec![1i64, seq_len as i64], ids)).map_err(|e| {
                ModelError::InferenceFailed {
                    reason: format!("tensor creation error: {e}"),
                }
            })?;
        let mask_tensor =
            Tensor::from_array((vec![1i64, seq_len as i64], mask)).map_err(|e| {
                ModelError::InferenceFailed {
                    reason: format!("tensor creation error: {e}"),
                }
            })?;

        let mut session = self.session.lock().map_err(|e| ModelError::InferenceFailed {
            reason: format!("session lock poisoned: {e}"),
        })?;

        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor])
            .map_err(|e| ModelError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let (_name, output) =
            outputs
                .iter()
                .next()
                .ok_or_else(|| ModelError::InferenceFailed {
                    reason: "no output tensor".to_string(),
                })?;
        let (shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| ModelError::InferenceFailed {
                    reason: format!("tensor extraction failed: {e}"),
                })?;

        // [batch=1, seq, labels]
        if shape.len() != 3 {
            return Err(ModelError::InferenceFailed {
                reason: format!("unexpected output shape: {shape:?}"),
            }
            .into());
        }
        let n_labels = shape[2] as usize;

        let mut predictions = Vec::with_capacity(spans.len());
        for (word_idx, &(start, end)) in spans.iter().enumerate() {
            // +1 skips the [CLS] position
            let base = (word_idx + 1) * n_labels;
            let logits = &data[base..base + n_labels];
            let (label_idx, score) = softmax_argmax(logits);
            let label = labels::CONLL_LABELS
                .get(label_idx)
                .copied()
                .unwrap_or("O")
                .to_string();
            predictions.push(TokenPrediction {
                start,
                end,
                label,
                score,
            });
        }
        Ok(predictions)
    }
}

fn softmax_argmax(logits: &[f32]) -> (usize, f64) {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f64> = logits.iter().map(|&x| ((x - max) as f64).exp()).collect();
    let sum: f64 = exp.iter().sum();
    let (idx, best) = exp
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap_or((0, &1.0));
    (idx, best / sum)
}

impl INerModel for OnnxNerPipeline {
    fn recognize(&self, sentence: &str) -> MailveilResult<Vec<NamedEntity>> {
        let predictions = self.infer(sentence)?;
        Ok(aggregation::aggregate(sentence, &predictions))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
