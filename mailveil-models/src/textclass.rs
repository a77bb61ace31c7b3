//! ONNX text-classification pipeline, used by the transformer language
//! detection backend.

use std::path::Path;
use std::sync::Mutex;

use mailveil_core::config::PipelineSpec;
use mailveil_core::errors::{MailveilResult, ModelError};
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

/// Label set of the bundled language-identification head, in output-index
/// order.
pub const LANG_LABELS: &[&str] = &[
    "ar", "bg", "de", "el", "en", "es", "fr", "hi", "it", "ja", "nl", "pl", "pt", "ru", "sw",
    "th", "tr", "ur", "vi", "zh",
];

/// Text classifier backed by an ONNX sequence-classification model.
pub struct OnnxTextClassifier {
    session: Mutex<Session>,
    model_name: String,
}

// Safety: Session is Send but not Sync by default. The Mutex provides Sync.
unsafe impl Sync for OnnxTextClassifier {}

impl OnnxTextClassifier {
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
            .commit_from_file(&spec.model)
            .map_err(|e| ModelError::LoadFailed {
                model: spec.model.clone(),
                reason: e.to_string(),
            })?;
        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("textclass-onnx")
            .to_string();
        debug!(model = %model_name, "text classification model loaded");
        Ok(Self {
            session: Mutex::new(session),
            model_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.model_name
    }

    /// Classify `text`, returning up to `top_k` `(label, probability)` pairs
    /// sorted descending by probability.
    pub fn classify(&self, text: &str, top_k: usize) -> MailveilResult<Vec<(String, f64)>> {
        let mut ids: Vec<i64> = vec![101];
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            let mut h: u32 = 0x811c9dc5;
            for b in word.to_lowercase().as_bytes() {
                h ^= *b as u32;
                h = h.wrapping_mul(0x01000193);
            }
            ids.push((1 + (h % 29999)) as i64);
        }
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

        // [batch=1, labels]
        let n_labels = *shape.last().ok_or_else(|| ModelError::InferenceFailed {
            reason: "empty output shape".to_string(),
        })? as usize;
        let logits = &data[..n_labels];

        let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f64> = logits.iter().map(|&x| ((x - max) as f64).exp()).collect();
        let sum: f64 = exp.iter().sum();

        let mut scored: Vec<(String, f64)> = exp
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                let label = LANG_LABELS.get(i).copied().unwrap_or("und").to_string();
                (label, e / sum)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);
        Ok(scored)
    }
}
