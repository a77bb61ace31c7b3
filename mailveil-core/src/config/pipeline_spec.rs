use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Tasks a transformer pipeline descriptor may request.
pub const KNOWN_TASKS: &[&str] = &["token-classification", "text-classification"];

/// Descriptor for a transformer pipeline, as found in the settings file
/// under `ner_pipeline` / `lang_pipeline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub task: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_strategy: Option<String>,
}

impl PipelineSpec {
    pub fn new(task: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            model: model.into(),
            revision: None,
            aggregation_strategy: None,
        }
    }

    /// Structural validation; a spec that fails here is rejected before any
    /// model load is attempted.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !KNOWN_TASKS.contains(&self.task.as_str()) {
            return Err(ModelError::InvalidPipeline {
                reason: format!("unknown task '{}'", self.task),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ModelError::InvalidPipeline {
                reason: "model must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}
