//! Workflow settings: schema, validation and persistence.
//!
//! Settings live in a JSON document with a `pseudonymize` section. The
//! loader validates against the recognized schema: unknown keys produce a
//! warning and are ignored, invalid values fall back to defaults. A
//! normalized copy can be persisted under a timestamped filename.

pub mod defaults;
mod pipeline_spec;
mod pseudonymize_config;

pub use pipeline_spec::{PipelineSpec, KNOWN_TASKS};
pub use pseudonymize_config::{LangBackendKind, PseudonymizeConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::{ConfigError, MailveilResult};

/// Root of the workflow settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub pseudonymize: PseudonymizeConfig,
}

impl WorkflowSettings {
    /// Load and validate settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> MailveilResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_value(&value)
    }

    /// Validate a parsed settings document.
    pub fn from_value(value: &Value) -> MailveilResult<Self> {
        let mut settings = Self::default();
        let Some(root) = value.as_object() else {
            warn!("settings document is not a JSON object, using defaults");
            return Ok(settings);
        };
        for (key, section) in root {
            match key.as_str() {
                "pseudonymize" => match section.as_object() {
                    Some(obj) => settings.pseudonymize = PseudonymizeConfig::from_value(obj),
                    None => warn!("'pseudonymize' section is not an object, using defaults"),
                },
                other => warn!(key = other, "ignoring unknown settings section"),
            }
        }
        if !settings.pseudonymize.has_pseudonyms() {
            return Err(ConfigError::MissingPseudonymLists.into());
        }
        Ok(settings)
    }

    /// Persist the normalized settings under `dir` with a timestamped
    /// filename, returning the written path.
    pub fn save_timestamped(&self, dir: impl AsRef<Path>) -> MailveilResult<PathBuf> {
        let stamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.as_ref().join(format!("settings_{stamp}.json"));
        let body = serde_json::to_string_pretty(self).map_err(|e| ConfigError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(&path, body).map_err(|e| ConfigError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}
