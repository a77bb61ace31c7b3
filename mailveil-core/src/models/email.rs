use serde::{Deserialize, Serialize};

use super::NamedEntity;

/// Per-email record carried through the workflow and serialized at the end.
///
/// The envelope parser fills `content` and the metadata fields; the workflow
/// fills the rest. Only `content` is required on input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub attachment: usize,
    #[serde(default, rename = "attachement type")]
    pub attachment_types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub detected_datetime: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_subject: Option<String>,
    #[serde(default)]
    pub ne_list: Vec<NamedEntity>,
    #[serde(default)]
    pub sentences: Vec<String>,
    #[serde(default)]
    pub sentences_after_email: Vec<String>,
}

impl EmailRecord {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}
