use serde::{Deserialize, Serialize};

use crate::constants;

/// Entity categories emitted by the NER model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Per,
    Loc,
    Org,
    Misc,
}

impl EntityCategory {
    /// Parse a model label, tolerating BIO-style prefixes (`B-PER`, `I-LOC`).
    pub fn from_label(label: &str) -> Option<Self> {
        let bare = label
            .rsplit_once('-')
            .map(|(_, tail)| tail)
            .unwrap_or(label);
        match bare.to_ascii_uppercase().as_str() {
            "PER" => Some(Self::Per),
            "LOC" => Some(Self::Loc),
            "ORG" => Some(Self::Org),
            "MISC" => Some(Self::Misc),
            _ => None,
        }
    }

    /// The fixed placeholder for this category, or `None` for persons,
    /// which receive a pseudonym from the configured list instead.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Per => None,
            Self::Loc => Some(constants::LOCATION_PLACEHOLDER),
            Self::Org => Some(constants::ORGANIZATION_PLACEHOLDER),
            Self::Misc => Some(constants::MISC_PLACEHOLDER),
        }
    }
}

/// A named entity detected within one sentence.
///
/// `start`/`end` are byte offsets into the sentence the entity belongs to.
/// Spans returned by a NER adapter are non-overlapping and sorted ascending
/// by `start`. The confidence score is internal and excluded from serialized
/// output records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub word: String,
    pub start: usize,
    pub end: usize,
    #[serde(rename = "entity_group")]
    pub category: EntityCategory,
    #[serde(skip_serializing, default)]
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudonym: Option<String>,
}

impl NamedEntity {
    pub fn new(word: impl Into<String>, start: usize, end: usize, category: EntityCategory) -> Self {
        Self {
            word: word.into(),
            start,
            end,
            category,
            score: 1.0,
            pseudonym: None,
        }
    }

    /// Copy without the assigned pseudonym, for re-runs of the engine.
    pub fn without_pseudonym(&self) -> Self {
        Self {
            pseudonym: None,
            ..self.clone()
        }
    }
}
