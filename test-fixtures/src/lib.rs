//! Deterministic stand-ins for the external models, plus sample data.
//!
//! `StubNer` recognizes a configured vocabulary by exact word search, which
//! makes entity offsets predictable in tests. `ScriptedLangBackend` answers
//! by substring rules.

use mailveil_core::errors::MailveilResult;
use mailveil_core::models::{Detection, EntityCategory, NamedEntity};
use mailveil_core::traits::{ILanguageBackend, INerModel};

/// NER stub recognizing a fixed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StubNer {
    vocabulary: Vec<(String, EntityCategory)>,
}

impl StubNer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface with its category.
    pub fn with(mut self, word: &str, category: EntityCategory) -> Self {
        self.vocabulary.push((word.to_string(), category));
        self
    }

    /// A stub primed with the surfaces the integration scenarios use.
    pub fn scenario_vocabulary() -> Self {
        Self::new()
            .with("Francois", EntityCategory::Per)
            .with("Agathe", EntityCategory::Per)
            .with("Alice", EntityCategory::Per)
            .with("Michael", EntityCategory::Per)
            .with("Claudia", EntityCategory::Per)
            .with("MeetingPoint", EntityCategory::Loc)
            .with("Paris", EntityCategory::Loc)
            .with("Acme", EntityCategory::Org)
    }
}

impl INerModel for StubNer {
    fn recognize(&self, sentence: &str) -> MailveilResult<Vec<NamedEntity>> {
        let mut entities = Vec::new();
        for (word, category) in &self.vocabulary {
            let mut from = 0;
            while let Some(found) = sentence[from..].find(word.as_str()) {
                let start = from + found;
                let end = start + word.len();
                if is_word_bounded(sentence, start, end) {
                    entities.push(NamedEntity::new(word.clone(), start, end, *category));
                }
                from = end;
            }
        }
        entities.sort_by_key(|ne| (ne.start, ne.end));
        // drop overlaps, keeping the earlier span
        let mut last_end = 0;
        entities.retain(|ne| {
            if ne.start >= last_end {
                last_end = ne.end;
                true
            } else {
                false
            }
        });
        Ok(entities)
    }

    fn name(&self) -> &str {
        "stub-ner"
    }
}

fn is_word_bounded(sentence: &str, start: usize, end: usize) -> bool {
    let before_ok = start == 0
        || sentence[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = end == sentence.len()
        || sentence[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Language backend answering by substring rules, in rule order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLangBackend {
    rules: Vec<(String, String)>,
}

impl ScriptedLangBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts containing `needle` detect as `lang`.
    pub fn when_contains(mut self, needle: &str, lang: &str) -> Self {
        self.rules.push((needle.to_string(), lang.to_string()));
        self
    }
}

impl ILanguageBackend for ScriptedLangBackend {
    fn detect(&self, text: &str) -> MailveilResult<Vec<Detection>> {
        for (needle, lang) in &self.rules {
            if text.contains(needle.as_str()) {
                return Ok(vec![Detection {
                    lang: lang.clone(),
                    confidence: 0.99,
                }]);
            }
        }
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A NER stub that always fails, for the non-fatal degradation path.
#[derive(Debug, Clone, Default)]
pub struct FailingNer;

impl INerModel for FailingNer {
    fn recognize(&self, _sentence: &str) -> MailveilResult<Vec<NamedEntity>> {
        Err(mailveil_core::errors::ModelError::InferenceFailed {
            reason: "stub failure".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-ner"
    }
}

/// Settings document used by the scenario tests.
pub fn scenario_settings() -> serde_json::Value {
    serde_json::json!({
        "pseudonymize": {
            "default_lang": "",
            "datetime_detection": true,
            "time_parsing": "non-strict",
            "pseudo_emailaddresses": true,
            "pseudo_ne": true,
            "pseudo_numbers": true,
            "pseudo_first_names": {
                "fr": ["Claude", "Dominique", "Camille"],
                "es": ["José", "Angel", "Alex"]
            },
            "lang_detection_lib": "ngram"
        }
    })
}

/// A small multilingual corpus in the shape the envelope parser produces.
pub fn sample_email_bodies() -> Vec<&'static str> {
    vec![
        "Francois et Agathe sont amis. Mon numéro de téléphone est 123-456-7890.",
        "Esta foto fue tomada por Alice el 28.03.2025 a las 10:30. Compruébelo en el archivo adjunto",
        "Alice (alice@gmail.com) viendra au bâtiment à 10h00. Nous nous rendrons ensuite au MeetingPoint",
    ]
}
