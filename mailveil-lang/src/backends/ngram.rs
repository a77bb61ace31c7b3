//! Character-ngram + common-word profile classifier.
//!
//! Scores every compiled profile against the text and normalizes the
//! scores into probabilities. The class set is closed; `constrain`
//! restricts it further.

use std::collections::HashSet;

use mailveil_core::errors::{LangError, MailveilResult};
use mailveil_core::models::Detection;
use mailveil_core::traits::ILanguageBackend;

use crate::profiles::{self, LangProfile};

/// Weight of a common-word hit relative to a trigram hit.
const WORD_WEIGHT: f64 = 3.0;

pub struct NgramBackend {
    allowed: Option<HashSet<&'static str>>,
}

impl NgramBackend {
    pub fn new() -> Self {
        Self { allowed: None }
    }

    /// The closed set of language codes this backend can emit.
    pub fn native_classes(&self) -> Vec<&'static str> {
        profiles::native_classes()
    }

    /// Restrict detection to the intersection of `langs` with the native
    /// classes. An empty intersection is a setup error.
    pub fn constrain(&mut self, langs: &[String]) -> MailveilResult<()> {
        let native = self.native_classes();
        let intersection: HashSet<&'static str> = native
            .into_iter()
            .filter(|code| langs.iter().any(|l| l == code))
            .collect();
        if intersection.is_empty() {
            return Err(LangError::EmptyConstraint {
                requested: langs.to_vec(),
            }
            .into());
        }
        self.allowed = Some(intersection);
        Ok(())
    }

    fn in_scope(&self, profile: &LangProfile) -> bool {
        self.allowed
            .as_ref()
            .map_or(true, |set| set.contains(profile.code))
    }
}

impl Default for NgramBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ILanguageBackend for NgramBackend {
    fn detect(&self, text: &str) -> MailveilResult<Vec<Detection>> {
        let words = profiles::words_of(text);
        let trigrams = profiles::trigrams_of(text);

        let mut scored: Vec<(&'static str, f64)> = Vec::new();
        for profile in profiles::PROFILES {
            if !self.in_scope(profile) {
                continue;
            }
            let word_hits = words
                .iter()
                .filter(|w| profile.words.contains(&w.as_str()))
                .count() as f64;
            let trigram_hits = trigrams
                .iter()
                .filter(|t| profile.trigrams.contains(&t.as_str()))
                .count() as f64;
            let score = WORD_WEIGHT * word_hits + trigram_hits;
            if score > 0.0 {
                scored.push((profile.code, score));
            }
        }

        let total: f64 = scored.iter().map(|(_, s)| s).sum();
        if total <= 0.0 {
            return Ok(Vec::new());
        }
        let mut detections: Vec<Detection> = scored
            .into_iter()
            .map(|(code, score)| Detection {
                lang: code.to_string(),
                confidence: score / total,
            })
            .collect();
        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(detections)
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_obvious_languages() {
        let backend = NgramBackend::new();
        let fr = backend.detect("Le chat est sur la table et nous sommes contents.").unwrap();
        assert_eq!(fr[0].lang, "fr");
        let es = backend.detect("El gato está sobre la mesa y no lo sabemos.").unwrap();
        assert_eq!(es[0].lang, "es");
        let de = backend.detect("Der Hund ist nicht mit der Katze im Haus.").unwrap();
        assert_eq!(de[0].lang, "de");
    }

    #[test]
    fn probabilities_sum_to_one_and_are_sorted() {
        let backend = NgramBackend::new();
        let det = backend.detect("the quick brown fox is in the house with them").unwrap();
        let sum: f64 = det.iter().map(|d| d.confidence).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for pair in det.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn constrain_restricts_and_empty_intersection_fails() {
        let mut backend = NgramBackend::new();
        backend
            .constrain(&["fr".to_string(), "xx".to_string()])
            .unwrap();
        let det = backend.detect("the and is with not that").unwrap();
        assert!(det.iter().all(|d| d.lang == "fr"));

        let mut backend = NgramBackend::new();
        let err = backend.constrain(&["xx".to_string(), "zz".to_string()]);
        assert!(err.is_err());
    }
}
