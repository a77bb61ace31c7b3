//! Per-language pseudonym lists and case-variant matching.

use mailveil_core::errors::{EngineError, MailveilResult};
use tracing::warn;

/// Ordered per-language pseudonym lists.
///
/// Registration order is significant twice over: names are assigned in list
/// order, and the first registered language is the fallback for languages
/// without a list of their own. Collision filtering removes names in place,
/// which affects every later email sharing this table.
#[derive(Debug, Clone, Default)]
pub struct PseudonymTable {
    lists: Vec<(String, Vec<String>)>,
}

impl PseudonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(lists: &[(String, Vec<String>)]) -> Self {
        Self {
            lists: lists.to_vec(),
        }
    }

    pub fn register(&mut self, lang: impl Into<String>, names: Vec<String>) {
        self.lists.push((lang.into(), names));
    }

    /// Resolve a language to the one actually carrying its list: the
    /// language itself when registered, otherwise the first registered one.
    pub fn resolve_lang(&self, lang: &str) -> MailveilResult<&str> {
        if let Some((l, _)) = self.lists.iter().find(|(l, _)| l.as_str() == lang) {
            return Ok(l.as_str());
        }
        self.lists
            .first()
            .map(|(l, _)| l.as_str())
            .ok_or_else(|| EngineError::NoPseudonymLists.into())
    }

    /// The active list for a language, after fallback resolution.
    pub fn names_for(&self, lang: &str) -> MailveilResult<&[String]> {
        let resolved = self.resolve_lang(lang)?;
        Ok(self
            .lists
            .iter()
            .find(|(l, _)| l.as_str() == resolved)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[]))
    }

    /// Remove every name in `forbidden` (exact match) from the language's
    /// active list, in place. Returns the removed names; errors when the
    /// list ends up empty.
    pub fn remove_colliding(
        &mut self,
        lang: &str,
        forbidden: &[String],
    ) -> MailveilResult<Vec<String>> {
        let resolved = self.resolve_lang(lang)?.to_string();
        let Some((_, names)) = self.lists.iter_mut().find(|(l, _)| l.as_str() == resolved) else {
            return Ok(Vec::new());
        };
        let mut removed = Vec::new();
        names.retain(|name| {
            if forbidden.contains(name) {
                removed.push(name.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            warn!(lang = %resolved, removed = ?removed, "pseudonyms collided with text and were dropped");
        }
        if names.is_empty() {
            return Err(EngineError::InsufficientPseudonyms { lang: resolved }.into());
        }
        Ok(removed)
    }
}

/// Title case: the first letter of every alphabetic run is uppercased,
/// the rest lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// The three case variants a surface is compared under: literal, lowercased
/// and title-cased.
pub fn case_variants(s: &str) -> [String; 3] {
    [s.to_string(), s.to_lowercase(), title_case(s)]
}
