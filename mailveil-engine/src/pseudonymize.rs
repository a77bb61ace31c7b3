//! The pseudonymization engine.
//!
//! Owns the per-email state (sentences, discovered entities and their
//! sentence bookkeeping) and applies the redaction stages per sentence:
//! email addresses, named entities, then non-date digit runs. One engine
//! must not be shared across concurrently processed emails.

use std::collections::HashMap;
use std::sync::Arc;

use mailveil_core::constants::{DEFAULT_MODEL, EMAIL_PLACEHOLDER, NUMBER_PLACEHOLDER};
use mailveil_core::errors::MailveilResult;
use mailveil_core::models::{EntityCategory, NamedEntity, RedactionFlags};
use mailveil_core::traits::{INerModel, ITextAnalyzer};
use mailveil_models::AnalyzerLoader;
use tracing::{debug, warn};

use crate::pseudonyms::{case_variants, PseudonymTable};

pub struct Pseudonymize {
    ner: Arc<dyn INerModel>,
    analyzers: Arc<AnalyzerLoader>,
    analyzer_model: String,
    table: PseudonymTable,

    // per-email state
    sentences: Vec<String>,
    sentences_after_email: Vec<String>,
    ne_list: Vec<NamedEntity>,
    ne_sent_ids: Vec<usize>,
    ne_by_sentence: HashMap<usize, Vec<NamedEntity>>,
}

impl Pseudonymize {
    pub fn new(
        ner: Arc<dyn INerModel>,
        analyzers: Arc<AnalyzerLoader>,
        table: PseudonymTable,
    ) -> Self {
        Self {
            ner,
            analyzers,
            analyzer_model: DEFAULT_MODEL.to_string(),
            table,
            sentences: Vec::new(),
            sentences_after_email: Vec::new(),
            ne_list: Vec::new(),
            ne_sent_ids: Vec::new(),
            ne_by_sentence: HashMap::new(),
        }
    }

    /// Override the per-language default analyzer model.
    pub fn with_analyzer_model(mut self, model: impl Into<String>) -> Self {
        self.analyzer_model = model.into();
        self
    }

    pub fn table(&self) -> &PseudonymTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut PseudonymTable {
        &mut self.table
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn sentences_after_email(&self) -> &[String] {
        &self.sentences_after_email
    }

    /// Entities discovered in the current email, in discovery order.
    pub fn ne_list(&self) -> &[NamedEntity] {
        &self.ne_list
    }

    /// Sentence index of each entry in [`Self::ne_list`].
    pub fn ne_sentence_ids(&self) -> &[usize] {
        &self.ne_sent_ids
    }

    /// Drop all per-email state, replacing every collection.
    pub fn reset_state(&mut self) {
        self.sentences = Vec::new();
        self.sentences_after_email = Vec::new();
        self.ne_list = Vec::new();
        self.ne_sent_ids = Vec::new();
        self.ne_by_sentence = HashMap::new();
    }

    /// Pseudonymize a text. Returns the processed text and a collision
    /// flag: true when a configured pseudonym equalled a detected person
    /// surface, in which case the colliding names were already removed from
    /// the table and the caller may re-run via
    /// [`Self::pseudonymize_with_updated_ne`].
    pub fn pseudonymize(
        &mut self,
        text: &str,
        lang: &str,
        detected_dates: &[String],
        flags: RedactionFlags,
        prev_ne: Option<&[NamedEntity]>,
    ) -> MailveilResult<(String, bool)> {
        self.reset_state();
        let analyzer = self.analyzers.get(lang, &self.analyzer_model)?;
        self.sentences = analyzer.segment(text)?;

        let sentences = self.sentences.clone();
        let mut processed = Vec::with_capacity(sentences.len());
        for (idx, sentence) in sentences.iter().enumerate() {
            processed.push(self.process_sentence(
                idx,
                sentence,
                lang,
                detected_dates,
                flags,
                prev_ne,
                None,
            )?);
        }
        let output = processed.join(" ");
        let collided = self.collision_check(lang)?;
        Ok((output, collided))
    }

    /// Re-run substitution against previously discovered entities without
    /// invoking the NER model again. `sentences`/`ne_map` default to the
    /// engine's recorded state (prior pseudonym assignments are dropped).
    pub fn pseudonymize_with_updated_ne(
        &mut self,
        sentences: Option<Vec<String>>,
        ne_map: Option<HashMap<usize, Vec<NamedEntity>>>,
        lang: &str,
        detected_dates: &[String],
        flags: RedactionFlags,
        prev_ne: Option<&[NamedEntity]>,
    ) -> MailveilResult<(String, bool)> {
        let sentences = sentences.unwrap_or_else(|| self.sentences.clone());
        let ne_map = ne_map.unwrap_or_else(|| {
            self.ne_by_sentence
                .iter()
                .map(|(&idx, nes)| {
                    (idx, nes.iter().map(NamedEntity::without_pseudonym).collect())
                })
                .collect()
        });

        self.reset_state();
        self.sentences = sentences.clone();

        let mut processed = Vec::with_capacity(sentences.len());
        for (idx, sentence) in sentences.iter().enumerate() {
            let supplied = ne_map.get(&idx).cloned().unwrap_or_default();
            processed.push(self.process_sentence(
                idx,
                sentence,
                lang,
                detected_dates,
                flags,
                prev_ne,
                Some(supplied),
            )?);
        }
        let output = processed.join(" ");
        let collided = self.collision_check(lang)?;
        Ok((output, collided))
    }

    /// Apply the enabled redaction stages to one sentence, recording every
    /// processed entity into per-email state.
    #[allow(clippy::too_many_arguments)]
    fn process_sentence(
        &mut self,
        idx: usize,
        sentence: &str,
        lang: &str,
        detected_dates: &[String],
        flags: RedactionFlags,
        prev_ne: Option<&[NamedEntity]>,
        ne_override: Option<Vec<NamedEntity>>,
    ) -> MailveilResult<String> {
        let mut current = sentence.to_string();

        if flags.emails {
            current = replace_email_addresses(&current);
        }
        self.sentences_after_email.push(current.clone());

        if flags.entities {
            let entities = match ne_override {
                Some(supplied) => supplied,
                None => match self.ner.recognize(&current) {
                    Ok(entities) => entities,
                    Err(err) => {
                        // non-fatal: the sentence passes through unchanged
                        warn!(sentence_index = idx, %err, "NER failed for sentence");
                        Vec::new()
                    }
                },
            };
            current = self.replace_entities(idx, &current, entities, lang, prev_ne)?;
        }

        if flags.numbers {
            current = replace_numbers(&current, detected_dates);
        }
        Ok(current)
    }

    /// Splice entity replacements left-to-right, shifting subsequent spans
    /// by the accumulated length difference.
    fn replace_entities(
        &mut self,
        sentence_idx: usize,
        sentence: &str,
        entities: Vec<NamedEntity>,
        lang: &str,
        prev_ne: Option<&[NamedEntity]>,
    ) -> MailveilResult<String> {
        let mut current = sentence.to_string();
        let mut offset: isize = 0;

        for mut entity in entities {
            let replacement = match entity.category.placeholder() {
                Some(placeholder) => placeholder.to_string(),
                None => self.choose_pseudonym(&entity.word, lang, prev_ne)?,
            };

            let start = entity.start as isize + offset;
            let end = entity.end as isize + offset;
            if start < 0 || end < start {
                warn!(sentence_index = sentence_idx, "entity span out of range, skipping");
                continue;
            }
            let (start, end) = (start as usize, end as usize);
            match (current.get(..start), current.get(end..)) {
                (Some(head), Some(tail)) => {
                    current = format!("{head}{replacement}{tail}");
                    offset += replacement.len() as isize - (entity.end - entity.start) as isize;
                }
                _ => {
                    warn!(sentence_index = sentence_idx, "entity span out of range, skipping");
                    continue;
                }
            }

            entity.pseudonym = Some(replacement);
            self.ne_list.push(entity.clone());
            self.ne_sent_ids.push(sentence_idx);
            self.ne_by_sentence
                .entry(sentence_idx)
                .or_default()
                .push(entity);
        }
        Ok(current)
    }

    /// Pick the pseudonym for a person surface: a previous assignment if
    /// any case variant of the surface was seen before, otherwise the next
    /// unused list entry, wrapping to the first entry once the list is
    /// exhausted.
    fn choose_pseudonym(
        &self,
        word: &str,
        lang: &str,
        prev_ne: Option<&[NamedEntity]>,
    ) -> MailveilResult<String> {
        let mut used_names: Vec<&str> = Vec::new();
        let mut used_pseudonyms: Vec<&str> = Vec::new();
        let persons = self
            .ne_list
            .iter()
            .filter(|ne| ne.category == EntityCategory::Per);
        let carried = prev_ne
            .unwrap_or(&[])
            .iter()
            .filter(|ne| ne.category == EntityCategory::Per);
        for ne in persons.chain(carried) {
            if let Some(pseudonym) = &ne.pseudonym {
                used_names.push(&ne.word);
                used_pseudonyms.push(pseudonym);
            }
        }
        let n_used = self
            .ne_list
            .iter()
            .filter(|ne| ne.category == EntityCategory::Per)
            .count();

        for variant in case_variants(word) {
            if let Some(pos) = used_names.iter().position(|&name| name == variant) {
                return Ok(used_pseudonyms[pos].to_string());
            }
        }

        let names = self.table.names_for(lang)?;
        let chosen = names
            .get(n_used)
            .or_else(|| names.first())
            .cloned()
            .unwrap_or_default();
        Ok(chosen)
    }

    /// Check the active pseudonym list against the person surfaces seen in
    /// this email. Colliding names are removed from the table in place.
    fn collision_check(&mut self, lang: &str) -> MailveilResult<bool> {
        let mut forbidden: Vec<String> = Vec::new();
        for ne in &self.ne_list {
            if ne.category != EntityCategory::Per {
                continue;
            }
            let Some(first_token) = ne.word.split_whitespace().next() else {
                continue;
            };
            for variant in case_variants(first_token) {
                if !forbidden.contains(&variant) {
                    forbidden.push(variant);
                }
            }
        }
        if forbidden.is_empty() {
            return Ok(false);
        }
        let removed = self.table.remove_colliding(lang, &forbidden)?;
        if !removed.is_empty() {
            debug!(?removed, "collision recovery required");
        }
        Ok(!removed.is_empty())
    }
}

/// Replace every whitespace-separated token containing `@`; whitespace is
/// collapsed to single spaces as a side effect of the token pass.
fn replace_email_addresses(sentence: &str) -> String {
    sentence
        .split_whitespace()
        .map(|token| {
            if token.contains('@') {
                EMAIL_PLACEHOLDER
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace digit runs that do not start inside an occurrence of a detected
/// date surface.
fn replace_numbers(sentence: &str, detected_dates: &[String]) -> String {
    let mut covered = vec![false; sentence.len()];
    for date in detected_dates {
        if date.is_empty() {
            continue;
        }
        let mut from = 0;
        while let Some(found) = sentence[from..].find(date.as_str()) {
            let abs = from + found;
            covered[abs..abs + date.len()].fill(true);
            from = abs + date.len();
        }
    }

    let mut out = String::with_capacity(sentence.len());
    let mut iter = sentence.char_indices().peekable();
    while let Some(&(start, c)) = iter.peek() {
        if !c.is_ascii_digit() {
            out.push(c);
            iter.next();
            continue;
        }
        let mut end = start;
        while let Some(&(i, d)) = iter.peek() {
            if d.is_ascii_digit() {
                iter.next();
                end = i + 1;
            } else {
                break;
            }
        }
        if covered[start] {
            out.push_str(&sentence[start..end]);
        } else {
            out.push_str(NUMBER_PLACEHOLDER);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_tokens_are_replaced_and_whitespace_collapsed() {
        assert_eq!(
            replace_email_addresses("Alice (alice@gmail.com)  viendra"),
            "Alice [email] viendra"
        );
        assert_eq!(replace_email_addresses("pas de courriel"), "pas de courriel");
    }

    #[test]
    fn digit_runs_outside_dates_are_redacted() {
        let dates = vec!["27.03.2025 13:37".to_string()];
        assert_eq!(
            replace_numbers("The test date is 27.03.2025 13:37 with number 123-456-789.", &dates),
            "The test date is 27.03.2025 13:37 with number [number]-[number]-[number]."
        );
    }

    #[test]
    fn repeated_date_occurrences_are_all_preserved() {
        let dates = vec!["10:30".to_string()];
        assert_eq!(
            replace_numbers("10:30 puis encore 10:30 et 99", &dates),
            "10:30 puis encore 10:30 et [number]"
        );
    }

    #[test]
    fn no_dates_means_all_digit_runs_go() {
        assert_eq!(replace_numbers("à 10h00", &[]), "à [number]h[number]");
    }
}
