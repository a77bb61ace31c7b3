//! Pattern matching over an analyzed token stream.
//!
//! For every pattern and start position, all ways of resolving the optional
//! slots are explored, so overlapping variants of one expression are all
//! reported (the detector's unification stage reconciles them).

use std::collections::HashMap;

use mailveil_core::models::AnalyzedDoc;
use regex::Regex;

use crate::pattern::{Pattern, TextConstraint};

/// Inclusive token range of one match.
pub type TokenRange = (usize, usize);

/// Find every distinct inclusive token range matched by any pattern,
/// sorted ascending by `(first, last)`.
pub fn find_matches(doc: &AnalyzedDoc, patterns: &[Pattern]) -> Vec<TokenRange> {
    let mut compiled = RegexCache::default();
    let mut found: Vec<TokenRange> = Vec::new();

    for pattern in patterns {
        for start in 0..doc.tokens.len() {
            match_from(doc, pattern, 0, start, start, &mut compiled, &mut found);
        }
    }

    found.sort_unstable();
    found.dedup();
    found
}

fn match_from(
    doc: &AnalyzedDoc,
    pattern: &Pattern,
    slot: usize,
    start: usize,
    next_token: usize,
    compiled: &mut RegexCache,
    found: &mut Vec<TokenRange>,
) {
    if slot == pattern.len() {
        if next_token > start {
            found.push((start, next_token - 1));
        }
        return;
    }
    let constraint = &pattern[slot];

    if constraint.optional {
        // skip the optional slot
        match_from(doc, pattern, slot + 1, start, next_token, compiled, found);
    }
    if next_token >= doc.tokens.len() {
        return;
    }
    let surface = doc.token_text(next_token);
    let pos = doc.tokens[next_token].pos;
    let regex = compiled.get(constraint.text.as_ref());
    if constraint.accepts(surface, pos, regex) {
        match_from(
            doc,
            pattern,
            slot + 1,
            start,
            next_token + 1,
            compiled,
            found,
        );
    }
}

/// Compiles `Matches` constraints once per matcher run. Sources were
/// validated at registration time, so compilation cannot fail here.
#[derive(Default)]
struct RegexCache {
    map: HashMap<String, Option<Regex>>,
}

impl RegexCache {
    fn get(&mut self, text: Option<&TextConstraint>) -> Option<&Regex> {
        let src = match text {
            Some(TextConstraint::Matches(src)) => src.clone(),
            _ => return None,
        };
        self.map
            .entry(src.clone())
            .or_insert_with(|| Regex::new(&src).ok())
            .as_ref()
    }
}
