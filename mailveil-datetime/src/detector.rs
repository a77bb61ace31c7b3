//! The staged date/time detection pipeline.
//!
//! 1. multi-token pattern matching, parse-gated;
//! 2. one left-to-right unification pass over overlapping matches;
//! 3. single-token candidates (non-strict only) outside matched ranges;
//! 4. adjacency merge across connector tokens, parse-gated;
//! 5. numeric filter: a span without a digit is not a date.

use mailveil_core::errors::{DateTimeError, MailveilResult};
use mailveil_core::models::{AnalyzedDoc, DateTimeSpan, ParsingMode};
use mailveil_core::traits::ITextAnalyzer;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::calendar;
use crate::matcher;
use crate::pattern::{self, Pattern, SINGLE_WORD_POS, SPECIAL_TIME_SEPS, TIME_SEPS};

/// Inclusive token range plus its parse result.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    first: usize,
    last: usize,
    parsed: Option<NaiveDateTime>,
}

pub struct TimeDetector {
    mode: ParsingMode,
    non_strict: Vec<Pattern>,
    strict: Vec<Pattern>,
}

impl TimeDetector {
    pub fn new(mode: ParsingMode) -> Self {
        Self {
            mode,
            non_strict: pattern::non_strict_patterns(),
            strict: pattern::strict_patterns(),
        }
    }

    pub fn mode(&self) -> ParsingMode {
        self.mode
    }

    /// The registered patterns for a mode.
    pub fn patterns(&self, mode: ParsingMode) -> &[Pattern] {
        match mode {
            ParsingMode::NonStrict => &self.non_strict,
            ParsingMode::Strict => &self.strict,
        }
    }

    /// Register an additional pattern. Malformed and duplicate patterns are
    /// rejected here, at configuration time.
    pub fn add_pattern(&mut self, p: Pattern, mode: ParsingMode) -> Result<(), DateTimeError> {
        pattern::validate(&p)?;
        let set = self.patterns_mut(mode);
        if set.contains(&p) {
            return Err(DateTimeError::DuplicatePattern {
                mode: mode.as_str().to_string(),
            });
        }
        set.push(p);
        Ok(())
    }

    /// Remove a previously registered pattern.
    pub fn remove_pattern(&mut self, p: &Pattern, mode: ParsingMode) -> Result<(), DateTimeError> {
        let set = self.patterns_mut(mode);
        match set.iter().position(|existing| existing == p) {
            Some(idx) => {
                set.remove(idx);
                Ok(())
            }
            None => Err(DateTimeError::UnknownPattern {
                mode: mode.as_str().to_string(),
            }),
        }
    }

    fn patterns_mut(&mut self, mode: ParsingMode) -> &mut Vec<Pattern> {
        match mode {
            ParsingMode::NonStrict => &mut self.non_strict,
            ParsingMode::Strict => &mut self.strict,
        }
    }

    /// Parse a candidate surface under the detector's strictness.
    pub fn parse_time(&self, surface: &str) -> Option<NaiveDateTime> {
        calendar::parse(surface, self.mode)
    }

    /// Detect date/time spans in an analyzed text. Spans are ordered
    /// ascending by start offset and non-overlapping.
    pub fn get_date_time(&self, doc: &AnalyzedDoc) -> Vec<DateTimeSpan> {
        let (multi, marked) = self.extract_multi_word(doc);
        let mut candidates = multi;
        if self.mode == ParsingMode::NonStrict {
            candidates.extend(self.extract_single_word(doc, &marked));
        }
        candidates.sort_by_key(|c| (c.first, c.last));

        let merged = self.merge_date_time(&candidates, doc);

        // spans without any digit are month names and similar false hits
        let result: Vec<DateTimeSpan> = merged
            .into_iter()
            .filter(|span| span.surface.chars().any(|c| c.is_ascii_digit()))
            .collect();
        debug!(count = result.len(), mode = self.mode.as_str(), "date/time spans detected");
        result
    }

    /// Segment and analyze `text` with `analyzer`, then detect.
    pub fn get_date_time_text(
        &self,
        text: &str,
        analyzer: &dyn ITextAnalyzer,
    ) -> MailveilResult<Vec<DateTimeSpan>> {
        let doc = analyzer.analyze(text)?;
        Ok(self.get_date_time(&doc))
    }

    /// Stage 1 + 2: pattern matches that parse, unified left-to-right.
    fn extract_multi_word(&self, doc: &AnalyzedDoc) -> (Vec<Candidate>, Vec<(usize, usize)>) {
        let active = self.patterns(self.mode);
        let mut candidates = Vec::new();
        for (first, last) in matcher::find_matches(doc, active) {
            let surface = doc.span_text(first, last);
            if let parsed @ Some(_) = self.parse_time(surface) {
                candidates.push(Candidate {
                    first,
                    last,
                    parsed,
                });
            }
        }
        let united = self.unite_overlapping(candidates, doc);
        let marked = united.iter().map(|c| (c.first, c.last)).collect();
        (united, marked)
    }

    /// One left-to-right pass merging touching or overlapping matches.
    fn unite_overlapping(&self, candidates: Vec<Candidate>, doc: &AnalyzedDoc) -> Vec<Candidate> {
        if candidates.len() <= 1 {
            return candidates;
        }
        let mut united = Vec::with_capacity(candidates.len());
        let mut count = 0;
        while count < candidates.len() - 1 {
            let current = candidates[count];
            let next = candidates[count + 1];
            if current.last + 1 >= next.first {
                let parsed = self.parse_time(doc.span_text(current.first, next.last));
                if parsed.is_some() || self.mode == ParsingMode::NonStrict {
                    united.push(Candidate {
                        first: current.first,
                        last: next.last,
                        parsed,
                    });
                    count += 2;
                    continue;
                }
            }
            united.push(current);
            count += 1;
        }
        if count == candidates.len() - 1 {
            united.push(candidates[candidates.len() - 1]);
        }
        united
    }

    /// Stage 3: lone tokens outside every matched range.
    fn extract_single_word(&self, doc: &AnalyzedDoc, marked: &[(usize, usize)]) -> Vec<Candidate> {
        let mut singles = Vec::new();
        for (i, token) in doc.tokens.iter().enumerate() {
            let outside = marked.iter().all(|&(first, last)| i < first || i > last);
            if !outside || !SINGLE_WORD_POS.contains(&token.pos) {
                continue;
            }
            if let parsed @ Some(_) = self.parse_time(doc.token_text(i)) {
                singles.push(Candidate {
                    first: i,
                    last: i,
                    parsed,
                });
            }
        }
        singles
    }

    /// Stage 4: merge adjacent candidates across connector tokens.
    fn merge_date_time(&self, candidates: &[Candidate], doc: &AnalyzedDoc) -> Vec<DateTimeSpan> {
        let mut merged: Vec<DateTimeSpan> = Vec::new();
        match candidates.len() {
            0 => return merged,
            1 => {
                push_replacing_subsets(&mut merged, self.span_of(candidates[0], doc));
                return merged;
            }
            _ => {}
        }

        let mut count = 0;
        let mut current = candidates[0];
        let mut was_merged = false;
        while count < candidates.len() - 1 {
            let next = candidates[count + 1];
            let combined_text = doc.span_text(current.first, next.last);
            let combined_parse = self.parse_time(combined_text);
            if self.is_time_mergeable(&current, &next, doc) && combined_parse.is_some() {
                let combined = Candidate {
                    first: current.first,
                    last: next.last,
                    parsed: combined_parse,
                };
                push_replacing_subsets(&mut merged, self.span_of(combined, doc));
                current = combined;
                was_merged = true;
            } else {
                push_replacing_subsets(&mut merged, self.span_of(current, doc));
                current = next;
                was_merged = false;
            }
            count += 1;
        }
        if !was_merged {
            push_replacing_subsets(&mut merged, self.span_of(candidates[candidates.len() - 1], doc));
        }
        merged
    }

    fn span_of(&self, candidate: Candidate, doc: &AnalyzedDoc) -> DateTimeSpan {
        let (start, end) = doc.span_bounds(candidate.first, candidate.last);
        DateTimeSpan::new(
            doc.span_text(candidate.first, candidate.last),
            candidate.parsed,
            start,
            end,
        )
    }

    /// Two spans can merge when they are directly adjacent, or separated by
    /// one connector token, or by one of the two-token connectors.
    fn is_time_mergeable(&self, first: &Candidate, second: &Candidate, doc: &AnalyzedDoc) -> bool {
        let e_first = first.last;
        let s_second = second.first;
        if e_first + 1 == s_second {
            return true;
        }
        if s_second <= e_first {
            return false;
        }
        if e_first + 2 == s_second && TIME_SEPS.contains(&doc.token_text(e_first + 1)) {
            return true;
        }
        e_first + 3 == s_second
            && SPECIAL_TIME_SEPS.contains(&doc.span_text(e_first + 1, e_first + 2))
    }
}

/// Append a span, replacing the previous emission when the new span
/// strictly contains it.
fn push_replacing_subsets(merged: &mut Vec<DateTimeSpan>, span: DateTimeSpan) {
    if let Some(last) = merged.last() {
        if span.start <= last.start && span.end >= last.end {
            merged.pop();
        }
    }
    merged.push(span);
}
