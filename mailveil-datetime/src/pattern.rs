//! Token-constraint pattern DSL.
//!
//! A pattern is an ordered list of constraints, each restricting one token
//! by POS set, literal text, excluded texts, a text regex or punctuation
//! class, optionally quantified with `?`. Patterns are validated when they
//! are added; the matcher never sees a malformed one.

use mailveil_core::errors::DateTimeError;
use mailveil_core::models::{ParsingMode, Pos};
use regex::Regex;

/// Text-level constraint of one pattern slot.
#[derive(Debug, Clone)]
pub enum TextConstraint {
    Literal(String),
    NotIn(Vec<String>),
    /// Regex source; compiled once at validation time.
    Matches(String),
}

impl PartialEq for TextConstraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::NotIn(a), Self::NotIn(b)) => a == b,
            (Self::Matches(a), Self::Matches(b)) => a == b,
            _ => false,
        }
    }
}

/// Constraint on a single token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenConstraint {
    pub pos: Option<Vec<Pos>>,
    pub text: Option<TextConstraint>,
    pub is_punct: Option<bool>,
    /// `?` quantifier: the slot may be skipped.
    pub optional: bool,
}

impl TokenConstraint {
    /// Matches any token.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn pos(pos: Pos) -> Self {
        Self {
            pos: Some(vec![pos]),
            ..Self::default()
        }
    }

    pub fn pos_in(set: &[Pos]) -> Self {
        Self {
            pos: Some(set.to_vec()),
            ..Self::default()
        }
    }

    pub fn literal(text: &str) -> Self {
        Self {
            text: Some(TextConstraint::Literal(text.to_string())),
            ..Self::default()
        }
    }

    pub fn punct_opt() -> Self {
        Self {
            is_punct: Some(true),
            optional: true,
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_in(mut self, texts: &[&str]) -> Self {
        self.text = Some(TextConstraint::NotIn(
            texts.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn matching(mut self, regex: &str) -> Self {
        self.text = Some(TextConstraint::Matches(regex.to_string()));
        self
    }

    /// Check whether `surface`/`pos` satisfy this constraint. `regex` must
    /// be the compiled form of a `Matches` text constraint, if any.
    pub(crate) fn accepts(&self, surface: &str, pos: Pos, regex: Option<&Regex>) -> bool {
        if let Some(wanted) = &self.pos {
            if !wanted.contains(&pos) {
                return false;
            }
        }
        if let Some(is_punct) = self.is_punct {
            if (pos == Pos::Punct) != is_punct {
                return false;
            }
        }
        match &self.text {
            Some(TextConstraint::Literal(t)) => surface == t,
            Some(TextConstraint::NotIn(set)) => !set.iter().any(|t| t == surface),
            Some(TextConstraint::Matches(_)) => {
                regex.map_or(false, |re| re.is_match(surface))
            }
            None => true,
        }
    }
}

/// An ordered sequence of token constraints.
pub type Pattern = Vec<TokenConstraint>;

/// Validate a pattern for registration: it must be non-empty and any regex
/// constraint must compile.
pub fn validate(pattern: &Pattern) -> Result<(), DateTimeError> {
    if pattern.is_empty() {
        return Err(DateTimeError::InvalidPattern {
            reason: "pattern must be a non-empty list of constraints".to_string(),
        });
    }
    for constraint in pattern {
        if let Some(TextConstraint::Matches(src)) = &constraint.text {
            Regex::new(src).map_err(|e| DateTimeError::InvalidPattern {
                reason: format!("bad regex '{src}': {e}"),
            })?;
        }
        if let Some(pos) = &constraint.pos {
            if pos.is_empty() {
                return Err(DateTimeError::InvalidPattern {
                    reason: "empty POS set".to_string(),
                });
            }
        }
    }
    Ok(())
}

/// POS classes a single token may carry and still be considered a date or
/// time candidate on its own. Tagging of numeric shapes varies with the
/// language setting, so the set is broad.
pub const SINGLE_WORD_POS: &[Pos] = &[
    Pos::Noun,
    Pos::Num,
    Pos::Propn,
    Pos::Verb,
    Pos::Pron,
    Pos::X,
    Pos::Adv,
];

/// Separators allowed between two mergeable date/time spans.
pub const TIME_SEPS: &[&str] = &["at", "um", "à", ",", ".", "-"];

/// Two-token separators allowed between two mergeable spans.
pub const SPECIAL_TIME_SEPS: &[&str] = &[".,", "a las"];

/// The non-strict pattern set.
pub fn non_strict_patterns() -> Vec<Pattern> {
    vec![
        // 09 février 2009
        vec![
            TokenConstraint::pos(Pos::Noun).not_in(&["-"]),
            TokenConstraint::pos(Pos::Noun).not_in(&["-"]),
            TokenConstraint::pos(Pos::Num),
        ],
        // 14 mars 2025, 17. April 2024, 17 abr. 2024
        vec![
            TokenConstraint::pos(Pos::Num),
            TokenConstraint::punct_opt(),
            TokenConstraint::any(),
            TokenConstraint::punct_opt(),
            TokenConstraint::pos(Pos::Num),
        ],
        // April 17th 2024 (foreign-tagged material)
        vec![
            TokenConstraint::pos(Pos::X),
            TokenConstraint::pos(Pos::X),
            TokenConstraint::pos(Pos::X),
        ],
        // 2025-03-12
        vec![
            TokenConstraint::pos(Pos::Noun),
            TokenConstraint::literal("-"),
            TokenConstraint::pos(Pos::Noun),
            TokenConstraint::literal("-"),
            TokenConstraint::pos(Pos::Num),
        ],
        // 2025-03-01
        vec![
            TokenConstraint::pos(Pos::Noun),
            TokenConstraint::literal("-"),
            TokenConstraint::pos(Pos::Noun),
            TokenConstraint::literal("-"),
            TokenConstraint::pos(Pos::Noun),
        ],
    ]
}

/// Suffix appended to every non-strict pattern for the strict set:
/// an optional separator token followed by a clock-like token.
fn hour_minutes_suffix() -> Vec<TokenConstraint> {
    vec![
        TokenConstraint::any().optional(),
        TokenConstraint::pos_in(SINGLE_WORD_POS).matching(r"^[\d:+.]+$"),
    ]
}

/// Single-token numeric date shapes only used in strict mode
/// (`17.04.2024`, `17/04/2024`).
fn special_strict_patterns() -> Vec<Pattern> {
    vec![vec![
        TokenConstraint::pos_in(SINGLE_WORD_POS).matching(r"^\d{1,2}([./])\d{1,2}([./])\d{2,4}"),
    ]]
}

/// The strict pattern set derived from the non-strict one.
pub fn strict_patterns() -> Vec<Pattern> {
    let suffix = hour_minutes_suffix();
    let mut patterns: Vec<Pattern> = non_strict_patterns()
        .into_iter()
        .map(|mut p| {
            p.extend(suffix.iter().cloned());
            p
        })
        .collect();
    for mut special in special_strict_patterns() {
        special.extend(suffix.iter().cloned());
        patterns.push(special);
    }
    patterns
}

/// Default pattern set for a parsing mode.
pub fn defaults_for(mode: ParsingMode) -> Vec<Pattern> {
    match mode {
        ParsingMode::NonStrict => non_strict_patterns(),
        ParsingMode::Strict => strict_patterns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets_validate() {
        for pattern in non_strict_patterns().iter().chain(strict_patterns().iter()) {
            validate(pattern).unwrap();
        }
    }

    #[test]
    fn strict_set_extends_every_non_strict_pattern() {
        let non_strict = non_strict_patterns();
        let strict = strict_patterns();
        assert_eq!(strict.len(), non_strict.len() + 1);
        for (ns, s) in non_strict.iter().zip(strict.iter()) {
            assert_eq!(&s[..ns.len()], &ns[..]);
            assert_eq!(s.len(), ns.len() + 2);
        }
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(validate(&Vec::new()).is_err());
    }

    #[test]
    fn bad_regex_is_rejected() {
        let pattern = vec![TokenConstraint::any().matching("(unclosed")];
        assert!(validate(&pattern).is_err());
    }
}
