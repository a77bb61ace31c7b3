//! BIO label handling for token-classification output.

use mailveil_core::models::EntityCategory;

/// Position prefix of a BIO-tagged label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioPrefix {
    Begin,
    Inside,
    Outside,
}

/// Label set of the bundled CoNLL-2003 token-classification head, in
/// output-index order.
pub const CONLL_LABELS: &[&str] = &[
    "O", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
];

/// Split a raw model label into its BIO prefix and entity category.
/// Unknown labels read as outside.
pub fn parse_label(label: &str) -> (BioPrefix, Option<EntityCategory>) {
    if label == "O" || label.is_empty() {
        return (BioPrefix::Outside, None);
    }
    let (prefix, rest) = match label.split_once('-') {
        Some((p, rest)) => (p, rest),
        None => ("B", label),
    };
    let category = EntityCategory::from_label(rest);
    if category.is_none() {
        return (BioPrefix::Outside, None);
    }
    match prefix {
        "B" => (BioPrefix::Begin, category),
        "I" => (BioPrefix::Inside, category),
        _ => (BioPrefix::Outside, None),
    }
}
