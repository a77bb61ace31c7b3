use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered, non-overlapping `[begin, end)` sentence-index intervals, each
/// labeled with a language tag. An empty tag marks a run of sentences for
/// which no language could be determined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LangIntervals {
    // begin -> (end, lang)
    spans: BTreeMap<usize, (usize, String)>,
}

impl LangIntervals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `[begin, end)` labeled `lang`. Empty and inverted ranges are
    /// ignored; overlap with an existing interval is a caller bug and the
    /// later insert wins on the shared begin.
    pub fn insert(&mut self, begin: usize, end: usize, lang: impl Into<String>) {
        if begin < end {
            self.spans.insert(begin, (end, lang.into()));
        }
    }

    /// The language tag covering sentence index `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.spans
            .range(..=idx)
            .next_back()
            .filter(|(_, (end, _))| idx < *end)
            .map(|(_, (_, lang))| lang.as_str())
    }

    /// Iterate `(begin, end, lang)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.spans
            .iter()
            .map(|(&begin, (end, lang))| (begin, *end, lang.as_str()))
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_inside_and_outside_intervals() {
        let mut map = LangIntervals::new();
        map.insert(0, 3, "fr");
        map.insert(3, 5, "es");
        assert_eq!(map.get(0), Some("fr"));
        assert_eq!(map.get(2), Some("fr"));
        assert_eq!(map.get(3), Some("es"));
        assert_eq!(map.get(4), Some("es"));
        assert_eq!(map.get(5), None);
    }

    #[test]
    fn empty_range_is_ignored() {
        let mut map = LangIntervals::new();
        map.insert(2, 2, "fr");
        assert!(map.is_empty());
    }
}
