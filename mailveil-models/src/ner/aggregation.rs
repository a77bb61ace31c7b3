//! Aggregation of per-token predictions into entity spans.
//!
//! Contiguous sub-tokens of the same category are merged into one span
//! whose confidence is the mean of the member scores ("simple" strategy).

use mailveil_core::models::NamedEntity;

use super::labels::{parse_label, BioPrefix};

/// One classified token with byte offsets into the sentence.
#[derive(Debug, Clone)]
pub struct TokenPrediction {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub score: f64,
}

/// Merge token predictions into aggregated, non-overlapping entity spans
/// sorted ascending by start offset.
pub fn aggregate(sentence: &str, predictions: &[TokenPrediction]) -> Vec<NamedEntity> {
    let mut entities: Vec<NamedEntity> = Vec::new();
    let mut current: Option<(NamedEntity, Vec<f64>)> = None;

    for pred in predictions {
        let (prefix, category) = parse_label(&pred.label);
        match (prefix, category) {
            (BioPrefix::Outside, _) | (_, None) => {
                flush(sentence, &mut current, &mut entities);
            }
            (BioPrefix::Begin, Some(cat)) => {
                flush(sentence, &mut current, &mut entities);
                let ne = NamedEntity::new("", pred.start, pred.end, cat);
                current = Some((ne, vec![pred.score]));
            }
            (BioPrefix::Inside, Some(cat)) => match current.as_mut() {
                Some((ne, scores)) if ne.category == cat && pred.start >= ne.end => {
                    ne.end = pred.end;
                    scores.push(pred.score);
                }
                _ => {
                    // dangling inside-tag starts a fresh span
                    flush(sentence, &mut current, &mut entities);
                    let ne = NamedEntity::new("", pred.start, pred.end, cat);
                    current = Some((ne, vec![pred.score]));
                }
            },
        }
    }
    flush(sentence, &mut current, &mut entities);
    entities
}

fn flush(
    sentence: &str,
    current: &mut Option<(NamedEntity, Vec<f64>)>,
    out: &mut Vec<NamedEntity>,
) {
    if let Some((mut ne, scores)) = current.take() {
        ne.word = sentence[ne.start..ne.end].to_string();
        ne.score = scores.iter().sum::<f64>() / scores.len() as f64;
        out.push(ne);
    }
}
