//! Per-email state bookkeeping and degradation behavior.

use std::sync::Arc;

use mailveil_core::models::{EntityCategory, NamedEntity, RedactionFlags};
use mailveil_engine::{Pseudonymize, PseudonymTable};
use mailveil_models::AnalyzerLoader;
use test_fixtures::{FailingNer, StubNer};

fn table() -> PseudonymTable {
    PseudonymTable::from_config(&[(
        "fr".to_string(),
        vec!["Claude".into(), "Dominique".into(), "Camille".into()],
    )])
}

fn engine() -> Pseudonymize {
    Pseudonymize::new(
        Arc::new(StubNer::scenario_vocabulary()),
        Arc::new(AnalyzerLoader::new()),
        table(),
    )
}

#[test]
fn entities_are_recorded_with_their_sentence_index() {
    let mut engine = engine();
    engine
        .pseudonymize(
            "Francois habite Paris. Agathe travaille chez Acme.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();

    let words: Vec<&str> = engine.ne_list().iter().map(|ne| ne.word.as_str()).collect();
    assert_eq!(words, ["Francois", "Paris", "Agathe", "Acme"]);
    assert_eq!(engine.ne_sentence_ids(), [0, 0, 1, 1]);
    assert_eq!(engine.sentences().len(), 2);

    let per: Vec<_> = engine
        .ne_list()
        .iter()
        .filter(|ne| ne.category == EntityCategory::Per)
        .collect();
    assert_eq!(per[0].pseudonym.as_deref(), Some("Claude"));
    assert_eq!(per[1].pseudonym.as_deref(), Some("Dominique"));
    // non-person entities carry their placeholder as the assignment
    assert_eq!(engine.ne_list()[1].pseudonym.as_deref(), Some("[location]"));
}

#[test]
fn state_is_cleared_between_emails() {
    let mut engine = engine();
    engine
        .pseudonymize("Francois est ici.", "fr", &[], RedactionFlags::default(), None)
        .unwrap();
    assert_eq!(engine.ne_list().len(), 1);

    engine
        .pseudonymize("Rien à signaler.", "fr", &[], RedactionFlags::default(), None)
        .unwrap();
    assert!(engine.ne_list().is_empty());
    assert_eq!(engine.sentences(), ["Rien à signaler."]);
}

#[test]
fn rerun_is_idempotent() {
    let mut engine = engine();
    engine
        .pseudonymize(
            "Francois et Agathe iront au MeetingPoint le 12.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();

    let (first, _) = engine
        .pseudonymize_with_updated_ne(None, None, "fr", &[], RedactionFlags::default(), None)
        .unwrap();
    let first_entities = engine.ne_list().to_vec();

    let (second, _) = engine
        .pseudonymize_with_updated_ne(None, None, "fr", &[], RedactionFlags::default(), None)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first_entities, engine.ne_list());
}

#[test]
fn ner_failure_leaves_the_sentence_unredacted_but_other_stages_run() {
    let mut engine = Pseudonymize::new(
        Arc::new(FailingNer),
        Arc::new(AnalyzerLoader::new()),
        table(),
    );
    let (output, collided) = engine
        .pseudonymize(
            "Francois a écrit f@x.org et le code 1234.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();
    assert!(!collided);
    assert_eq!(output, "Francois a écrit [email] et le code [number].");
    assert!(engine.ne_list().is_empty());
}

#[test]
fn carried_entities_align_pseudonyms_across_fields() {
    let mut engine = engine();
    engine
        .pseudonymize(
            "Francois et Agathe sont amis.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();
    let body_entities = engine.ne_list().to_vec();

    // a later field mentioning Agathe first still reuses her pseudonym
    let (subject, _) = engine
        .pseudonymize(
            "Agathe et Francois",
            "fr",
            &[],
            RedactionFlags::default(),
            Some(&body_entities),
        )
        .unwrap();
    assert_eq!(subject, "Dominique et Claude");
}

#[test]
fn sentences_after_email_reflect_the_email_stage() {
    let mut engine = engine();
    engine
        .pseudonymize(
            "Écrire à x@y.fr demain. Merci.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();
    assert_eq!(
        engine.sentences_after_email(),
        ["Écrire à [email] demain.", "Merci."]
    );
    // the recorded sentences stay pristine
    assert_eq!(engine.sentences(), ["Écrire à x@y.fr demain.", "Merci."]);
}

#[test]
fn empty_input_produces_empty_output() {
    let mut engine = engine();
    let (output, collided) = engine
        .pseudonymize("", "fr", &[], RedactionFlags::default(), None)
        .unwrap();
    assert!(!collided);
    assert!(output.is_empty());
    assert!(engine.sentences().is_empty());
}

#[test]
fn offsets_stay_valid_after_length_changing_substitutions() {
    // two entities in one sentence where the first replacement grows the text
    let ner = StubNer::new()
        .with("Al", EntityCategory::Per)
        .with("MeetingPoint", EntityCategory::Loc);
    let mut engine = Pseudonymize::new(Arc::new(ner), Arc::new(AnalyzerLoader::new()), table());
    let (output, _) = engine
        .pseudonymize(
            "Al ira au MeetingPoint.",
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();
    assert_eq!(output, "Claude ira au [location].");
}

#[test]
fn rerun_with_supplied_sentences_skips_segmentation() {
    let mut engine = engine();
    let sentences = vec![
        "Première phrase avec Francois.".to_string(),
        "Seconde phrase.".to_string(),
    ];
    let mut map = std::collections::HashMap::new();
    // "è" is two bytes wide, so the surface starts at byte 22
    map.insert(0, vec![NamedEntity::new("Francois", 22, 30, EntityCategory::Per)]);
    let (output, _) = engine
        .pseudonymize_with_updated_ne(
            Some(sentences.clone()),
            Some(map),
            "fr",
            &[],
            RedactionFlags::default(),
            None,
        )
        .unwrap();
    assert_eq!(output, "Première phrase avec Claude. Seconde phrase.");
    assert_eq!(engine.sentences(), &sentences[..]);
}
