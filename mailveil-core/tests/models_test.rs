use mailveil_core::models::*;

#[test]
fn entity_category_parses_model_labels() {
    assert_eq!(EntityCategory::from_label("PER"), Some(EntityCategory::Per));
    assert_eq!(EntityCategory::from_label("B-LOC"), Some(EntityCategory::Loc));
    assert_eq!(EntityCategory::from_label("I-ORG"), Some(EntityCategory::Org));
    assert_eq!(EntityCategory::from_label("misc"), Some(EntityCategory::Misc));
    assert_eq!(EntityCategory::from_label("DATE"), None);
}

#[test]
fn placeholders_cover_non_person_categories() {
    assert_eq!(EntityCategory::Per.placeholder(), None);
    assert_eq!(EntityCategory::Loc.placeholder(), Some("[location]"));
    assert_eq!(EntityCategory::Org.placeholder(), Some("[organization]"));
    assert_eq!(EntityCategory::Misc.placeholder(), Some("[misc]"));
}

#[test]
fn named_entity_serialization_drops_the_score() {
    let mut ne = NamedEntity::new("Alice", 0, 5, EntityCategory::Per);
    ne.score = 0.87;
    ne.pseudonym = Some("Claude".to_string());
    let json = serde_json::to_value(&ne).unwrap();
    assert!(json.get("score").is_none());
    assert_eq!(json["word"], "Alice");
    assert_eq!(json["pseudonym"], "Claude");
    assert_eq!(json["entity_group"], "PER");
}

#[test]
fn analyzed_doc_span_text_keeps_original_spacing() {
    let text = "mié., 17 abr.".to_string();
    let doc = AnalyzedDoc {
        text: text.clone(),
        tokens: vec![
            Token { start: 0, end: 4, pos: Pos::Noun },   // mié
            Token { start: 4, end: 5, pos: Pos::Punct },  // .
            Token { start: 5, end: 6, pos: Pos::Punct },  // ,
            Token { start: 7, end: 9, pos: Pos::Num },    // 17
            Token { start: 10, end: 13, pos: Pos::X },    // abr
        ],
        sentences: vec![(0, text.len())],
    };
    assert_eq!(doc.span_text(1, 2), ".,");
    assert_eq!(doc.span_text(3, 4), "17 abr");
    assert_eq!(doc.token_text(0), "mié");
}

#[test]
fn email_record_serializes_the_contract_fields() {
    let mut record = EmailRecord::from_content("Bonjour");
    record.cleaned_content = Some("Bonjour".into());
    record.lang = Some("fr".into());
    record.detected_datetime = vec!["14 mars 2025".into()];
    record.pseudo_content = Some("Bonjour".into());
    record.sentences = vec!["Bonjour".into()];
    record.sentences_after_email = vec!["Bonjour".into()];

    let json = serde_json::to_value(&record).unwrap();
    for field in [
        "content",
        "cleaned_content",
        "lang",
        "detected_datetime",
        "pseudo_content",
        "ne_list",
        "sentences",
        "sentences_after_email",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}
