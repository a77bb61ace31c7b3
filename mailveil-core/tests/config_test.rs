use mailveil_core::config::{LangBackendKind, WorkflowSettings};
use mailveil_core::models::ParsingMode;
use serde_json::json;

#[test]
fn empty_pseudonymize_section_gets_all_defaults() {
    let settings = WorkflowSettings::from_value(&json!({"pseudonymize": {}})).unwrap();
    let cfg = &settings.pseudonymize;

    assert_eq!(cfg.default_lang, "");
    assert!(cfg.datetime_detection);
    assert_eq!(cfg.time_parsing, ParsingMode::Strict);
    assert!(cfg.pseudo_emailaddresses);
    assert!(cfg.pseudo_ne);
    assert!(cfg.pseudo_numbers);
    assert!(!cfg.pseudo_first_names.is_empty());
    assert_eq!(cfg.lang_detection_lib, LangBackendKind::Ngram);
    assert!(cfg.lang_pipeline.is_none());
    assert!(cfg.ner_pipeline.is_none());
    assert_eq!(cfg.analyzer_model, "default");
    assert_eq!(cfg.unmatched_keyword, "unmatched");
}

#[test]
fn recognized_values_override_defaults() {
    let settings = WorkflowSettings::from_value(&json!({
        "pseudonymize": {
            "default_lang": "fr",
            "datetime_detection": false,
            "time_parsing": "non-strict",
            "pseudo_numbers": false,
            "lang_detection_lib": "bayes",
            "analyzer_model": "fr-lex-md",
            "unmatched_keyword": "keep-out"
        }
    }))
    .unwrap();
    let cfg = &settings.pseudonymize;

    assert_eq!(cfg.default_lang, "fr");
    assert!(!cfg.datetime_detection);
    assert_eq!(cfg.time_parsing, ParsingMode::NonStrict);
    assert!(!cfg.pseudo_numbers);
    assert_eq!(cfg.lang_detection_lib, LangBackendKind::Bayes);
    assert_eq!(cfg.analyzer_model, "fr-lex-md");
    assert_eq!(cfg.unmatched_keyword, "keep-out");
}

#[test]
fn unknown_keys_are_ignored() {
    let settings = WorkflowSettings::from_value(&json!({
        "pseudonymize": {"totally_unknown": 42, "default_lang": "es"},
        "another_section": {}
    }))
    .unwrap();
    assert_eq!(settings.pseudonymize.default_lang, "es");
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let settings = WorkflowSettings::from_value(&json!({
        "pseudonymize": {
            "datetime_detection": "yes please",
            "time_parsing": "sloppy",
            "lang_detection_lib": 7
        }
    }))
    .unwrap();
    let cfg = &settings.pseudonymize;
    assert!(cfg.datetime_detection);
    assert_eq!(cfg.time_parsing, ParsingMode::Strict);
    assert_eq!(cfg.lang_detection_lib, LangBackendKind::Ngram);
}

#[test]
fn pseudonym_lists_keep_document_order() {
    let settings = WorkflowSettings::from_value(&json!({
        "pseudonymize": {
            "pseudo_first_names": {
                "pt": ["Alex"],
                "fr": ["Claude", "Dominique"]
            }
        }
    }))
    .unwrap();
    let lists = &settings.pseudonymize.pseudo_first_names;
    assert_eq!(lists[0].0, "pt");
    assert_eq!(lists[1].0, "fr");
    assert_eq!(lists[1].1, ["Claude", "Dominique"]);
}

#[test]
fn empty_pseudonym_lists_are_rejected() {
    let result = WorkflowSettings::from_value(&json!({
        "pseudonymize": {"pseudo_first_names": {}}
    }));
    // invalid shape falls back to the defaults, which are non-empty
    assert!(result.is_ok());

    let result = WorkflowSettings::from_value(&json!({
        "pseudonymize": {"pseudo_first_names": {"fr": []}}
    }));
    assert!(result.is_err());
}

#[test]
fn structurally_invalid_pipelines_are_rejected() {
    let settings = WorkflowSettings::from_value(&json!({
        "pseudonymize": {
            "ner_pipeline": {"task": "time-travel", "model": "m"},
            "lang_pipeline": {"task": "text-classification", "model": "lang.onnx"}
        }
    }))
    .unwrap();
    assert!(settings.pseudonymize.ner_pipeline.is_none());
    let lang = settings.pseudonymize.lang_pipeline.as_ref().unwrap();
    assert_eq!(lang.model, "lang.onnx");
}

#[test]
fn save_timestamped_writes_a_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = WorkflowSettings::from_value(&json!({"pseudonymize": {}})).unwrap();
    let path = settings.save_timestamped(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("settings_"));
    assert!(name.ends_with(".json"));

    let reloaded = WorkflowSettings::from_file(&path).unwrap();
    assert_eq!(reloaded, settings);
}
