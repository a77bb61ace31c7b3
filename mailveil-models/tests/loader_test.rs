use mailveil_core::traits::ITextAnalyzer;
use mailveil_models::loader::default_model_for;
use mailveil_models::{AnalyzerLoader, PipelineLoader};

#[test]
fn default_map_covers_known_languages() {
    assert_eq!(default_model_for("fr"), "fr-lex-md");
    assert_eq!(default_model_for("es"), "es-lex-md");
    assert_eq!(default_model_for("pt"), "pt-lex-md");
}

#[test]
fn galician_redirects_to_portuguese() {
    assert_eq!(default_model_for("gl"), "pt-lex-md");
}

#[test]
fn unknown_language_falls_back_to_german() {
    assert_eq!(default_model_for("xx"), "de-lex-md");
    assert_eq!(default_model_for(""), "de-lex-md");
}

#[test]
fn loader_caches_one_analyzer_per_key() {
    let loader = AnalyzerLoader::new();
    assert!(loader.is_empty());
    let first = loader.get("fr", "default").unwrap();
    let second = loader.get("fr", "default").unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(loader.len(), 1);

    loader.get("es", "default").unwrap();
    assert_eq!(loader.len(), 2);
}

#[test]
fn explicit_model_overrides_the_default_map() {
    let loader = AnalyzerLoader::new();
    let analyzer = loader.get("fr", "de-lex-md").unwrap();
    assert_eq!(analyzer.lang(), "de");
}

#[test]
fn unknown_model_fails_the_load() {
    let loader = AnalyzerLoader::new();
    assert!(loader.get("fr", "not-a-model").is_err());
}

#[test]
fn unknown_pipeline_feature_is_rejected() {
    assert!(PipelineLoader::default_spec("ner").is_ok());
    assert!(PipelineLoader::default_spec("lang_detector").is_ok());
    assert!(PipelineLoader::default_spec("sentiment").is_err());
}

#[test]
fn missing_model_file_fails_pipeline_construction() {
    let loader = PipelineLoader::new();
    // default descriptors point at files that do not exist in the test
    // environment; the load failure must propagate, not panic
    assert!(loader.get_ner(None).is_err());
}
