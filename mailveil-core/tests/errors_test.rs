use mailveil_core::errors::*;

#[test]
fn backend_unavailable_carries_name_and_reason() {
    let err = LangError::BackendUnavailable {
        name: "transformer".into(),
        reason: "model file not found".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("transformer"));
    assert!(msg.contains("model file not found"));
}

#[test]
fn empty_constraint_carries_requested_set() {
    let err = LangError::EmptyConstraint {
        requested: vec!["xx".into(), "zz".into()],
    };
    assert!(err.to_string().contains("xx"));
}

#[test]
fn model_load_failure_carries_model() {
    let err = ModelError::LoadFailed {
        model: "fr-lex-md".into(),
        reason: "missing".into(),
    };
    assert!(err.to_string().contains("fr-lex-md"));
}

#[test]
fn invalid_pattern_is_a_configuration_error() {
    let err = DateTimeError::InvalidPattern {
        reason: "empty POS set".into(),
    };
    assert!(err.to_string().contains("empty POS set"));
}

#[test]
fn insufficient_pseudonyms_instructs_configuration_change() {
    let err = EngineError::InsufficientPseudonyms { lang: "fr".into() };
    let msg = err.to_string();
    assert!(msg.contains("fr"));
    assert!(msg.contains("configure"));
}

// --- From impls ---

#[test]
fn subsystem_errors_convert_to_mailveil_error() {
    let err: MailveilError = LangError::UnknownBackend {
        name: "bogus".into(),
    }
    .into();
    assert!(matches!(err, MailveilError::Lang(_)));

    let err: MailveilError = ModelError::InferenceFailed {
        reason: "oom".into(),
    }
    .into();
    assert!(matches!(err, MailveilError::Model(_)));

    let err: MailveilError = DateTimeError::DuplicatePattern {
        mode: "strict".into(),
    }
    .into();
    assert!(matches!(err, MailveilError::DateTime(_)));

    let err: MailveilError = EngineError::NoPseudonymLists.into();
    assert!(matches!(err, MailveilError::Engine(_)));

    let err: MailveilError = ConfigError::MissingPseudonymLists.into();
    assert!(matches!(err, MailveilError::Config(_)));
}
