use mailveil_core::models::ParsingMode;
use mailveil_core::traits::ITextAnalyzer;
use mailveil_datetime::pattern::{self, TokenConstraint};
use mailveil_datetime::TimeDetector;
use mailveil_core::models::Pos;
use mailveil_models::LexAnalyzer;

fn detect(text: &str, mode: ParsingMode) -> Vec<String> {
    let analyzer = LexAnalyzer::load("fr-lex-md").unwrap();
    let detector = TimeDetector::new(mode);
    let doc = analyzer.analyze(text).unwrap();
    detector
        .get_date_time(&doc)
        .into_iter()
        .map(|span| span.surface)
        .collect()
}

/// The carrier sentence the date samples are embedded in.
fn embedded(date: &str) -> String {
    format!("Alice sera présente le {date} et apportera 100$.")
}

#[test]
fn single_token_numeric_dates() {
    for sample in [
        "02/17/2009",
        "17/02/2009",
        "2009/02/17",
        "2/17/2009",
        "17/2/2009",
        "2009/2/17",
        "6/12/25",
    ] {
        let found = detect(&embedded(sample), ParsingMode::NonStrict);
        assert_eq!(found, vec![sample.to_string()], "{sample}");
        // bare dates carry no time component: nothing in strict mode
        assert!(detect(&embedded(sample), ParsingMode::Strict).is_empty(), "{sample}");
    }
}

#[test]
fn multi_token_dates() {
    for sample in [
        "12 mars 2025",
        "09 février 2009",
        "2025-03-12",
        "2025-03-01",
        "2025-11-20",
        "2 avril 2015",
    ] {
        let found = detect(&embedded(sample), ParsingMode::NonStrict);
        assert_eq!(found, vec![sample.to_string()], "{sample}");
    }
}

#[test]
fn determiner_prefixes_stay_outside_the_span() {
    let found = detect(&embedded("le 14 mars 2025"), ParsingMode::NonStrict);
    assert_eq!(found, vec!["14 mars 2025".to_string()]);

    let found = detect(&embedded("ce vendredi 14 mars 2025"), ParsingMode::NonStrict);
    assert_eq!(found, vec!["vendredi 14 mars 2025".to_string()]);
}

#[test]
fn date_time_combinations_merge_across_connectors() {
    for (sample, expected) in [
        ("ven. 14 mars 2025, 10:30", "ven. 14 mars 2025, 10:30"),
        ("vendredi 14 mars 2025 à 10:30", "vendredi 14 mars 2025 à 10:30"),
        ("14/03/2025 10:30", "14/03/2025 10:30"),
        ("14/03/2025 à 10:30", "14/03/2025 à 10:30"),
        ("2025-03-14 10:30", "2025-03-14 10:30"),
        ("17/04/2024 um 17:23 Uhr", "17/04/2024 um 17:23"),
        ("17.04.2024 17:33:23", "17.04.2024 17:33:23"),
        ("el 24 a las 3", "24 a las 3"),
        (
            "Mittwoch, 17. April 2024 um 17:23 Uhr",
            "Mittwoch, 17. April 2024 um 17:23",
        ),
        (
            "mié., 17 abr. 2024 17:20:18 +0200",
            "mié., 17 abr. 2024 17:20:18 +0200",
        ),
        (
            "Wednesday, April 17th 2024 at 17:23",
            "Wednesday, April 17th 2024 at 17:23",
        ),
        (
            "am Mittwoch, 17. April 2024 um 16:58:57",
            "Mittwoch, 17. April 2024 um 16:58:57",
        ),
    ] {
        let found = detect(&embedded(sample), ParsingMode::NonStrict);
        assert_eq!(found, vec![expected.to_string()], "{sample}");
    }
}

#[test]
fn strict_mode_requires_a_time_component() {
    for (sample, expected) in [
        ("ven. 14 mars 2025, 10:30", vec!["14 mars 2025, 10:30"]),
        ("vendredi 14 mars 2025 à 10:30", vec!["14 mars 2025 à 10:30"]),
        ("14/03/2025 10:30", vec!["14/03/2025 10:30"]),
        ("14/03/2025 à 10:30", vec!["14/03/2025 à 10:30"]),
        ("2025-03-14 10:30", vec!["2025-03-14 10:30"]),
        ("17/04/2024 um 17:23 Uhr", vec!["17/04/2024 um 17:23"]),
        ("17.04.2024 17:33:23", vec!["17.04.2024 17:33:23"]),
        ("12 mars 2025", vec![]),
        ("le 14 mars 2025", vec![]),
        ("el 24 a las 3", vec![]),
        (
            "Mittwoch, 17. April 2024 um 17:23 Uhr",
            vec!["17. April 2024 um 17:23"],
        ),
        (
            "Wednesday, April 17th 2024 at 17:23",
            vec!["April 17th 2024 at 17:23"],
        ),
    ] {
        let found = detect(&embedded(sample), ParsingMode::Strict);
        let expected: Vec<String> = expected.into_iter().map(str::to_string).collect();
        assert_eq!(found, expected, "{sample}");
    }
}

#[test]
fn standalone_times_survive_only_non_strict() {
    let text = "Le rendez-vous est à 10:30 précises.";
    assert_eq!(detect(text, ParsingMode::NonStrict), vec!["10:30".to_string()]);
    assert!(detect(text, ParsingMode::Strict).is_empty());
}

#[test]
fn spans_without_digits_are_filtered() {
    // bare month and day names parse, but never surface as date spans
    let text = "Nous verrons mardi ou mercredi en avril.";
    assert!(detect(text, ParsingMode::NonStrict).is_empty());
}

#[test]
fn phone_numbers_are_not_dates() {
    let text = "Mon numéro de téléphone est 123-456-7890.";
    assert!(detect(text, ParsingMode::NonStrict).is_empty());
    assert!(detect(text, ParsingMode::Strict).is_empty());
}

#[test]
fn spans_are_ordered_and_non_overlapping() {
    let text = "Réunion le 12 mars 2025. Rappel le 2 avril 2015 et enfin 17.04.2024 17:33:23.";
    let analyzer = LexAnalyzer::load("fr-lex-md").unwrap();
    let detector = TimeDetector::new(ParsingMode::NonStrict);
    let doc = analyzer.analyze(text).unwrap();
    let spans = detector.get_date_time(&doc);
    assert_eq!(spans.len(), 3);
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    for span in &spans {
        assert_eq!(&text[span.start..span.end], span.surface);
    }
}

#[test]
fn add_pattern_validates_and_rejects_duplicates() {
    let mut detector = TimeDetector::new(ParsingMode::NonStrict);
    let pattern = vec![TokenConstraint::pos(Pos::Num), TokenConstraint::pos(Pos::Num)];
    detector
        .add_pattern(pattern.clone(), ParsingMode::NonStrict)
        .unwrap();
    assert!(detector
        .add_pattern(pattern.clone(), ParsingMode::NonStrict)
        .is_err());
    assert!(detector.add_pattern(Vec::new(), ParsingMode::NonStrict).is_err());

    detector.remove_pattern(&pattern, ParsingMode::NonStrict).unwrap();
    assert!(detector.remove_pattern(&pattern, ParsingMode::NonStrict).is_err());
}

#[test]
fn default_pattern_counts_match() {
    let detector = TimeDetector::new(ParsingMode::Strict);
    let non_strict = detector.patterns(ParsingMode::NonStrict).len();
    let strict = detector.patterns(ParsingMode::Strict).len();
    assert_eq!(non_strict, pattern::non_strict_patterns().len());
    assert_eq!(strict, non_strict + 1);
}
