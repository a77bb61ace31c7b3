use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailveil_core::models::ParsingMode;
use mailveil_core::traits::ITextAnalyzer;
use mailveil_datetime::TimeDetector;
use mailveil_models::LexAnalyzer;

fn bench_detection(c: &mut Criterion) {
    let analyzer = LexAnalyzer::load("fr-lex-md").unwrap();
    let detector = TimeDetector::new(ParsingMode::NonStrict);
    let text = "Alice sera présente le vendredi 14 mars 2025 à 10:30 et apportera \
                les documents. La réunion suivante aura lieu le 2 avril 2025. \
                Mon numéro est le 123-456-7890.";
    let doc = analyzer.analyze(text).unwrap();

    c.bench_function("detect_non_strict", |b| {
        b.iter(|| detector.get_date_time(black_box(&doc)))
    });

    let strict = TimeDetector::new(ParsingMode::Strict);
    c.bench_function("detect_strict", |b| {
        b.iter(|| strict.get_date_time(black_box(&doc)))
    });
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
