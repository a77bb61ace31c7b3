//! Default values for the workflow settings.

/// Sentinel content marker skipped by the workflow.
pub const DEFAULT_UNMATCHED_KEYWORD: &str = "unmatched";

/// Analyzer model sentinel resolved via the per-language default map.
pub const DEFAULT_ANALYZER_MODEL: &str = "default";

/// Pseudonym lists used when the settings file provides none explicitly.
/// Order is significant: names are assigned in list order.
pub fn default_first_names() -> Vec<(String, Vec<String>)> {
    [
        ("fr", vec!["Claude", "Dominique", "Camille", "Maxime", "Alix"]),
        ("es", vec!["José", "Angel", "Alex", "Ariel", "Cruz"]),
        ("de", vec!["Alex", "Chris", "Kim", "Luca", "Sascha"]),
        ("pt", vec!["Alex", "Ariel", "Cris", "Dani", "Juca"]),
    ]
    .into_iter()
    .map(|(lang, names)| {
        (
            lang.to_string(),
            names.into_iter().map(str::to_string).collect(),
        )
    })
    .collect()
}
