use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::defaults;
use super::pipeline_spec::PipelineSpec;
use crate::models::ParsingMode;

/// Language detection backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LangBackendKind {
    #[default]
    Ngram,
    Bayes,
    Transformer,
}

impl LangBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ngram => "ngram",
            Self::Bayes => "bayes",
            Self::Transformer => "transformer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ngram" => Some(Self::Ngram),
            "bayes" => Some(Self::Bayes),
            "transformer" => Some(Self::Transformer),
            _ => None,
        }
    }
}

/// The `pseudonymize` section of the workflow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudonymizeConfig {
    /// Non-empty value bypasses language detection.
    pub default_lang: String,
    /// Run the date/time detector before number redaction.
    pub datetime_detection: bool,
    pub time_parsing: ParsingMode,
    pub pseudo_emailaddresses: bool,
    pub pseudo_ne: bool,
    pub pseudo_numbers: bool,
    /// Language tag -> ordered pseudonym list. Registration order matters:
    /// the first registered language is the fallback.
    #[serde(
        serialize_with = "first_names_as_map",
        deserialize_with = "first_names_from_map"
    )]
    pub pseudo_first_names: Vec<(String, Vec<String>)>,
    pub lang_detection_lib: LangBackendKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_pipeline: Option<PipelineSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ner_pipeline: Option<PipelineSpec>,
    /// Override of the per-language default segmenter/POS model.
    pub analyzer_model: String,
    /// Content equal to this sentinel is skipped by the workflow.
    pub unmatched_keyword: String,
}

impl Default for PseudonymizeConfig {
    fn default() -> Self {
        Self {
            default_lang: String::new(),
            datetime_detection: true,
            time_parsing: ParsingMode::Strict,
            pseudo_emailaddresses: true,
            pseudo_ne: true,
            pseudo_numbers: true,
            pseudo_first_names: defaults::default_first_names(),
            lang_detection_lib: LangBackendKind::Ngram,
            lang_pipeline: None,
            ner_pipeline: None,
            analyzer_model: defaults::DEFAULT_ANALYZER_MODEL.to_string(),
            unmatched_keyword: defaults::DEFAULT_UNMATCHED_KEYWORD.to_string(),
        }
    }
}

impl PseudonymizeConfig {
    /// Schema walk over a JSON object. Unknown keys warn and are ignored;
    /// values of the wrong shape warn and fall back to the default.
    pub fn from_value(obj: &serde_json::Map<String, Value>) -> Self {
        let mut cfg = Self::default();
        for (key, value) in obj {
            match key.as_str() {
                "default_lang" => {
                    set_string(key, value, &mut cfg.default_lang);
                }
                "datetime_detection" => set_bool(key, value, &mut cfg.datetime_detection),
                "time_parsing" => match value.as_str() {
                    Some("strict") => cfg.time_parsing = ParsingMode::Strict,
                    Some("non-strict") => cfg.time_parsing = ParsingMode::NonStrict,
                    _ => fallback(key, value),
                },
                "pseudo_emailaddresses" => set_bool(key, value, &mut cfg.pseudo_emailaddresses),
                "pseudo_ne" => set_bool(key, value, &mut cfg.pseudo_ne),
                "pseudo_numbers" => set_bool(key, value, &mut cfg.pseudo_numbers),
                "pseudo_first_names" => match parse_first_names(value) {
                    Some(names) if !names.is_empty() => cfg.pseudo_first_names = names,
                    _ => fallback(key, value),
                },
                "lang_detection_lib" => {
                    match value.as_str().and_then(LangBackendKind::parse) {
                        Some(kind) => cfg.lang_detection_lib = kind,
                        None => fallback(key, value),
                    }
                }
                "lang_pipeline" => cfg.lang_pipeline = parse_pipeline(key, value),
                "ner_pipeline" => cfg.ner_pipeline = parse_pipeline(key, value),
                "analyzer_model" => set_string(key, value, &mut cfg.analyzer_model),
                "unmatched_keyword" => set_string(key, value, &mut cfg.unmatched_keyword),
                other => warn!(key = other, "ignoring unknown settings key"),
            }
        }
        cfg
    }

    /// Whether any pseudonym list is usable.
    pub fn has_pseudonyms(&self) -> bool {
        self.pseudo_first_names
            .iter()
            .any(|(_, names)| !names.is_empty())
    }
}

fn set_string(key: &str, value: &Value, slot: &mut String) {
    match value.as_str() {
        Some(s) => *slot = s.to_string(),
        None => fallback(key, value),
    }
}

fn set_bool(key: &str, value: &Value, slot: &mut bool) {
    match value.as_bool() {
        Some(b) => *slot = b,
        None => fallback(key, value),
    }
}

fn fallback(key: &str, value: &Value) {
    warn!(key, %value, "invalid settings value, keeping default");
}

fn parse_first_names(value: &Value) -> Option<Vec<(String, Vec<String>)>> {
    let obj = value.as_object()?;
    let mut result = Vec::with_capacity(obj.len());
    for (lang, names) in obj {
        let names: Vec<String> = names
            .as_array()?
            .iter()
            .map(|n| n.as_str().map(str::to_string))
            .collect::<Option<_>>()?;
        result.push((lang.clone(), names));
    }
    Some(result)
}

/// The settings document stores the pseudonym lists as a JSON object; the
/// document order of its keys is the registration order.
fn first_names_as_map<S>(
    lists: &[(String, Vec<String>)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(lists.len()))?;
    for (lang, names) in lists {
        map.serialize_entry(lang, names)?;
    }
    map.end()
}

fn first_names_from_map<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::MapAccess;

    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of language tag to name list")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut lists = Vec::new();
            while let Some((lang, names)) = access.next_entry::<String, Vec<String>>()? {
                lists.push((lang, names));
            }
            Ok(lists)
        }
    }
    deserializer.deserialize_map(Visitor)
}

fn parse_pipeline(key: &str, value: &Value) -> Option<PipelineSpec> {
    let spec: PipelineSpec = match serde_json::from_value(value.clone()) {
        Ok(spec) => spec,
        Err(_) => {
            fallback(key, value);
            return None;
        }
    };
    match spec.validate() {
        Ok(()) => Some(spec),
        Err(err) => {
            warn!(key, %err, "rejecting invalid pipeline descriptor");
            None
        }
    }
}
