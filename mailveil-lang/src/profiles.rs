//! Compiled language profiles shared by the ngram and bayes backends.
//!
//! Each profile carries the language's highest-frequency function words and
//! character trigrams. Coverage is tuned for the European languages the
//! pipeline targets; the profile set is the closed native class set of the
//! ngram backend.

pub struct LangProfile {
    pub code: &'static str,
    pub words: &'static [&'static str],
    pub trigrams: &'static [&'static str],
}

pub static PROFILES: &[LangProfile] = &[
    LangProfile {
        code: "fr",
        words: &[
            "le", "la", "les", "de", "des", "du", "et", "est", "sont", "un", "une", "je", "tu",
            "il", "elle", "nous", "vous", "mon", "ma", "mes", "pour", "avec", "dans", "sur",
            "pas", "ne", "que", "qui", "au", "aux", "ce", "cette", "son", "sa", "ses", "était",
            "sera", "être", "numéro", "ensuite",
        ],
        trigrams: &[
            "ent", "eur", "ion", "les", "des", "que", "ait", "est", "ous", "ais", "eau", "oir",
            "res", "men", "tre", "ant", "our", "une", "lle", "éta", "vou", "nou", "çon", "ére",
        ],
    },
    LangProfile {
        code: "es",
        words: &[
            "el", "la", "los", "las", "de", "del", "y", "es", "son", "un", "una", "yo", "él",
            "ella", "usted", "para", "con", "en", "por", "no", "que", "su", "sus", "este",
            "esta", "fue", "será", "estaba", "como", "más", "pero", "archivo", "adjunto",
        ],
        trigrams: &[
            "ión", "ent", "que", "los", "las", "ado", "nte", "cia", "con", "par", "ara", "ada",
            "aba", "mos", "nos", "una", "ero", "ien", "cio", "tom", "est", "señ",
        ],
    },
    LangProfile {
        code: "de",
        words: &[
            "der", "die", "das", "und", "ist", "sind", "ein", "eine", "ich", "du", "er", "sie",
            "wir", "ihr", "mit", "für", "von", "zu", "auf", "nicht", "dass", "war", "wird",
            "im", "den", "dem", "des", "um", "uhr", "sehr", "auch",
        ],
        trigrams: &[
            "der", "die", "und", "sch", "ein", "ich", "den", "ung", "cht", "gen", "eit", "ber",
            "ter", "hen", "wir", "nde", "ver", "ges",
        ],
    },
    LangProfile {
        code: "pt",
        words: &[
            "o", "a", "os", "as", "de", "do", "da", "e", "é", "são", "um", "uma", "eu", "tu",
            "ele", "ela", "nós", "para", "com", "em", "por", "não", "que", "seu", "sua", "foi",
            "será", "mais", "muito", "também",
        ],
        trigrams: &[
            "ção", "ade", "ent", "que", "não", "par", "ara", "dos", "das", "com", "est", "nho",
            "lho", "endo", "mos", "uma",
        ],
    },
    LangProfile {
        code: "en",
        words: &[
            "the", "of", "and", "to", "a", "in", "is", "are", "was", "were", "it", "he", "she",
            "they", "we", "you", "for", "with", "not", "that", "this", "have", "has", "will",
            "date", "number", "test",
        ],
        trigrams: &[
            "the", "ing", "and", "ion", "ent", "her", "for", "tha", "nth", "int", "ere", "tio",
            "ter", "est", "ers", "ati", "hat", "ith",
        ],
    },
    LangProfile {
        code: "it",
        words: &[
            "il", "lo", "la", "i", "gli", "le", "di", "del", "e", "è", "sono", "un", "una",
            "io", "tu", "lui", "lei", "noi", "per", "con", "in", "su", "non", "che", "suo",
            "sua", "era", "sarà", "più", "anche",
        ],
        trigrams: &[
            "che", "ion", "ent", "lla", "del", "per", "are", "ato", "gli", "ere", "ita", "con",
            "one", "ssi", "zio",
        ],
    },
    LangProfile {
        code: "nl",
        words: &[
            "de", "het", "een", "en", "is", "zijn", "ik", "jij", "hij", "zij", "wij", "met",
            "voor", "van", "op", "niet", "dat", "dit", "was", "wordt", "ook", "maar",
        ],
        trigrams: &[
            "een", "het", "van", "aar", "ijk", "den", "ver", "gen", "oor", "sch", "ter", "lij",
            "ede", "ond",
        ],
    },
    LangProfile {
        code: "gl",
        words: &[
            "o", "a", "os", "as", "de", "do", "da", "e", "é", "son", "un", "unha", "eu", "ti",
            "el", "ela", "nós", "para", "con", "en", "por", "non", "que", "foi", "será",
        ],
        trigrams: &[
            "ció", "est", "unh", "par", "ara", "men", "dos", "das", "con", "ade", "ente",
        ],
    },
    LangProfile {
        code: "da",
        words: &[
            "og", "i", "at", "det", "en", "et", "den", "til", "er", "som", "på", "de", "med",
            "han", "hun", "af", "for", "ikke", "der", "var", "jeg", "men",
        ],
        trigrams: &[
            "der", "det", "end", "ede", "ere", "ger", "ing", "lig", "kke", "til",
        ],
    },
    LangProfile {
        code: "sv",
        words: &[
            "och", "i", "att", "det", "en", "ett", "den", "till", "är", "som", "på", "de",
            "med", "han", "hon", "av", "för", "inte", "var", "jag", "men",
        ],
        trigrams: &[
            "och", "att", "det", "ing", "för", "are", "ern", "ade", "lig", "som", "ill",
        ],
    },
    LangProfile {
        code: "pl",
        words: &[
            "i", "w", "na", "z", "do", "nie", "się", "jest", "są", "to", "że", "ja", "ty",
            "on", "ona", "my", "dla", "po", "ale", "był", "była", "przez",
        ],
        trigrams: &[
            "nie", "ego", "ych", "owa", "ają", "rze", "prz", "szy", "ałe", "ość", "iem",
        ],
    },
    LangProfile {
        code: "ro",
        words: &[
            "și", "în", "la", "de", "cu", "pe", "nu", "este", "sunt", "un", "o", "că", "eu",
            "tu", "el", "ea", "noi", "pentru", "dar", "din", "care", "fost",
        ],
        trigrams: &[
            "are", "ulu", "ate", "ele", "est", "ntr", "pen", "car", "lor", "ori",
        ],
    },
];

/// The closed set of language codes the profile backends can emit.
pub fn native_classes() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.code).collect()
}

/// Lowercased word tokens of a text, punctuation stripped.
pub fn words_of(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Character trigrams of the lowercased alphabetic content.
pub fn trigrams_of(text: &str) -> Vec<String> {
    let chars: Vec<char> = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    chars.windows(3).map(|w| w.iter().collect()).collect()
}
