//! Per-language lexicons driving the POS tagger and the segmenter's
//! abbreviation handling.
//!
//! Coverage is deliberately shallow: month/day vocabulary, function words
//! and a handful of frequent verb forms are enough to tag the token shapes
//! the date detector and the engine care about. Everything else falls back
//! to the Noun/Propn defaults.

use mailveil_core::models::Pos;

pub struct Lexicon {
    pub lang: &'static str,
    pub months: &'static [&'static str],
    pub month_abbrevs: &'static [&'static str],
    pub days: &'static [&'static str],
    pub day_abbrevs: &'static [&'static str],
    determiners: &'static [&'static str],
    adpositions: &'static [&'static str],
    pronouns: &'static [&'static str],
    verbs: &'static [&'static str],
    adverbs: &'static [&'static str],
    conjunctions: &'static [&'static str],
}

impl Lexicon {
    /// Tag a lowercased word of this lexicon's own language.
    pub fn tag_own(&self, lower: &str) -> Option<Pos> {
        if self.months.contains(&lower)
            || self.month_abbrevs.contains(&lower)
            || self.days.contains(&lower)
            || self.day_abbrevs.contains(&lower)
        {
            return Some(Pos::Noun);
        }
        if self.determiners.contains(&lower) {
            return Some(Pos::Det);
        }
        if self.adpositions.contains(&lower) {
            return Some(Pos::Adp);
        }
        if self.pronouns.contains(&lower) {
            return Some(Pos::Pron);
        }
        if self.verbs.contains(&lower) {
            return Some(Pos::Verb);
        }
        if self.adverbs.contains(&lower) {
            return Some(Pos::Adv);
        }
        if self.conjunctions.contains(&lower) {
            return Some(Pos::Other);
        }
        None
    }

    /// Whether the lowercased word belongs to any list of this lexicon.
    pub fn knows(&self, lower: &str) -> bool {
        self.tag_own(lower).is_some()
    }
}

pub static FRENCH: Lexicon = Lexicon {
    lang: "fr",
    months: &[
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    month_abbrevs: &[
        "janv", "févr", "avr", "juil", "sept", "oct", "nov", "déc",
    ],
    days: &[
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    day_abbrevs: &["lun", "mar", "mer", "jeu", "ven", "sam", "dim"],
    determiners: &[
        "le", "la", "les", "un", "une", "des", "ce", "cette", "ces", "mon", "ma", "mes", "notre",
        "nos", "votre", "vos",
    ],
    adpositions: &[
        "à", "de", "du", "au", "aux", "en", "dans", "par", "pour", "sur", "avec", "sans", "chez",
    ],
    pronouns: &[
        "je", "tu", "il", "elle", "nous", "vous", "ils", "elles", "on", "se", "y",
    ],
    verbs: &[
        "est", "sont", "sera", "serait", "était", "ont", "été", "être", "viendra", "rendrons",
    ],
    adverbs: &["ne", "pas", "plus", "très", "ensuite", "aussi"],
    conjunctions: &["et", "ou", "mais", "donc", "ni", "car", "que", "qui"],
};

pub static SPANISH: Lexicon = Lexicon {
    lang: "es",
    months: &[
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    month_abbrevs: &[
        "ene", "feb", "abr", "may", "jun", "jul", "ago", "sep", "sept", "oct", "nov", "dic",
    ],
    days: &[
        "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
    ],
    day_abbrevs: &["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    determiners: &[
        "el", "la", "los", "las", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
        "mi", "mis", "su", "sus",
    ],
    adpositions: &["a", "de", "del", "en", "por", "para", "con", "sin", "sobre"],
    pronouns: &[
        "yo", "tú", "él", "ella", "nosotros", "usted", "ustedes", "se", "lo",
    ],
    verbs: &[
        "es", "son", "está", "están", "fue", "era", "ha", "han", "sido", "ser", "tomada",
    ],
    adverbs: &["no", "más", "muy", "también", "luego"],
    conjunctions: &["y", "o", "pero", "sino"],
};

pub static GERMAN: Lexicon = Lexicon {
    lang: "de",
    months: &[
        "januar", "februar", "märz", "april", "mai", "juni", "juli", "august", "september",
        "oktober", "november", "dezember",
    ],
    month_abbrevs: &["jan", "feb", "mär", "apr", "aug", "okt", "dez"],
    days: &[
        "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag", "sonntag",
    ],
    day_abbrevs: &["mo", "di", "mi", "do", "sa", "so"],
    determiners: &[
        "der", "die", "das", "ein", "eine", "einen", "dem", "den", "des", "sein", "seine", "mein",
        "meine",
    ],
    adpositions: &[
        "an", "auf", "aus", "bei", "für", "in", "mit", "nach", "um", "von", "vor", "zu", "über",
    ],
    pronouns: &["ich", "du", "er", "sie", "es", "wir", "ihr", "sich"],
    verbs: &[
        "ist", "sind", "war", "waren", "hat", "haben", "wird", "werden",
    ],
    adverbs: &["nicht", "sehr", "auch", "dann"],
    conjunctions: &["und", "oder", "aber", "dass"],
};

pub static PORTUGUESE: Lexicon = Lexicon {
    lang: "pt",
    months: &[
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
        "outubro", "novembro", "dezembro",
    ],
    month_abbrevs: &["fev", "mar", "abr", "mai", "ago", "set", "out", "dez"],
    days: &[
        "segunda", "terça", "quarta", "quinta", "sexta", "sábado", "domingo",
    ],
    day_abbrevs: &["seg", "ter", "qua", "qui", "sex", "sáb", "dom"],
    determiners: &["o", "a", "os", "as", "um", "uma", "uns", "umas", "este", "esta"],
    adpositions: &["de", "do", "da", "em", "por", "para", "com", "sem"],
    pronouns: &["eu", "tu", "ele", "ela", "nós", "se"],
    verbs: &["é", "são", "foi", "era", "tem", "têm", "ser", "está"],
    adverbs: &["não", "mais", "muito", "também"],
    conjunctions: &["e", "ou", "mas", "que"],
};

pub static ENGLISH: Lexicon = Lexicon {
    lang: "en",
    months: &[
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ],
    month_abbrevs: &[
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ],
    days: &[
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    ],
    day_abbrevs: &[
        "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
    ],
    determiners: &[
        "the", "a", "an", "this", "that", "these", "those", "my", "your", "our",
    ],
    adpositions: &[
        "at", "in", "on", "of", "to", "from", "with", "by", "for", "about",
    ],
    pronouns: &["i", "you", "he", "she", "it", "we", "they", "me", "him", "her"],
    verbs: &[
        "is", "are", "was", "were", "be", "been", "has", "have", "had", "will", "would", "can",
    ],
    adverbs: &["not", "very", "also", "then"],
    conjunctions: &["and", "or", "but"],
};

/// All compiled lexicons.
pub static ALL: &[&Lexicon] = &[&FRENCH, &SPANISH, &GERMAN, &PORTUGUESE, &ENGLISH];

/// The lexicon for a language tag, if one is compiled in.
pub fn lexicon_for(lang: &str) -> Option<&'static Lexicon> {
    ALL.iter().copied().find(|lex| lex.lang == lang)
}

/// Whether `lower` is a month or day name (full or abbreviated) in any
/// compiled lexicon, and for abbreviations specifically — used by the
/// segmenter to suppress sentence breaks after abbreviation periods.
pub fn is_abbreviation(lower: &str) -> bool {
    ALL.iter().any(|lex| {
        lex.month_abbrevs.contains(&lower) || lex.day_abbrevs.contains(&lower)
    })
}

/// Whether any compiled lexicon other than `own` knows the word.
pub fn known_elsewhere(lower: &str, own: &Lexicon) -> bool {
    ALL.iter()
        .any(|lex| lex.lang != own.lang && lex.knows(lower))
}
