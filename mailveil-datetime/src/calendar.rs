//! Multilingual calendar parser.
//!
//! Parses the surface of a candidate span into a calendar value. The
//! grammar covers absolute dates in French, Spanish, German, Portuguese
//! and English (month and day names, ordinals, numeric forms), clock times,
//! timezone fragments and the connector words that may sit between a date
//! and a time. A surface containing any other word does not parse; this is
//! what keeps the pattern matcher's false candidates out of the results.
//!
//! Strict parsing demands an explicit day, month and year. Non-strict
//! parsing accepts bare fragments and fills missing fields from the
//! reference date. Ambiguous `a.b.year` numerics prefer month-first and
//! fall back to day-first when the month slot is out of range.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use mailveil_core::models::ParsingMode;

const MONTHS: &[(&str, u32)] = &[
    // French
    ("janvier", 1), ("février", 2), ("mars", 3), ("avril", 4), ("mai", 5), ("juin", 6),
    ("juillet", 7), ("août", 8), ("septembre", 9), ("octobre", 10), ("novembre", 11),
    ("décembre", 12), ("janv", 1), ("févr", 2), ("avr", 4), ("juil", 7),
    // Spanish
    ("enero", 1), ("febrero", 2), ("marzo", 3), ("abril", 4), ("mayo", 5), ("junio", 6),
    ("julio", 7), ("agosto", 8), ("septiembre", 9), ("octubre", 10), ("noviembre", 11),
    ("diciembre", 12), ("ene", 1), ("abr", 4), ("ago", 8), ("dic", 12),
    // German
    ("januar", 1), ("februar", 2), ("märz", 3), ("april", 4), ("juni", 6), ("juli", 7),
    ("august", 8), ("september", 9), ("oktober", 10), ("november", 11), ("dezember", 12),
    ("jan", 1), ("feb", 2), ("mär", 3), ("apr", 4), ("aug", 8), ("okt", 10), ("dez", 12),
    // Portuguese
    ("janeiro", 1), ("fevereiro", 2), ("março", 3), ("maio", 5), ("junho", 6), ("julho", 7),
    ("setembro", 9), ("outubro", 10), ("novembro", 11), ("dezembro", 12), ("fev", 2),
    ("set", 9), ("out", 10),
    // English
    ("january", 1), ("february", 2), ("march", 3), ("may", 5), ("june", 6), ("july", 7),
    ("october", 10), ("december", 12), ("jun", 6), ("jul", 7), ("sep", 9), ("sept", 9),
    ("oct", 10), ("nov", 11), ("dec", 12),
    // Italian
    ("gennaio", 1), ("febbraio", 2), ("marzo", 3), ("aprile", 4), ("maggio", 5),
    ("giugno", 6), ("luglio", 7), ("settembre", 9), ("ottobre", 10), ("dicembre", 12),
    // Dutch
    ("januari", 1), ("februari", 2), ("maart", 3), ("mei", 5), ("augustus", 8),
];

const DAYS: &[(&str, Weekday)] = &[
    // French
    ("lundi", Weekday::Mon), ("mardi", Weekday::Tue), ("mercredi", Weekday::Wed),
    ("jeudi", Weekday::Thu), ("vendredi", Weekday::Fri), ("samedi", Weekday::Sat),
    ("dimanche", Weekday::Sun), ("lun", Weekday::Mon), ("mar", Weekday::Tue),
    ("mer", Weekday::Wed), ("jeu", Weekday::Thu), ("ven", Weekday::Fri),
    ("sam", Weekday::Sat), ("dim", Weekday::Sun),
    // Spanish
    ("lunes", Weekday::Mon), ("martes", Weekday::Tue), ("miércoles", Weekday::Wed),
    ("jueves", Weekday::Thu), ("viernes", Weekday::Fri), ("sábado", Weekday::Sat),
    ("domingo", Weekday::Sun), ("mié", Weekday::Wed), ("jue", Weekday::Thu),
    ("vie", Weekday::Fri), ("sáb", Weekday::Sat), ("dom", Weekday::Sun),
    // German
    ("montag", Weekday::Mon), ("dienstag", Weekday::Tue), ("mittwoch", Weekday::Wed),
    ("donnerstag", Weekday::Thu), ("freitag", Weekday::Fri), ("samstag", Weekday::Sat),
    ("sonntag", Weekday::Sun),
    // Portuguese
    ("segunda", Weekday::Mon), ("terça", Weekday::Tue), ("quarta", Weekday::Wed),
    ("quinta", Weekday::Thu), ("sexta", Weekday::Fri),
    // English
    ("monday", Weekday::Mon), ("tuesday", Weekday::Tue), ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu), ("friday", Weekday::Fri), ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun), ("mon", Weekday::Mon), ("tue", Weekday::Tue),
    ("wed", Weekday::Wed), ("thu", Weekday::Thu), ("fri", Weekday::Fri),
    ("sat", Weekday::Sat), ("sun", Weekday::Sun),
    // Italian
    ("lunedì", Weekday::Mon), ("martedì", Weekday::Tue), ("mercoledì", Weekday::Wed),
    ("giovedì", Weekday::Thu), ("venerdì", Weekday::Fri), ("sabato", Weekday::Sat),
    ("domenica", Weekday::Sun),
    // Dutch
    ("maandag", Weekday::Mon), ("dinsdag", Weekday::Tue), ("woensdag", Weekday::Wed),
    ("donderdag", Weekday::Thu), ("vrijdag", Weekday::Fri), ("zaterdag", Weekday::Sat),
    ("zondag", Weekday::Sun),
];

/// Words that may connect a date and a time without breaking the parse.
const CONNECTORS: &[&str] = &[
    "a", "las", "at", "um", "à", "el", "le", "de", "del", "am", "on", "the", "y", "e", "und",
];

/// Connectors announcing that the next bare number is an hour.
const TIME_CUES: &[&str] = &["a", "las", "at", "um", "à"];

#[derive(Default)]
struct Parts {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
    time: Option<(u32, u32, u32)>,
    has_tz: bool,
    dayname: Option<Weekday>,
    expect_time: bool,
}

impl Parts {
    fn any_evidence(&self) -> bool {
        self.day.is_some()
            || self.month.is_some()
            || self.year.is_some()
            || self.time.is_some()
            || self.has_tz
            || self.dayname.is_some()
    }

    fn set_date(&mut self, year: i32, month: u32, day: u32) -> bool {
        if self.day.is_some() || self.month.is_some() || self.year.is_some() {
            return false;
        }
        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day);
        true
    }
}

/// Parse against the current date.
pub fn parse(surface: &str, mode: ParsingMode) -> Option<NaiveDateTime> {
    parse_with_reference(surface, mode, Utc::now().date_naive())
}

/// Parse against an explicit reference date (missing fields in non-strict
/// mode are filled from it).
pub fn parse_with_reference(
    surface: &str,
    mode: ParsingMode,
    today: NaiveDate,
) -> Option<NaiveDateTime> {
    let mut parts = Parts::default();

    for raw in surface.split_whitespace() {
        let token = raw.trim_matches(|c: char| {
            matches!(c, ',' | '.' | ';' | '(' | ')' | '"' | '«' | '»')
        });
        // connector punctuation between merged spans
        if token.is_empty() || token == "-" {
            continue;
        }
        if !consume(token, &mut parts) {
            return None;
        }
    }

    if !parts.any_evidence() {
        return None;
    }
    if mode == ParsingMode::Strict
        && (parts.day.is_none() || parts.month.is_none() || parts.year.is_none())
    {
        return None;
    }

    let date = resolve_date(&parts, today)?;
    let (h, m, s) = parts.time.unwrap_or((0, 0, 0));
    let time = NaiveTime::from_hms_opt(h, m, s)?;
    Some(NaiveDateTime::new(date, time))
}

fn consume(token: &str, parts: &mut Parts) -> bool {
    let lower = token.to_lowercase();

    if let Some(result) = try_numeric_date(token, parts) {
        return result;
    }
    if let Some(result) = try_time(token, parts) {
        return result;
    }
    if is_timezone(token) {
        parts.has_tz = true;
        return true;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return consume_bare_number(token, parts);
    }
    if let Some(day) = ordinal_day(&lower) {
        if parts.day.is_some() {
            return false;
        }
        parts.day = Some(day);
        return true;
    }
    if let Some(&(_, month)) = MONTHS.iter().find(|(name, _)| *name == lower) {
        if parts.month.is_some() {
            return false;
        }
        parts.month = Some(month);
        return true;
    }
    if let Some(&(_, weekday)) = DAYS.iter().find(|(name, _)| *name == lower) {
        parts.dayname = Some(weekday);
        return true;
    }
    if CONNECTORS.contains(&lower.as_str()) {
        if TIME_CUES.contains(&lower.as_str()) {
            parts.expect_time = true;
        }
        return true;
    }
    false
}

/// `d{1,4} sep d{1,2} sep d{1,4}` with a consistent `.`/`/`/`-` separator.
/// Returns `None` when the token is not shaped like a numeric date at all.
fn try_numeric_date(token: &str, parts: &mut Parts) -> Option<bool> {
    let sep = ['.', '/', '-']
        .into_iter()
        .find(|&s| token.contains(s))?;
    let fields: Vec<&str> = token.split(sep).collect();
    if fields.len() != 3
        || fields
            .iter()
            .any(|f| f.is_empty() || f.len() > 4 || !f.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    let a: u32 = fields[0].parse().ok()?;
    let b: u32 = fields[1].parse().ok()?;
    let c: u32 = fields[2].parse().ok()?;

    let candidates: [(i32, u32, u32); 2] = if fields[0].len() == 4 {
        // year first
        [(a as i32, b, c), (a as i32, c, b)]
    } else if fields[2].len() == 4 {
        // year last: month-first preference, day-first fallback
        [(c as i32, a, b), (c as i32, b, a)]
    } else if fields[2].len() == 2 {
        let year = 2000 + c as i32;
        [(year, a, b), (year, b, a)]
    } else {
        return Some(false);
    };

    for (year, month, day) in candidates {
        if NaiveDate::from_ymd_opt(year, month, day).is_some() {
            return Some(parts.set_date(year, month, day));
        }
    }
    Some(false)
}

/// `h:mm` or `h:mm:ss`. An out-of-range component fails the whole parse.
fn try_time(token: &str, parts: &mut Parts) -> Option<bool> {
    if !token.contains(':') {
        return None;
    }
    let fields: Vec<&str> = token.split(':').collect();
    if fields.len() < 2
        || fields.len() > 3
        || fields
            .iter()
            .any(|f| f.is_empty() || f.len() > 2 || !f.chars().all(|c| c.is_ascii_digit()))
    {
        return Some(false);
    }
    let h: u32 = fields[0].parse().ok()?;
    let m: u32 = fields[1].parse().ok()?;
    let s: u32 = fields.get(2).map_or(Some(0), |f| f.parse().ok())?;
    if h > 23 || m > 59 || s > 59 || parts.time.is_some() {
        return Some(false);
    }
    parts.time = Some((h, m, s));
    Some(true)
}

fn is_timezone(token: &str) -> bool {
    let rest = token.strip_prefix(['+', '-']);
    matches!(rest, Some(r) if r.len() == 4 && r.chars().all(|c| c.is_ascii_digit()))
}

fn consume_bare_number(token: &str, parts: &mut Parts) -> bool {
    let Ok(value) = token.parse::<u32>() else {
        return false;
    };
    if parts.expect_time && parts.time.is_none() && value <= 23 {
        parts.time = Some((value, 0, 0));
        return true;
    }
    if token.len() == 4 && (1000..=2999).contains(&value) {
        if parts.year.is_some() {
            return false;
        }
        parts.year = Some(value as i32);
        return true;
    }
    if parts.day.is_none() && (1..=31).contains(&value) {
        parts.day = Some(value);
        return true;
    }
    if parts.month.is_none() && (1..=12).contains(&value) {
        parts.month = Some(value);
        return true;
    }
    false
}

/// `17th`, `1st`, `2nd`, `3rd`.
fn ordinal_day(lower: &str) -> Option<u32> {
    let digits = lower
        .strip_suffix("st")
        .or_else(|| lower.strip_suffix("nd"))
        .or_else(|| lower.strip_suffix("rd"))
        .or_else(|| lower.strip_suffix("th"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

fn resolve_date(parts: &Parts, today: NaiveDate) -> Option<NaiveDate> {
    // weekday-only fragments resolve to the upcoming such weekday
    if parts.day.is_none() && parts.month.is_none() && parts.year.is_none() {
        if let Some(weekday) = parts.dayname {
            let ahead = (weekday.num_days_from_monday() as i64
                - today.weekday().num_days_from_monday() as i64)
                .rem_euclid(7);
            return today.checked_add_signed(Duration::days(ahead));
        }
        return Some(today);
    }

    let year = parts.year.unwrap_or_else(|| today.year());
    let month = parts.month.unwrap_or_else(|| today.month());
    let day = parts.day.unwrap_or_else(|| today.day());
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn parse_ns(s: &str) -> Option<NaiveDateTime> {
        parse_with_reference(s, ParsingMode::NonStrict, reference())
    }

    fn parse_strict(s: &str) -> Option<NaiveDateTime> {
        parse_with_reference(s, ParsingMode::Strict, reference())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn absolute_dates_parse_in_both_modes() {
        for (s, expected) in [
            ("2025-03-10", date(2025, 3, 10)),
            ("15.03.2025", date(2025, 3, 15)),
            ("10 mars 2025", date(2025, 3, 10)),
            ("May 10, 2025", date(2025, 5, 10)),
            ("09 février 2009", date(2009, 2, 9)),
            ("17. April 2024", date(2024, 4, 17)),
            ("17 abr. 2024", date(2024, 4, 17)),
        ] {
            assert_eq!(parse_ns(s).unwrap().date(), expected, "{s}");
            assert_eq!(parse_strict(s).unwrap().date(), expected, "{s}");
        }
    }

    #[test]
    fn month_first_preference_on_ambiguous_numerics() {
        assert_eq!(parse_ns("10.03.2025").unwrap().date(), date(2025, 10, 3));
        assert_eq!(parse_ns("15.03.2025").unwrap().date(), date(2025, 3, 15));
        assert_eq!(parse_ns("2025-15-10").unwrap().date(), date(2025, 10, 15));
    }

    #[test]
    fn invalid_dates_do_not_parse() {
        assert!(parse_ns("2025-13-15").is_none());
        assert!(parse_ns("2025-23-17 25:15:20").is_none());
        assert!(parse_strict("2025-13-15").is_none());
    }

    #[test]
    fn incomplete_fragments_parse_only_non_strict() {
        for s in ["18", "2025", "10:30", "Mittwoch", "+0200"] {
            assert!(parse_ns(s).is_some(), "{s}");
            assert!(parse_strict(s).is_none(), "{s}");
        }
    }

    #[test]
    fn date_with_time_and_connectors() {
        let parsed = parse_ns("28.03.2025 a las 10:30").unwrap();
        assert_eq!(parsed.date(), date(2025, 3, 28));
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(10, 30, 0).unwrap());

        let parsed = parse_strict("17/04/2024 um 17:23").unwrap();
        assert_eq!(parsed.date(), date(2024, 4, 17));

        let parsed = parse_strict("mié., 17 abr. 2024 17:20:18 +0200").unwrap();
        assert_eq!(parsed.date(), date(2024, 4, 17));
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(17, 20, 18).unwrap());

        let parsed = parse_strict("Wednesday, April 17th 2024 at 17:23").unwrap();
        assert_eq!(parsed.date(), date(2024, 4, 17));
    }

    #[test]
    fn bare_number_after_time_cue_reads_as_hour() {
        let parsed = parse_ns("24 a las 3").unwrap();
        assert_eq!(parsed.date().day(), 24);
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(3, 0, 0).unwrap());
    }

    #[test]
    fn unrelated_words_fail_the_parse() {
        assert!(parse_ns("réunion demain").is_none());
        assert!(parse_ns("2025 budget").is_none());
        assert!(parse_ns("meeting at noon").is_none());
    }

    #[test]
    fn two_digit_year_slash_form() {
        assert_eq!(parse_ns("6/12/25").unwrap().date(), date(2025, 6, 12));
    }
}
