use chrono::{Datelike, NaiveDate};

use crate::layout::SeasonFormat;

// ============================================================================
// MONTH TABLE
// ============================================================================

/// (english, dutch, full english) month names, January first.
const MONTHS: [(&str, &str, &str); 12] = [
    ("jan", "jan", "january"),
    ("feb", "feb", "february"),
    ("mar", "mrt", "march"),
    ("apr", "apr", "april"),
    ("may", "mei", "may"),
    ("jun", "jun", "june"),
    ("jul", "jul", "july"),
    ("aug", "aug", "august"),
    ("sep", "sep", "september"),
    ("oct", "okt", "october"),
    ("nov", "nov", "november"),
    ("dec", "dec", "december"),
];

/// Dutch name for an English abbreviation. Anything else is returned lowercased
/// but otherwise unchanged.
pub fn localize_month(abbrev: &str) -> String {
    let lower = abbrev.to_lowercase();
    MONTHS
        .iter()
        .find(|(en, _, _)| *en == lower)
        .map(|(_, nl, _)| nl.to_string())
        .unwrap_or(lower)
}

/// Month number (1-12) for an English or Dutch abbreviation. Longer English
/// spellings such as "sept" or "october" are accepted too.
pub fn month_number(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_lowercase();
    MONTHS
        .iter()
        .position(|(en, nl, full)| {
            *en == lower || *nl == lower || (lower.len() >= 3 && full.starts_with(lower.as_str()))
        })
        .map(|idx| idx as u32 + 1)
}

fn dutch_month(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).map(|(_, nl, _)| *nl)
}

// ============================================================================
// PARSING
// ============================================================================

/// Parses "15 oct 2025" style dates.
pub fn parse_named_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month = month_number(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses "05-03-2026" style dates (day-month-year).
pub fn parse_numeric_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-').map(str::trim);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Display form of a "15 oct 2025" style date: the day token as written and
/// the localized month token, e.g. "05 okt" or "15 sept".
pub fn named_display_date(raw: &str) -> Option<String> {
    let mut parts = raw.split_whitespace();
    let day = parts.next()?;
    let month = parts.next()?;
    Some(format!("{} {}", day, localize_month(month)))
}

/// "<day> <dutch month>", e.g. "5 mrt".
pub fn display_date(date: NaiveDate) -> String {
    let month = dutch_month(date.month()).unwrap_or_default();
    format!("{} {}", date.day(), month)
}

/// Year the season containing `date` started in. Seasons start in August.
pub fn season_start(date: NaiveDate) -> i32 {
    if date.month() >= 8 {
        date.year()
    } else {
        date.year() - 1
    }
}

pub fn season_label(date: NaiveDate, format: SeasonFormat) -> String {
    let start = season_start(date);
    let end = (start + 1).rem_euclid(100);
    match format {
        SeasonFormat::Long => format!("{}-{:02}", start, end),
        SeasonFormat::Short => format!("'{:02}-{:02}", start.rem_euclid(100), end),
    }
}

// ============================================================================
// TESTS
// ============================================================================
