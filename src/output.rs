use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::record::{FormEntry, MatchRecord, Sponsor};
use crate::utils::format_goalscorers;

pub const CSV_OUTPUT_FILE: &str = "matches.csv";
pub const JSON_OUTPUT_FILE: &str = "matches.json";

// ============================================================================
// OUTPUT OPTIONS
// ============================================================================

/// Configuration for output display and filtering
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Maximum cards per section (None = all)
    pub top_n: Option<usize>,
    pub sponsors: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            top_n: Some(6),
            sponsors: true,
        }
    }
}

impl OutputOptions {
    fn limit(&self) -> usize {
        self.top_n.unwrap_or(usize::MAX)
    }
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// One exported line per match
#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    date: String,
    kickoff: &'a str,
    season: &'a str,
    title: &'a str,
    opponent: &'a str,
    venue: &'a str,
    home_away: &'a str,
    score: String,
    result: &'a str,
    goalscorers: String,
    sponsor_name: &'a str,
    sponsor_logo: &'a str,
    sponsor_link: &'a str,
}

impl<'a> MatchRow<'a> {
    fn from_record(record: &'a MatchRecord) -> Self {
        let sponsor = record.sponsor.as_ref();
        MatchRow {
            date: record.date.date.format("%Y-%m-%d").to_string(),
            kickoff: record.date.kickoff.as_deref().unwrap_or_default(),
            season: &record.season,
            title: &record.title,
            opponent: &record.opponent,
            venue: record.venue.as_deref().unwrap_or_default(),
            home_away: if record.is_home { "home" } else { "away" },
            score: record.score().map(|s| s.to_string()).unwrap_or_default(),
            result: record.result().map(|r| r.label()).unwrap_or_default(),
            goalscorers: format_goalscorers(record.goalscorers()),
            sponsor_name: sponsor.map(|s| s.name.as_str()).unwrap_or_default(),
            sponsor_logo: sponsor.map(|s| s.logo.as_str()).unwrap_or_default(),
            sponsor_link: sponsor.map(|s| s.link.as_str()).unwrap_or_default(),
        }
    }
}

/// Writes matches to a CSV file with a header row
pub fn write_csv<'a, I>(records: I, path: &Path) -> Result<usize, Box<dyn Error>>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let mut written = 0;
    for record in records {
        writer.serialize(MatchRow::from_record(record))?;
        written += 1;
    }

    writer.flush()?;
    println!("{} matches written to {}", written, path.display());
    Ok(written)
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

/// Pretty-printed JSON of full records, nested outcome and sponsor included
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Writes any serializable view (an extraction or a list of matches) as JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    println!("JSON written to {}", path.display());
    Ok(())
}

// ============================================================================
// OUTPUT FORMATTING
// ============================================================================

fn print_heading(title: &str) {
    println!("\n{}", title);
    println!("{:-<80}", "");
}

/// Prints upcoming fixtures, soonest first
pub fn print_upcoming(upcoming: &[&MatchRecord], options: &OutputOptions) {
    print_heading("Upcoming matches");

    if upcoming.is_empty() {
        println!("Geen wedstrijden gepland in de nabije toekomst.");
        return;
    }

    for record in upcoming.iter().take(options.limit()) {
        println!(
            "{:8} {:6} {:45} {}",
            record.date.display,
            record.date.kickoff.as_deref().unwrap_or("??:??"),
            record.title,
            record.venue.as_deref().unwrap_or("Onbekend stadion")
        );
        if options.sponsors {
            if let Some(ref sponsor) = record.sponsor {
                println!("         Matchbalsponsor: {}", sponsor.name);
            }
        }
    }
}

/// Prints played matches in the given order
pub fn print_results(results: &[&MatchRecord], options: &OutputOptions) {
    print_heading("Results");

    if results.is_empty() {
        println!("Geen recente wedstrijden beschikbaar.");
        return;
    }

    for record in results.iter().take(options.limit()) {
        print_result_line(record);
    }
}

fn print_result_line(record: &MatchRecord) {
    let result = record.result().map(|r| r.letter()).unwrap_or(' ');
    let score = record.score().map(|s| s.to_string()).unwrap_or_default();
    println!(
        "[{}] {:8} {:7} {:45} {}",
        result, record.date.display, record.season, record.title, score
    );

    let scorers = record.goalscorers();
    if !scorers.is_empty() {
        println!("    Goals: {}", format_goalscorers(scorers));
    }
}

/// Prints the form strip, most recent first
pub fn print_form(form: &[FormEntry]) {
    print_heading("Form");

    if form.is_empty() {
        println!("No recent results.");
        return;
    }

    let letters: Vec<String> = form.iter().map(|r| r.letter().to_string()).collect();
    let labels: Vec<&str> = form.iter().map(|r| r.label()).collect();
    println!("{}   ({})", letters.join(" "), labels.join(", "));
}

pub fn print_sponsors(sponsors: &[&Sponsor]) {
    if sponsors.is_empty() {
        return;
    }
    print_heading("Sponsors");
    for sponsor in sponsors {
        println!("{:30} {}", sponsor.name, sponsor.link);
    }
}

/// Prints archive search hits, newest first
pub fn print_archive(hits: &[&MatchRecord], suggestions: &[&str]) {
    if !suggestions.is_empty() {
        println!("Opponents: {}", suggestions.join(", "));
    }

    print_heading("Archive");

    if hits.is_empty() {
        println!("Geen wedstrijden gevonden.");
        return;
    }

    for record in hits.iter().rev() {
        print_result_line(record);
    }
}

// ============================================================================
// TESTS
// ============================================================================
