use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use matchsheet_parser::output::{CSV_OUTPUT_FILE, JSON_OUTPUT_FILE};
use matchsheet_parser::store::{DEFAULT_CARD_LIMIT, DEFAULT_SUGGESTIONS};
use matchsheet_parser::{
    load_feed, print_archive, print_form, print_results, print_sponsors, print_upcoming, write_csv,
    write_json,
    ColumnExtractor, FeedError, MatchStore, OutputOptions, RowExtractor, ARCHIVE_FEED_URL,
    SCHEDULE_FEED_URL,
};

#[derive(Parser)]
#[command(name = "matchsheet_parser", about = "Fixtures, results and form from the club's match sheets")]
struct Cli {
    /// Log skipped rows and columns
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Season sheet: upcoming matches, results, form and sponsors
    Schedule {
        #[arg(long, default_value = SCHEDULE_FEED_URL)]
        url: String,
        /// Maximum matches per section
        #[arg(long, default_value_t = DEFAULT_CARD_LIMIT)]
        top_n: usize,
        /// Also export every match to CSV (default file: matches.csv)
        #[arg(long, num_args = 0..=1, default_missing_value = CSV_OUTPUT_FILE)]
        csv: Option<PathBuf>,
        /// Also export the full extraction as JSON (default file: matches.json)
        #[arg(long, num_args = 0..=1, default_missing_value = JSON_OUTPUT_FILE)]
        json: Option<PathBuf>,
        #[arg(long)]
        no_sponsors: bool,
    },
    /// Archive sheet: played matches, optionally filtered by team name
    Archive {
        #[arg(long, default_value = ARCHIVE_FEED_URL)]
        url: String,
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long, num_args = 0..=1, default_missing_value = CSV_OUTPUT_FILE)]
        csv: Option<PathBuf>,
        #[arg(long, num_args = 0..=1, default_missing_value = JSON_OUTPUT_FILE)]
        json: Option<PathBuf>,
    },
    /// Next match, form and match counts from both sheets
    Summary {
        #[arg(long, default_value = SCHEDULE_FEED_URL)]
        schedule_url: String,
        #[arg(long, default_value = ARCHIVE_FEED_URL)]
        archive_url: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "matchsheet_parser=debug" } else { "matchsheet_parser=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Message shown when a feed could not be loaded at all
fn report_failure(feed: &str, err: &FeedError) {
    if err.is_fetch_failure() {
        eprintln!("Fout bij laden wedstrijden ({}): {}", feed, err);
    } else {
        eprintln!("Wedstrijdgegevens ({}) onleesbaar: {}", feed, err);
    }
}

/// Export targets chosen on the command line
struct Exports {
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

async fn run_schedule(
    url: &str,
    options: &OutputOptions,
    exports: Exports,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut store = MatchStore::new();
    match load_feed(url, &ColumnExtractor::default()).await {
        Ok(extraction) => store.replace(extraction),
        Err(e) => {
            report_failure("schedule", &e);
            return Ok(ExitCode::FAILURE);
        }
    }

    match store.next_match() {
        Some(next) => {
            let kickoff = next.date.kickoff.as_deref().unwrap_or("??:??");
            println!("Next match: {} ({} {})", next.title, next.date.display, kickoff);
        }
        None => println!("Geen wedstrijden gepland in de nabije toekomst."),
    }

    let limit = options.top_n.unwrap_or(usize::MAX);
    print_upcoming(&store.upcoming(limit), options);
    print_results(&store.recent_results(limit), options);
    print_form(&store.form(5));
    if options.sponsors {
        print_sponsors(&store.sponsors());
    }

    if let Some(extraction) = store.extraction() {
        if let Some(path) = exports.csv {
            write_csv(extraction.all(), &path)?;
        }
        if let Some(path) = exports.json {
            write_json(extraction, &path)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_archive(url: &str, query: &str, exports: Exports) -> Result<ExitCode, Box<dyn Error>> {
    let mut store = MatchStore::new();
    let cutoff = chrono::Local::now().date_naive();
    let extractor = RowExtractor::default().played_by(cutoff);

    match load_feed(url, &extractor).await {
        Ok(extraction) => store.replace(extraction),
        Err(e) => {
            report_failure("archive", &e);
            return Ok(ExitCode::FAILURE);
        }
    }

    let hits = store.search(query).unwrap_or_default();
    let suggestions = store.suggest_opponents(query, DEFAULT_SUGGESTIONS);
    print_archive(&hits, &suggestions);

    if let Some(path) = exports.csv {
        write_csv(hits.iter().copied(), &path)?;
    }
    if let Some(path) = exports.json {
        write_json(&hits, &path)?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_summary(schedule_url: &str, archive_url: &str) -> Result<ExitCode, Box<dyn Error>> {
    let schedule_extractor = ColumnExtractor::default();
    let archive_extractor = RowExtractor::default().played_by(chrono::Local::now().date_naive());

    let (schedule, archive) = futures::join!(
        load_feed(schedule_url, &schedule_extractor),
        load_feed(archive_url, &archive_extractor)
    );

    let mut season = MatchStore::new();
    match schedule {
        Ok(extraction) => season.replace(extraction),
        Err(e) => report_failure("schedule", &e),
    }
    let mut history = MatchStore::new();
    match archive {
        Ok(extraction) => history.replace(extraction),
        Err(e) => report_failure("archive", &e),
    }

    if !season.is_loaded() && !history.is_loaded() {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(next) = season.next_match() {
        println!("Next match: {} ({})", next.title, next.date.display);
    }
    if season.is_loaded() {
        println!(
            "Season: {} upcoming, {} played",
            season.upcoming(usize::MAX).len(),
            season.timeline().len()
        );
        print_form(&season.form(5));
    }
    if history.is_loaded() {
        println!("\nArchive: {} played matches", history.timeline().len());
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Schedule { url, top_n, csv, json, no_sponsors } => {
            let options = OutputOptions {
                top_n: Some(top_n),
                sponsors: !no_sponsors,
            };
            run_schedule(&url, &options, Exports { csv, json }).await
        }
        Command::Archive { url, query, csv, json } => run_archive(&url, &query, Exports { csv, json }).await,
        Command::Summary { schedule_url, archive_url } => run_summary(&schedule_url, &archive_url).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNREACHABLE: &str = "http://127.0.0.1:9/sheet.csv";

    fn no_exports() -> Exports {
        Exports { csv: None, json: None }
    }

    #[tokio::test]
    async fn test_feed_failure_exits_without_error_value() {
        let code = run_schedule(UNREACHABLE, &OutputOptions::default(), no_exports())
            .await
            .unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let code = run_archive(UNREACHABLE, "", no_exports()).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let code = run_summary(UNREACHABLE, UNREACHABLE).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }
}
