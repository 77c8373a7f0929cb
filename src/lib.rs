pub mod column_handler;
pub mod dates;
pub mod error;
pub mod grid;
pub mod layout;
pub mod output;
pub mod record;
pub mod row_handler;
pub mod store;
pub mod utils;

use tracing::{debug, warn};

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================
pub use column_handler::ColumnExtractor;
pub use error::FeedError;
pub use grid::Grid;
pub use layout::{ColumnLayout, RowLayout, ARCHIVE_FEED_URL, CLUB_NAME, SCHEDULE_FEED_URL};
pub use output::{
    print_archive, print_form, print_results, print_sponsors, print_upcoming, to_json, write_csv,
    write_json, OutputOptions,
};
pub use record::{Extraction, FormEntry, Goalscorer, MatchDate, MatchRecord, MatchResult, Outcome, Score, Sponsor};
pub use row_handler::RowExtractor;
pub use store::MatchStore;

// ============================================================================
// EXTRACTION STRATEGY
// ============================================================================

/// Turns a parsed sheet into match records. Implementations skip malformed
/// rows or columns and only fail when the sheet as a whole does not fit.
pub trait Extractor {
    fn extract(&self, grid: &Grid) -> Result<Extraction, FeedError>;
}

// ============================================================================
// FETCHING
// ============================================================================

/// Fetch the CSV export of a published sheet
pub async fn fetch_csv(url: &str) -> Result<String, FeedError> {
    debug!(url, "fetching spreadsheet");
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, %status, "spreadsheet request failed");
        return Err(FeedError::Status(status));
    }

    let text = response.text().await?;
    if looks_like_html(&text) {
        return Err(FeedError::NotCsv);
    }
    Ok(text)
}

/// An unpublished sheet answers with a login page instead of CSV
fn looks_like_html(text: &str) -> bool {
    let head: String = text.trim_start().chars().take(15).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

// ============================================================================
// MAIN ENTRY POINTS
// ============================================================================

/// Parses CSV text with the given strategy
pub fn parse_feed(text: &str, extractor: &dyn Extractor) -> Result<Extraction, FeedError> {
    let grid = Grid::parse(text)?;
    if grid.is_empty() {
        return Err(FeedError::EmptyFeed);
    }
    extractor.extract(&grid)
}

/// Fetches and parses one feed. Either every record of the cycle is returned
/// or a single error.
pub async fn load_feed(url: &str, extractor: &dyn Extractor) -> Result<Extraction, FeedError> {
    let text = fetch_csv(url).await?;
    parse_feed(&text, extractor)
}

// ============================================================================
// TESTS
// ============================================================================
