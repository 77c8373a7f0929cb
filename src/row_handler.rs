use chrono::NaiveDate;
use tracing::{debug, info};

use crate::dates::{display_date, parse_numeric_date, season_label};
use crate::error::FeedError;
use crate::grid::Grid;
use crate::layout::RowLayout;
use crate::record::{match_title, sort_chronologically, Extraction, MatchDate, MatchRecord, Outcome, Score};
use crate::utils::{classify_result, is_home_marker, parse_goalscorers};
use crate::Extractor;

// ============================================================================
// ROW-ORIENTED EXTRACTION
// ============================================================================

/// Reads the archive sheet: one played match per row.
#[derive(Debug, Clone, Default)]
pub struct RowExtractor {
    pub layout: RowLayout,
    /// Rows dated after this day are skipped.
    pub cutoff: Option<NaiveDate>,
}

impl RowExtractor {
    pub fn new(layout: RowLayout) -> Self {
        RowExtractor { layout, cutoff: None }
    }

    /// Only keep matches played on or before `today`.
    pub fn played_by(mut self, today: NaiveDate) -> Self {
        self.cutoff = Some(today);
        self
    }
}

impl Extractor for RowExtractor {
    fn extract(&self, grid: &Grid) -> Result<Extraction, FeedError> {
        self.layout.validate()?;
        self.layout.check_grid(grid)?;

        let mut matches: Vec<MatchRecord> = (self.layout.header_rows..grid.height())
            .filter_map(|row| parse_match_row(grid, &self.layout, self.cutoff, row))
            .collect();
        sort_chronologically(&mut matches);

        info!(results = matches.len(), "extracted archive sheet");

        Ok(Extraction { matches, form: Vec::new() })
    }
}

// ============================================================================
// ROW PARSING
// ============================================================================

fn parse_match_row(
    grid: &Grid,
    layout: &RowLayout,
    cutoff: Option<NaiveDate>,
    row: usize,
) -> Option<MatchRecord> {
    let (Some(opponent), Some(raw_date), Some(first_goals), Some(second_goals)) = (
        grid.cell(row, layout.opponent_col),
        grid.cell(row, layout.date_col),
        grid.cell(row, layout.first_goals_col),
        grid.cell(row, layout.second_goals_col),
    ) else {
        debug!(row, "skipping archive row without opponent, date or score");
        return None;
    };

    let Some(date) = parse_numeric_date(raw_date) else {
        debug!(row, raw_date, "skipping archive row with unparseable date");
        return None;
    };

    if cutoff.is_some_and(|today| date > today) {
        debug!(row, raw_date, "skipping archive row dated in the future");
        return None;
    }

    let is_home = grid
        .cell(row, layout.home_away_col)
        .is_some_and(is_home_marker);

    let score = Score::from_tallies(first_goals, second_goals, layout.score_order, is_home);
    let (club_goals, opponent_goals) = score.club_view(is_home);
    let result = classify_result(club_goals, opponent_goals);

    Some(MatchRecord {
        title: match_title(opponent, is_home),
        opponent: opponent.to_string(),
        date: MatchDate {
            raw: raw_date.to_string(),
            date,
            display: display_date(date),
            kickoff: grid.cell(row, layout.kickoff_col).map(str::to_string),
        },
        season: season_label(date, layout.season_format),
        venue: grid.cell(row, layout.venue_col).map(str::to_string),
        is_home,
        outcome: Some(Outcome {
            score,
            result,
            goalscorers: parse_goalscorers(grid.cell(row, layout.goalscorers_col)),
        }),
        sponsor: None,
    })
}

// ============================================================================
// TESTS
// ============================================================================
