use tracing::{debug, info};

use crate::dates::{named_display_date, parse_named_date, season_label};
use crate::error::FeedError;
use crate::grid::Grid;
use crate::layout::ColumnLayout;
use crate::record::{
    match_title, sort_chronologically, Extraction, FormEntry, MatchDate, MatchRecord, MatchResult,
    Outcome, Score,
};
use crate::utils::{classify_result, is_home_marker, parse_goalscorers, parse_sponsor};
use crate::Extractor;

// ============================================================================
// COLUMN-ORIENTED EXTRACTION
// ============================================================================

/// Reads the season sheet: one fixture per column plus a form strip.
#[derive(Debug, Clone, Default)]
pub struct ColumnExtractor {
    pub layout: ColumnLayout,
}

impl ColumnExtractor {
    pub fn new(layout: ColumnLayout) -> Self {
        ColumnExtractor { layout }
    }
}

impl Extractor for ColumnExtractor {
    fn extract(&self, grid: &Grid) -> Result<Extraction, FeedError> {
        self.layout.validate()?;
        self.layout.check_grid(grid)?;

        let mut matches: Vec<MatchRecord> = (self.layout.first_col..self.layout.fixture_end())
            .filter_map(|col| parse_fixture_column(grid, &self.layout, col))
            .collect();
        sort_chronologically(&mut matches);

        let form = parse_form(grid, &self.layout);

        info!(
            fixtures = matches.iter().filter(|m| m.is_upcoming()).count(),
            results = matches.iter().filter(|m| m.is_past()).count(),
            form = form.len(),
            "extracted season sheet"
        );

        Ok(Extraction { matches, form })
    }
}

// ============================================================================
// FIXTURE PARSING
// ============================================================================

/// Builds the record for one fixture column, or `None` for empty or
/// malformed columns.
fn parse_fixture_column(grid: &Grid, layout: &ColumnLayout, col: usize) -> Option<MatchRecord> {
    let opponent = grid.cell(layout.opponent_row, col);
    let raw_date = grid.cell(layout.date_row, col);
    let kickoff = grid.cell(layout.kickoff_row, col);
    let venue = grid.cell(layout.venue_row, col);
    let home_away = grid.cell(layout.home_away_row, col);

    // Unused template columns are blank; only log partially filled ones
    let (Some(opponent), Some(raw_date), Some(kickoff), Some(venue), Some(home_away)) =
        (opponent, raw_date, kickoff, venue, home_away)
    else {
        if opponent.is_some() || raw_date.is_some() {
            debug!(col, "skipping fixture column with missing header fields");
        }
        return None;
    };

    let (Some(date), Some(display)) = (parse_named_date(raw_date), named_display_date(raw_date)) else {
        debug!(col, raw_date, "skipping fixture column with unparseable date");
        return None;
    };

    let is_home = is_home_marker(home_away);

    let outcome = if grid.cell(layout.result_row, col).is_some() {
        let (Some(goals_for), Some(goals_against)) = (
            grid.cell(layout.goals_for_row, col),
            grid.cell(layout.goals_against_row, col),
        ) else {
            debug!(col, opponent, "skipping result column without both tallies");
            return None;
        };
        let score = Score::from_tallies(goals_for, goals_against, layout.score_order, is_home);
        let (club_goals, opponent_goals) = score.club_view(is_home);
        let result = classify_result(club_goals, opponent_goals);
        Some(Outcome {
            score,
            result,
            goalscorers: parse_goalscorers(grid.cell(layout.goalscorers_row, col)),
        })
    } else {
        None
    };

    let sponsor = parse_sponsor(
        grid.cell(layout.sponsor_name_row, col),
        grid.cell(layout.sponsor_logo_row, col),
        grid.cell(layout.sponsor_link_row, col),
    );

    Some(MatchRecord {
        title: match_title(opponent, is_home),
        opponent: opponent.to_string(),
        date: MatchDate {
            raw: raw_date.to_string(),
            date,
            display,
            kickoff: Some(kickoff.to_string()),
        },
        season: season_label(date, layout.season_format),
        venue: Some(venue.to_string()),
        is_home,
        outcome,
        sponsor,
    })
}

/// Reads the form strip, most recent first. Unknown cells are skipped.
fn parse_form(grid: &Grid, layout: &ColumnLayout) -> Vec<FormEntry> {
    let Some(form) = &layout.form else {
        return Vec::new();
    };
    (form.first_col..form.first_col + form.len)
        .filter_map(|col| grid.cell(form.row, col))
        .filter_map(MatchResult::from_form_cell)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FormRange;

    /// Small layout so tests can build sheets by hand.
    fn small_layout() -> ColumnLayout {
        ColumnLayout {
            first_col: 1,
            fixture_count: 3,
            opponent_row: 0,
            date_row: 1,
            kickoff_row: 2,
            venue_row: 3,
            home_away_row: 4,
            result_row: 5,
            goals_for_row: 6,
            goals_against_row: 7,
            goalscorers_row: 8,
            sponsor_name_row: 9,
            sponsor_logo_row: 10,
            sponsor_link_row: 11,
            form: Some(FormRange { row: 12, first_col: 1, len: 3 }),
            ..ColumnLayout::default()
        }
    }

    fn sheet(columns: &[[&str; 12]], form: [&str; 3]) -> Grid {
        let mut rows = vec![vec![String::new(); 4]; 13];
        for (c, column) in columns.iter().enumerate() {
            for (r, value) in column.iter().enumerate() {
                rows[r][c + 1] = value.to_string();
            }
        }
        for (c, value) in form.iter().enumerate() {
            rows[12][c + 1] = value.to_string();
        }
        Grid::from_rows(rows)
    }

    const AWAY_LOSS: [&str; 12] = [
        "KV Tielt", "20 dec 2025", "15:00", "Sportpark", "uit", "verlies", "1", "3",
        "Jansen", "", "", "",
    ];
    const HOME_WIN: [&str; 12] = [
        "SK Roeselare", "1 jan 2026", "14:30", "De Kouter", "Thuis", "winst", "2", "0",
        "Jansen (x2)", "Bakkerij Peeters", "peeters.png", "https://peeters.be",
    ];
    const FIXTURE: [&str; 12] = [
        "FC Gullegem", "10 mar 2026", "20:00", "De Kouter", "thuis", "", "", "",
        "", "Nog beschikbaar", "x.png", "https://x.be",
    ];

    #[test]
    fn test_extracts_and_sorts_columns() {
        let grid = sheet(&[FIXTURE, HOME_WIN, AWAY_LOSS], ["w", "l", "?"]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();

        let titles: Vec<&str> = extraction.matches.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "KV Tielt vs Dynamo Beirs",
                "Dynamo Beirs vs SK Roeselare",
                "Dynamo Beirs vs FC Gullegem",
            ]
        );
        assert_eq!(extraction.form, vec![MatchResult::Win, MatchResult::Loss]);
    }

    #[test]
    fn test_away_score_is_swapped_home_first() {
        let grid = sheet(&[AWAY_LOSS], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();
        let record = &extraction.matches[0];

        assert_eq!(record.score().unwrap().to_string(), "3-1");
        assert_eq!(record.result(), Some(MatchResult::Loss));
        assert_eq!(record.date.display, "20 dec");
        assert_eq!(record.season, "2025-26");
    }

    #[test]
    fn test_fixture_has_no_outcome_and_vacant_sponsor() {
        let grid = sheet(&[FIXTURE], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();
        let record = &extraction.matches[0];

        assert!(record.is_upcoming());
        assert!(record.goalscorers().is_empty());
        assert!(record.sponsor.is_none());
        assert_eq!(record.date.display, "10 mrt");
    }

    #[test]
    fn test_result_without_tallies_is_skipped() {
        let mut broken = HOME_WIN;
        broken[7] = "";
        let grid = sheet(&[broken, AWAY_LOSS], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();
        assert_eq!(extraction.matches.len(), 1);
        assert_eq!(extraction.matches[0].opponent, "KV Tielt");
    }

    #[test]
    fn test_bad_date_and_blank_columns_skipped() {
        let mut bad_date = HOME_WIN;
        bad_date[1] = "ergens in maart";
        let grid = sheet(&[bad_date], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();
        assert!(extraction.matches.is_empty());
        assert!(extraction.form.is_empty());
    }

    #[test]
    fn test_long_month_spelling_kept_in_display() {
        let mut september = FIXTURE;
        september[1] = "15 sept 2025";
        let mut october = HOME_WIN;
        october[1] = "05 oct 2025";
        let mut unknown = AWAY_LOSS;
        unknown[1] = "15 xyz 2025";
        let grid = sheet(&[september, october, unknown], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();

        let displays: Vec<&str> = extraction.matches.iter().map(|m| m.date.display.as_str()).collect();
        assert_eq!(displays, vec!["15 sept", "05 okt"]);
    }

    #[test]
    fn test_same_day_columns_keep_sheet_order() {
        let mut first = FIXTURE;
        first[0] = "Z";
        let mut second = FIXTURE;
        second[0] = "A";
        let mut third = FIXTURE;
        third[0] = "M";
        let grid = sheet(&[first, second, third], ["", "", ""]);
        let extraction = ColumnExtractor::new(small_layout()).extract(&grid).unwrap();

        let opponents: Vec<&str> = extraction.matches.iter().map(|m| m.opponent.as_str()).collect();
        assert_eq!(opponents, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_sheet_too_small_fails() {
        let grid = Grid::from_rows(vec![vec![String::new(); 4]; 5]);
        let err = ColumnExtractor::new(small_layout()).extract(&grid).unwrap_err();
        assert!(matches!(err, FeedError::Layout(_)));
    }
}
