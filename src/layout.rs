use std::collections::HashSet;

use crate::error::FeedError;
use crate::grid::Grid;

// ============================================================================
// FIXED SHEET CONSTANTS
// ============================================================================

pub const CLUB_NAME: &str = "Dynamo Beirs";

/// Season sheet, one fixture per column.
pub const SCHEDULE_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQRCgon0xh9NuQ87NgqQzBNPCEmmZWcC_jrulRhLwmrudf5UQ2QBRA28F1qmWB9L5xP9uZ8-ct2aqfR/pub?gid=300017481&single=true&output=csv";

/// Archive sheet, one played match per row.
pub const ARCHIVE_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQRCgon0xh9NuQ87NgqQzBNPCEmmZWcC_jrulRhLwmrudf5UQ2QBRA28F1qmWB9L5xP9uZ8-ct2aqfR/pub?gid=890518549&single=true&output=csv";

/// Home/away cell value meaning the club plays at home.
pub const HOME_MARKER: &str = "thuis";

/// Goalscorer cell meaning "nobody scored".
pub const NO_SCORERS_MARKER: &str = "/";

/// Substring in a sponsor name cell meaning the slot is still for sale.
pub const SPONSOR_VACANT_MARKER: &str = "beschikbaar";

// ============================================================================
// LAYOUT TYPES
// ============================================================================

/// How the two goal tallies of a fixture are stored in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// First tally is the club's goals, second the opponent's.
    ClubFirst,
    /// First tally is the home team's goals, second the away team's.
    HomeFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonFormat {
    /// "2025-26"
    Long,
    /// "'25-26"
    Short,
}

/// Cell range holding the most recent results, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRange {
    pub row: usize,
    pub first_col: usize,
    pub len: usize,
}

/// Column-oriented sheet: one fixture per column, fields at fixed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub first_col: usize,
    pub fixture_count: usize,
    pub opponent_row: usize,
    pub date_row: usize,
    pub kickoff_row: usize,
    pub venue_row: usize,
    pub home_away_row: usize,
    pub result_row: usize,
    pub goals_for_row: usize,
    pub goals_against_row: usize,
    pub goalscorers_row: usize,
    pub sponsor_name_row: usize,
    pub sponsor_logo_row: usize,
    pub sponsor_link_row: usize,
    pub form: Option<FormRange>,
    pub score_order: ScoreOrder,
    pub season_format: SeasonFormat,
}

/// Row-oriented sheet: one match per row, fields at fixed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub header_rows: usize,
    pub opponent_col: usize,
    pub date_col: usize,
    pub kickoff_col: usize,
    pub venue_col: usize,
    pub home_away_col: usize,
    pub first_goals_col: usize,
    pub second_goals_col: usize,
    pub goalscorers_col: usize,
    pub score_order: ScoreOrder,
    pub season_format: SeasonFormat,
}

impl Default for ColumnLayout {
    /// Fixtures in columns F..AA, form in AC83..AG83.
    fn default() -> Self {
        ColumnLayout {
            first_col: 5,
            fixture_count: 22,
            opponent_row: 1,
            date_row: 2,
            kickoff_row: 3,
            venue_row: 4,
            home_away_row: 5,
            result_row: 73,
            goals_for_row: 74,
            goals_against_row: 75,
            goalscorers_row: 77,
            sponsor_name_row: 84,
            sponsor_logo_row: 85,
            sponsor_link_row: 86,
            form: Some(FormRange { row: 82, first_col: 28, len: 5 }),
            score_order: ScoreOrder::ClubFirst,
            season_format: SeasonFormat::Long,
        }
    }
}

impl Default for RowLayout {
    /// Matches from row 3 onward, fields in columns B and E..K.
    fn default() -> Self {
        RowLayout {
            header_rows: 2,
            opponent_col: 1,
            date_col: 4,
            kickoff_col: 5,
            venue_col: 6,
            home_away_col: 7,
            first_goals_col: 8,
            second_goals_col: 9,
            goalscorers_col: 10,
            score_order: ScoreOrder::HomeFirst,
            season_format: SeasonFormat::Short,
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

fn ensure_distinct(kind: &str, offsets: &[(&str, usize)]) -> Result<(), FeedError> {
    let mut seen = HashSet::new();
    for (name, offset) in offsets {
        if !seen.insert(*offset) {
            return Err(FeedError::Layout(format!(
                "{} offset {} for '{}' is used by another field",
                kind, offset, name
            )));
        }
    }
    Ok(())
}

impl ColumnLayout {
    fn field_rows(&self) -> [(&'static str, usize); 12] {
        [
            ("opponent", self.opponent_row),
            ("date", self.date_row),
            ("kickoff", self.kickoff_row),
            ("venue", self.venue_row),
            ("home_away", self.home_away_row),
            ("result", self.result_row),
            ("goals_for", self.goals_for_row),
            ("goals_against", self.goals_against_row),
            ("goalscorers", self.goalscorers_row),
            ("sponsor_name", self.sponsor_name_row),
            ("sponsor_logo", self.sponsor_logo_row),
            ("sponsor_link", self.sponsor_link_row),
        ]
    }

    /// One past the last fixture column.
    pub fn fixture_end(&self) -> usize {
        self.first_col + self.fixture_count
    }

    /// Checks the table itself, independent of any sheet.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.fixture_count == 0 {
            return Err(FeedError::Layout("fixture span is empty".to_string()));
        }
        ensure_distinct("row", &self.field_rows())?;

        if let Some(form) = &self.form {
            if form.len == 0 {
                return Err(FeedError::Layout("form range is empty".to_string()));
            }
            let form_end = form.first_col + form.len;
            let overlaps_columns = form.first_col < self.fixture_end() && self.first_col < form_end;
            let on_field_row = self.field_rows().iter().any(|(_, row)| *row == form.row);
            if overlaps_columns && on_field_row {
                return Err(FeedError::Layout(format!(
                    "form range row {} overlaps fixture cells",
                    form.row
                )));
            }
        }
        Ok(())
    }

    /// Checks that a sheet is big enough for every offset in the table.
    pub fn check_grid(&self, grid: &Grid) -> Result<(), FeedError> {
        let mut max_row = self.field_rows().iter().map(|(_, row)| *row).max().unwrap_or(0);
        let mut max_col_end = self.fixture_end();
        if let Some(form) = &self.form {
            max_row = max_row.max(form.row);
            max_col_end = max_col_end.max(form.first_col + form.len);
        }

        if grid.height() <= max_row {
            return Err(FeedError::Layout(format!(
                "sheet has {} rows, layout reads row {}",
                grid.height(),
                max_row + 1
            )));
        }
        if grid.width() < max_col_end {
            return Err(FeedError::Layout(format!(
                "sheet has {} columns, layout reads column {}",
                grid.width(),
                max_col_end
            )));
        }
        Ok(())
    }
}

impl RowLayout {
    fn field_cols(&self) -> [(&'static str, usize); 8] {
        [
            ("opponent", self.opponent_col),
            ("date", self.date_col),
            ("kickoff", self.kickoff_col),
            ("venue", self.venue_col),
            ("home_away", self.home_away_col),
            ("first_goals", self.first_goals_col),
            ("second_goals", self.second_goals_col),
            ("goalscorers", self.goalscorers_col),
        ]
    }

    pub fn validate(&self) -> Result<(), FeedError> {
        ensure_distinct("column", &self.field_cols())
    }

    /// A sheet with data rows must be wide enough for every column offset.
    /// Individual short rows are still allowed and simply read as blank.
    pub fn check_grid(&self, grid: &Grid) -> Result<(), FeedError> {
        if grid.height() <= self.header_rows {
            return Ok(());
        }
        let max_col = self.field_cols().iter().map(|(_, col)| *col).max().unwrap_or(0);
        if grid.width() <= max_col {
            return Err(FeedError::Layout(format!(
                "sheet has {} columns, layout reads column {}",
                grid.width(),
                max_col + 1
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_grid(rows: usize, cols: usize) -> Grid {
        Grid::from_rows(vec![vec![String::new(); cols]; rows])
    }

    #[test]
    fn test_default_layouts_are_valid() {
        assert!(ColumnLayout::default().validate().is_ok());
        assert!(RowLayout::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_row_offset_rejected() {
        let layout = ColumnLayout { venue_row: 1, ..ColumnLayout::default() };
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("venue"));
    }

    #[test]
    fn test_duplicate_column_offset_rejected() {
        let layout = RowLayout { second_goals_col: 8, ..RowLayout::default() };
        assert!(matches!(layout.validate(), Err(FeedError::Layout(_))));
    }

    #[test]
    fn test_form_range_overlapping_fixtures_rejected() {
        let layout = ColumnLayout {
            form: Some(FormRange { row: 2, first_col: 10, len: 5 }),
            ..ColumnLayout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_empty_spans_rejected() {
        let layout = ColumnLayout { fixture_count: 0, ..ColumnLayout::default() };
        assert!(layout.validate().is_err());

        let layout = ColumnLayout {
            form: Some(FormRange { row: 82, first_col: 28, len: 0 }),
            ..ColumnLayout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_column_check_grid_bounds() {
        let layout = ColumnLayout::default();
        assert!(layout.check_grid(&blank_grid(87, 33)).is_ok());

        let err = layout.check_grid(&blank_grid(80, 33)).unwrap_err();
        assert!(err.to_string().contains("rows"));

        let err = layout.check_grid(&blank_grid(87, 20)).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn test_row_check_grid_bounds() {
        let layout = RowLayout::default();
        // Header only: nothing to read, nothing to check
        assert!(layout.check_grid(&blank_grid(2, 3)).is_ok());
        assert!(layout.check_grid(&blank_grid(5, 11)).is_ok());
        assert!(layout.check_grid(&blank_grid(5, 8)).is_err());
    }
}
