use csv::ReaderBuilder;

use crate::error::FeedError;

// ============================================================================
// CELL GRID
// ============================================================================

/// Raw spreadsheet cells addressed by 0-based (row, column).
/// Rows may be ragged; missing cells read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Parses CSV text. Quoted fields may contain delimiters and newlines.
    /// Blank lines are dropped before row offsets are counted.
    pub fn parse(text: &str) -> Result<Grid, FeedError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Grid { rows })
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<String>>) -> Grid {
        Grid { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Trimmed cell text; `None` when the cell is missing or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .get(col)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

// ============================================================================
// TESTS
// ============================================================================
