use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::layout::{ScoreOrder, CLUB_NAME};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Club-relative outcome of a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

/// One slot of the recent-form sequence.
pub type FormEntry = MatchResult;

impl MatchResult {
    /// Label used on the club site.
    pub fn label(&self) -> &'static str {
        match self {
            MatchResult::Win => "winst",
            MatchResult::Draw => "gelijk",
            MatchResult::Loss => "verlies",
        }
    }

    pub fn letter(&self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }

    /// Reads a form cell: w, d or l in any case.
    pub fn from_form_cell(cell: &str) -> Option<MatchResult> {
        match cell.trim().to_ascii_lowercase().as_str() {
            "w" => Some(MatchResult::Win),
            "d" => Some(MatchResult::Draw),
            "l" => Some(MatchResult::Loss),
            _ => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Date and kickoff as read from the sheet plus the localized display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDate {
    pub raw: String,
    pub date: NaiveDate,
    pub display: String,
    pub kickoff: Option<String>,
}

/// Final score, home team first. Tallies keep the sheet text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub home: String,
    pub away: String,
}

impl Score {
    /// Builds a home-first score from the two sheet tallies. Club-first
    /// tallies are swapped when the club played away.
    pub fn from_tallies(first: &str, second: &str, order: ScoreOrder, is_home: bool) -> Score {
        let (home, away) = match order {
            ScoreOrder::HomeFirst => (first, second),
            ScoreOrder::ClubFirst if is_home => (first, second),
            ScoreOrder::ClubFirst => (second, first),
        };
        Score {
            home: home.to_string(),
            away: away.to_string(),
        }
    }

    /// (club, opponent) tallies.
    pub fn club_view(&self, is_home: bool) -> (&str, &str) {
        if is_home {
            (self.home.as_str(), self.away.as_str())
        } else {
            (self.away.as_str(), self.home.as_str())
        }
    }

    /// Numeric (home, away) goals when both tallies are numbers.
    pub fn goals(&self) -> Option<(u32, u32)> {
        Some((self.home.parse().ok()?, self.away.parse().ok()?))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goalscorer {
    pub player: String,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sponsor {
    pub name: String,
    pub logo: String,
    pub link: String,
}

/// The played part of a match. Score and result always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub score: Score,
    pub result: MatchResult,
    pub goalscorers: Vec<Goalscorer>,
}

/// One fixture (no outcome yet) or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub title: String,
    pub opponent: String,
    pub date: MatchDate,
    pub season: String,
    pub venue: Option<String>,
    pub is_home: bool,
    pub outcome: Option<Outcome>,
    pub sponsor: Option<Sponsor>,
}

impl MatchRecord {
    pub fn is_past(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_upcoming(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn score(&self) -> Option<&Score> {
        self.outcome.as_ref().map(|o| &o.score)
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.outcome.as_ref().map(|o| o.result)
    }

    /// Empty for fixtures.
    pub fn goalscorers(&self) -> &[Goalscorer] {
        self.outcome
            .as_ref()
            .map(|o| o.goalscorers.as_slice())
            .unwrap_or_default()
    }
}

/// "<home> vs <away>" with the club on the correct side.
pub fn match_title(opponent: &str, is_home: bool) -> String {
    if is_home {
        format!("{} vs {}", CLUB_NAME, opponent)
    } else {
        format!("{} vs {}", opponent, CLUB_NAME)
    }
}

/// Everything read from one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// All records, ascending by date.
    pub matches: Vec<MatchRecord>,
    /// Most recent first.
    pub form: Vec<FormEntry>,
}

impl Extraction {
    pub fn all(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter().filter(|m| m.is_upcoming())
    }

    pub fn past(&self) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter().filter(|m| m.is_past())
    }
}

/// Stable ascending sort on calendar date.
pub fn sort_chronologically(matches: &mut [MatchRecord]) {
    matches.sort_by_key(|m| m.date.date);
}

// ============================================================================
// TESTS
// ============================================================================
