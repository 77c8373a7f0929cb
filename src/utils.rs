use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::layout::{HOME_MARKER, NO_SCORERS_MARKER, SPONSOR_VACANT_MARKER};
use crate::record::{Goalscorer, MatchResult, Sponsor};

/// Checks if a home/away cell marks a home match
pub fn is_home_marker(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case(HOME_MARKER)
}

/// Compares club goals with opponent goals. A tally that is not a number
/// (forfeit codes, stray text) makes the match count as a draw.
pub fn classify_result(club: &str, opponent: &str) -> MatchResult {
    let (Ok(club), Ok(opponent)) = (club.trim().parse::<i64>(), opponent.trim().parse::<i64>()) else {
        return MatchResult::Draw;
    };
    match club.cmp(&opponent) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Equal => MatchResult::Draw,
        std::cmp::Ordering::Less => MatchResult::Loss,
    }
}

fn scorer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(.+?)(?:\s*\(x(\d+)\))?$").expect("goalscorer pattern is valid")
    })
}

/// Parses "Jansen (x2); Peeters" into scorer entries.
/// Blank and "/" cells mean no scorers. Entries that do not fit
/// `name [(xN)]` are skipped.
pub fn parse_goalscorers(raw: Option<&str>) -> Vec<Goalscorer> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let cleaned = raw.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace());
    if cleaned.is_empty() || cleaned == NO_SCORERS_MARKER {
        return Vec::new();
    }

    let mut scorers = Vec::new();
    for entry in cleaned.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let Some(caps) = scorer_pattern().captures(entry) else {
            debug!(entry, "skipping goalscorer entry that does not match pattern");
            continue;
        };

        let player = caps[1].trim();
        let goals = match caps.get(2) {
            Some(count) => match count.as_str().parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    debug!(entry, "skipping goalscorer entry with bad goal count");
                    continue;
                }
            },
            None => 1,
        };

        if player.is_empty() || player == NO_SCORERS_MARKER {
            continue;
        }

        scorers.push(Goalscorer {
            player: player.to_string(),
            goals,
        });
    }

    scorers
}

/// Sponsor only when name, logo and link are all present and the slot is not
/// marked as still available.
pub fn parse_sponsor(name: Option<&str>, logo: Option<&str>, link: Option<&str>) -> Option<Sponsor> {
    let (name, logo, link) = (name?, logo?, link?);
    if name.to_lowercase().contains(SPONSOR_VACANT_MARKER) {
        return None;
    }
    Some(Sponsor {
        name: name.to_string(),
        logo: logo.to_string(),
        link: link.to_string(),
    })
}

/// Renders scorers back into sheet notation, e.g. "Jansen (x2); Peeters".
pub fn format_goalscorers(scorers: &[Goalscorer]) -> String {
    scorers
        .iter()
        .map(|g| {
            if g.goals == 1 {
                g.player.clone()
            } else {
                format!("{} (x{})", g.player, g.goals)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// TESTS
// ============================================================================
