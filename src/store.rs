use std::collections::HashSet;

use crate::record::{Extraction, FormEntry, MatchRecord, Sponsor};

pub const DEFAULT_SUGGESTIONS: usize = 5;
pub const DEFAULT_CARD_LIMIT: usize = 6;

/// Holds the last successful extraction. Replaced wholesale on every fetch;
/// readers only ever see one complete extraction.
#[derive(Debug, Default)]
pub struct MatchStore {
    extraction: Option<Extraction>,
}

impl MatchStore {
    pub fn new() -> Self {
        MatchStore::default()
    }

    pub fn replace(&mut self, extraction: Extraction) {
        self.extraction = Some(extraction);
    }

    pub fn clear(&mut self) {
        self.extraction = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.extraction.is_some()
    }

    pub fn extraction(&self) -> Option<&Extraction> {
        self.extraction.as_ref()
    }

    fn matches(&self) -> &[MatchRecord] {
        self.extraction
            .as_ref()
            .map(|e| e.matches.as_slice())
            .unwrap_or_default()
    }

    /// Records whose title contains `query`, ignoring case. An empty query
    /// matches everything. `None` when nothing has been loaded yet.
    pub fn search(&self, query: &str) -> Option<Vec<&MatchRecord>> {
        let extraction = self.extraction.as_ref()?;
        let needle = query.trim().to_lowercase();
        Some(
            extraction
                .matches
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .collect(),
        )
    }

    /// Distinct opponent names containing `query`, in order of first appearance.
    pub fn suggest_opponents(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        self.matches()
            .iter()
            .map(|m| m.opponent.as_str())
            .filter(|o| seen.insert(*o))
            .filter(|o| o.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Distinct sponsors by name, in match order.
    pub fn sponsors(&self) -> Vec<&Sponsor> {
        let mut seen = HashSet::new();
        self.matches()
            .iter()
            .filter_map(|m| m.sponsor.as_ref())
            .filter(|s| seen.insert(s.name.as_str()))
            .collect()
    }

    pub fn next_match(&self) -> Option<&MatchRecord> {
        self.matches().iter().find(|m| m.is_upcoming())
    }

    pub fn upcoming(&self, limit: usize) -> Vec<&MatchRecord> {
        self.matches().iter().filter(|m| m.is_upcoming()).take(limit).collect()
    }

    /// Played matches, most recent first.
    pub fn recent_results(&self, limit: usize) -> Vec<&MatchRecord> {
        self.matches().iter().rev().filter(|m| m.is_past()).take(limit).collect()
    }

    /// Played matches in season order.
    pub fn timeline(&self) -> Vec<&MatchRecord> {
        self.matches().iter().filter(|m| m.is_past()).collect()
    }

    /// Form from the sheet's form strip, or derived from the latest results
    /// when the sheet has none.
    pub fn form(&self, limit: usize) -> Vec<FormEntry> {
        match &self.extraction {
            Some(e) if !e.form.is_empty() => e.form.iter().copied().take(limit).collect(),
            _ => self.recent_form(limit),
        }
    }

    /// Results of the latest played matches, most recent first.
    pub fn recent_form(&self, limit: usize) -> Vec<FormEntry> {
        self.recent_results(limit)
            .into_iter()
            .filter_map(MatchRecord::result)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::display_date;
    use crate::record::{match_title, MatchDate, MatchResult, Outcome, Score};
    use chrono::{Datelike, NaiveDate};

    fn record(opponent: &str, day: u32, outcome: Option<(&str, &str, MatchResult)>, sponsor: Option<&str>) -> MatchRecord {
        let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        MatchRecord {
            title: match_title(opponent, true),
            opponent: opponent.to_string(),
            date: MatchDate {
                raw: date.to_string(),
                date,
                display: display_date(date),
                kickoff: None,
            },
            season: "2025-26".to_string(),
            venue: None,
            is_home: true,
            outcome: outcome.map(|(h, a, result)| Outcome {
                score: Score { home: h.to_string(), away: a.to_string() },
                result,
                goalscorers: Vec::new(),
            }),
            sponsor: sponsor.map(|name| Sponsor {
                name: name.to_string(),
                logo: format!("{}.png", name),
                link: format!("https://{}.be", name),
            }),
        }
    }

    fn loaded_store() -> MatchStore {
        let mut store = MatchStore::new();
        store.replace(Extraction {
            matches: vec![
                record("KV Tielt", 3, Some(("2", "0", MatchResult::Win)), Some("bakker")),
                record("SK Roeselare", 10, Some(("1", "1", MatchResult::Draw)), None),
                record("KV Tielt", 17, Some(("0", "1", MatchResult::Loss)), Some("bakker")),
                record("FC Gullegem", 24, None, Some("slager")),
                record("KVC Torhout", 31, None, None),
            ],
            form: Vec::new(),
        });
        store
    }

    #[test]
    fn test_search_requires_loaded_store() {
        let store = MatchStore::new();
        assert!(store.search("tielt").is_none());
        assert!(store.next_match().is_none());
        assert!(store.sponsors().is_empty());
    }

    #[test]
    fn test_search_case_insensitive() {
        let store = loaded_store();
        assert_eq!(store.search("TIELT").unwrap().len(), 2);
        assert_eq!(store.search("").unwrap().len(), 5);
        assert!(store.search("Brugge").unwrap().is_empty());
    }

    #[test]
    fn test_suggest_opponents_unique_and_limited() {
        let store = loaded_store();
        assert_eq!(store.suggest_opponents("k", 5), vec!["KV Tielt", "SK Roeselare", "KVC Torhout"]);
        assert_eq!(store.suggest_opponents("k", 2), vec!["KV Tielt", "SK Roeselare"]);
        assert!(store.suggest_opponents("  ", 5).is_empty());
    }

    #[test]
    fn test_sponsors_deduplicated() {
        let store = loaded_store();
        let names: Vec<&str> = store.sponsors().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["bakker", "slager"]);
    }

    #[test]
    fn test_partitions() {
        let store = loaded_store();
        assert_eq!(store.next_match().unwrap().opponent, "FC Gullegem");
        assert_eq!(store.upcoming(1).len(), 1);
        assert_eq!(store.timeline().len(), 3);

        let recent: Vec<u32> = store.recent_results(2).iter().map(|m| m.date.date.day()).collect();
        assert_eq!(recent, vec![17, 10]);
    }

    #[test]
    fn test_form_falls_back_to_results() {
        let mut store = loaded_store();
        assert_eq!(
            store.form(5),
            vec![MatchResult::Loss, MatchResult::Draw, MatchResult::Win]
        );

        let mut extraction = store.extraction().unwrap().clone();
        extraction.form = vec![MatchResult::Win, MatchResult::Win];
        store.replace(extraction);
        assert_eq!(store.form(5), vec![MatchResult::Win, MatchResult::Win]);
    }

    #[test]
    fn test_clear() {
        let mut store = loaded_store();
        store.clear();
        assert!(!store.is_loaded());
    }
}
