//! High score leaderboard system
//!
//! One best score per player name (case-insensitive), top 10 kept, persisted
//! as a bare JSON array of `{name, score}` objects.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KvStore};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Number of rows shown on the game-over screen
pub const DISPLAY_ROWS: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name as last submitted (trimmed, case preserved)
    pub name: String,
    /// Best score for this name
    pub score: u32,
}

/// One display row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based rank
    pub rank: usize,
    pub name: String,
    pub score: u32,
    /// This row belongs to the most recent submitter
    pub highlighted: bool,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Storage key for the entry list
    pub const STORAGE_KEY: &'static str = "leaderboard";
    /// Storage key for the last submitted player name (plain string)
    pub const LAST_PLAYER_KEY: &'static str = "lastPlayerName";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a score for `name`.
    ///
    /// Blank names are ignored. An existing entry (case-insensitive match) is
    /// only replaced by a strictly higher score, which also adopts the new
    /// spelling of the name. The list is re-sorted descending and truncated.
    /// Returns true when the list changed.
    pub fn add_score(&mut self, name: &str, score: u32) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let key = name.to_lowercase();
        let changed = match self
            .entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == key)
        {
            Some(entry) => {
                if score > entry.score {
                    entry.score = score;
                    entry.name = name.to_string();
                    true
                } else {
                    false
                }
            }
            None => {
                self.entries.push(LeaderboardEntry {
                    name: name.to_string(),
                    score,
                });
                true
            }
        };

        // Stable sort keeps earlier entries ahead on ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        changed
    }

    /// Top `n` rows, highlighting entries that match `last_player` (case-insensitive)
    pub fn top(&self, n: usize, last_player: Option<&str>) -> Vec<LeaderboardRow> {
        let last = last_player.map(str::to_lowercase);
        self.entries
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, e)| LeaderboardRow {
                rank: i + 1,
                name: e.name.clone(),
                score: e.score,
                highlighted: last.as_deref() == Some(e.name.to_lowercase().as_str()),
            })
            .collect()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score recorded for `name` (case-insensitive)
    pub fn best_for(&self, name: &str) -> Option<u32> {
        let key = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name.to_lowercase() == key)
            .map(|e| e.score)
    }

    /// Load the leaderboard; any failure yields an empty board
    pub fn load(store: &dyn KvStore) -> Self {
        let mut scores: Self = persistence::load_or_default(store, Self::STORAGE_KEY);
        let stored = scores.entries.len();
        scores.normalize();
        if scores.entries.len() != stored {
            log::warn!(
                "Dropped {} invalid or duplicate high score entries",
                stored - scores.entries.len()
            );
        }
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    /// Restore the board invariants on data that did not come from `add_score`:
    /// trimmed non-blank names, descending order, one entry per name (the
    /// best), at most `MAX_HIGH_SCORES` entries.
    fn normalize(&mut self) {
        for entry in &mut self.entries {
            entry.name = entry.name.trim().to_string();
        }
        self.entries.retain(|e| !e.name.is_empty());
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));

        let mut seen = HashSet::new();
        self.entries.retain(|e| seen.insert(e.name.to_lowercase()));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Save the leaderboard; failures are logged and ignored
    pub fn save(&self, store: &mut dyn KvStore) {
        if persistence::save_or_log(store, Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }

    /// Read the last submitted player name
    pub fn load_last_player(store: &dyn KvStore) -> Option<String> {
        match store.get(Self::LAST_PLAYER_KEY) {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                log::warn!("Ignoring stored {}: {}", Self::LAST_PLAYER_KEY, e);
                None
            }
        }
    }

    /// Remember the last submitted player name
    pub fn save_last_player(store: &mut dyn KvStore, name: &str) {
        if let Err(e) = store.set(Self::LAST_PLAYER_KEY, name) {
            log::warn!("Failed to save {}: {}", Self::LAST_PLAYER_KEY, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_case_insensitive_identity_keeps_higher() {
        let mut board = Leaderboard::new();
        assert!(board.add_score("Alice", 10));
        assert!(!board.add_score("alice", 5));
        assert_eq!(
            board.entries,
            vec![LeaderboardEntry {
                name: "Alice".into(),
                score: 10
            }]
        );
    }

    #[test]
    fn test_higher_score_adopts_new_spelling() {
        let mut board = Leaderboard::new();
        board.add_score("alice", 3);
        board.add_score("  ALICE ", 8);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].name, "ALICE");
        assert_eq!(board.entries[0].score, 8);
    }

    #[test]
    fn test_equal_score_keeps_old_spelling() {
        let mut board = Leaderboard::new();
        board.add_score("alice", 3);
        assert!(!board.add_score("Alice", 3));
        assert_eq!(board.entries[0].name, "alice");
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let mut board = Leaderboard::new();
        assert!(!board.add_score("", 5));
        assert!(!board.add_score("   ", 5));
        assert!(board.is_empty());
    }

    #[test]
    fn test_keeps_top_ten_descending() {
        let mut board = Leaderboard::new();
        for i in 0..11u32 {
            board.add_score(&format!("p{i}"), 100 - i);
        }
        assert_eq!(board.entries.len(), 10);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, (91..=100).rev().collect::<Vec<_>>());
        assert!(board.best_for("p10").is_none());
    }

    #[test]
    fn test_low_newcomer_on_full_board_is_dropped() {
        let mut board = Leaderboard::new();
        for i in 0..10u32 {
            board.add_score(&format!("p{i}"), 50 + i);
        }
        board.add_score("late", 1);
        assert_eq!(board.entries.len(), 10);
        assert!(board.best_for("late").is_none());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.add_score("first", 5);
        board.add_score("second", 5);
        board.add_score("third", 7);
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_top_rows_with_highlight() {
        let mut board = Leaderboard::new();
        for (name, score) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5), ("f", 6)] {
            board.add_score(name, score);
        }
        let rows = board.top(DISPLAY_ROWS, Some("E"));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].name, "f");
        assert_eq!(rows[4].rank, 5);
        assert_eq!(rows[4].name, "b");
        let highlighted: Vec<&str> = rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(highlighted, vec!["e"]);

        assert!(board.top(DISPLAY_ROWS, None).iter().all(|r| !r.highlighted));
    }

    #[test]
    fn test_persisted_format_is_bare_array() {
        let mut store = MemoryStore::new();
        let mut board = Leaderboard::new();
        board.add_score("Ann", 4);
        board.save(&mut store);
        assert_eq!(
            store.get(Leaderboard::STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"Ann","score":4}]"#)
        );
        assert_eq!(Leaderboard::load(&store), board);
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(Leaderboard::STORAGE_KEY, "{\"oops\"").unwrap();
        assert!(Leaderboard::load(&store).is_empty());
    }

    #[test]
    fn test_load_repairs_hand_edited_board() {
        let mut store = MemoryStore::new();
        let mut entries: Vec<String> = (1..=12)
            .map(|i| format!(r#"{{"name":"p{i}","score":{i}}}"#))
            .collect();
        entries.push(r#"{"name":"  ","score":99}"#.to_string());
        entries.push(r#"{"name":"P12","score":3}"#.to_string());
        entries.push(r#"{"name":" zed ","score":40}"#.to_string());
        entries.push(r#"{"name":"ZED","score":50}"#.to_string());
        store
            .set(Leaderboard::STORAGE_KEY, &format!("[{}]", entries.join(",")))
            .unwrap();

        let board = Leaderboard::load(&store);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries[0].name, "ZED");
        assert_eq!(board.entries[0].score, 50);
        assert_eq!(board.entries[1].name, "p12");
        assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        for name in ["zed", "p12"] {
            let copies = board
                .entries
                .iter()
                .filter(|e| e.name.eq_ignore_ascii_case(name))
                .count();
            assert_eq!(copies, 1, "{name}");
        }
        assert!(board.entries.iter().all(|e| !e.name.trim().is_empty()));
        assert_eq!(board.entries.last().map(|e| e.score), Some(4));
    }

    #[test]
    fn test_last_player_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(Leaderboard::load_last_player(&store), None);
        Leaderboard::save_last_player(&mut store, "Ann");
        assert_eq!(Leaderboard::load_last_player(&store).as_deref(), Some("Ann"));
    }

    proptest! {
        #[test]
        fn prop_board_sorted_bounded_unique(
            ops in proptest::collection::vec(("[a-dA-D]{1,2}", 0u32..50), 0..60)
        ) {
            let mut board = Leaderboard::new();
            for (name, score) in &ops {
                board.add_score(name, *score);
            }
            prop_assert!(board.entries.len() <= MAX_HIGH_SCORES);
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
            let mut keys: Vec<String> = board.entries.iter().map(|e| e.name.to_lowercase()).collect();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), board.entries.len());
        }
    }
}
