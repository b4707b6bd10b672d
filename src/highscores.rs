//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 scores with arcade-style
//! 1-3 character names.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Maximum name length (arcade convention)
pub const MAX_NAME_LEN: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// 1-3 character player tag
    pub name: String,
    /// Player's score
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

/// Normalize a submitted name to the 1-3 uppercase characters the board
/// stores; empty input becomes "???"
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_NAME_LEN)
        .collect::<String>()
        .to_ascii_uppercase();
    if cleaned.is_empty() {
        "???".to_string()
    } else {
        cleaned
    }
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_runner_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    ///
    /// Corrupt or absent data yields an empty board, never an error.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => {
                        log::warn!("Discarding corrupt leaderboard: {e}");
                        return Self::new();
                    }
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> HighScores {
        let mut board = HighScores::new();
        // Scores 100, 90, ..., 10
        for i in 0..10u64 {
            board.add_score("AAA", 100 - i * 10);
        }
        board
    }

    #[test]
    fn test_insert_into_full_board_at_rank() {
        let mut board = full_board();
        let rank = board.add_score("BOB", 50);
        // 100..50 sit above (ties rank first), so the new 50 lands at rank 7
        assert_eq!(rank, Some(7));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries[6].name, "BOB");
        assert_eq!(board.entries[6].score, 50);
        // The previous lowest (10) fell off
        assert_eq!(board.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_score_below_full_board_does_not_qualify() {
        let mut board = full_board();
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score("LOW", 10), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_anything_qualifies_on_partial_board() {
        let mut board = HighScores::new();
        assert!(board.qualifies(1));
        assert!(!board.qualifies(0));
        assert_eq!(board.add_score("ONE", 1), Some(1));
        assert_eq!(board.top_score(), Some(1));
    }

    #[test]
    fn test_potential_rank_matches_insertion() {
        let mut board = full_board();
        assert_eq!(board.potential_rank(50), Some(7));
        assert_eq!(board.potential_rank(5), None);
        assert_eq!(board.add_score("X", 50), Some(7));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("bob"), "BOB");
        assert_eq!(sanitize_name("  a b c d "), "ABC");
        assert_eq!(sanitize_name("x"), "X");
        assert_eq!(sanitize_name(""), "???");
        assert_eq!(sanitize_name("!!!"), "???");
        assert_eq!(sanitize_name("a1!b2"), "A1B");
    }

    #[test]
    fn test_corrupt_json_falls_back_to_empty() {
        // The load() path swallows parse failures; assert the parse really
        // fails on garbage so that fallback is exercised
        let parsed = serde_json::from_str::<HighScores>("{not json");
        assert!(parsed.is_err());
        let parsed = serde_json::from_str::<HighScores>(r#"{"entries": "nope"}"#);
        assert!(parsed.is_err());
    }
}
