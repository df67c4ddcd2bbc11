//! High score leaderboard
//!
//! Endless-mode totals, top 10, stored as one score per line.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard, highest first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from any list of scores, keeping the top ten
    pub fn from_scores(scores: impl IntoIterator<Item = u64>) -> Self {
        let mut entries: Vec<u64> = scores.into_iter().collect();
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|&e| score > e).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Merge a score into the leaderboard
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, score);

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
        self.entries.first().copied()
    }

    /// Parse the file form: the digits of each line make one score, lines
    /// without digits are skipped
    pub fn parse(text: &str) -> Self {
        Self::from_scores(text.lines().filter_map(|line| {
            let digits: String = line.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return None;
            }
            match digits.parse() {
                Ok(score) => Some(score),
                Err(_) => {
                    log::warn!("Skipping out-of-range high score {:?}", line);
                    None
                }
            }
        }))
    }

    /// File form: one score per line
    pub fn to_text(&self) -> String {
        self.entries.iter().map(|s| format!("{s}\n")).collect()
    }

    /// Load high scores from a file, starting fresh if there is none
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let scores = Self::parse(&text);
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("No high scores at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save high scores to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_descending_order() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(10), Some(1));
        assert_eq!(hs.add_score(30), Some(1));
        assert_eq!(hs.add_score(20), Some(2));
        assert_eq!(hs.entries(), &[30, 20, 10]);
        assert_eq!(hs.top_score(), Some(30));
    }

    #[test]
    fn test_zero_scores_count() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(0), Some(1));
        assert_eq!(hs.entries(), &[0]);
    }

    #[test]
    fn test_truncates_to_ten() {
        let mut hs = HighScores::from_scores(1..=10);
        assert_eq!(hs.entries().len(), 10);
        assert!(!hs.qualifies(1));
        assert_eq!(hs.add_score(1), None);
        assert_eq!(hs.add_score(5), Some(7));
        assert_eq!(hs.entries().len(), 10);
        assert_eq!(hs.entries().last(), Some(&2));
    }

    #[test]
    fn test_parse_keeps_digits_only() {
        let hs = HighScores::parse("12\n  7 pts\n\nabc\n40\n");
        assert_eq!(hs.entries(), &[40, 12, 7]);
    }

    #[test]
    fn test_parse_skips_overflowing_score() {
        let hs = HighScores::parse("99999999999999999999999\n15\n");
        assert_eq!(hs.entries(), &[15]);
    }

    #[test]
    fn test_text_form() {
        let hs = HighScores::from_scores([3, 9]);
        assert_eq!(hs.to_text(), "9\n3\n");
        assert_eq!(HighScores::parse(&hs.to_text()), hs);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "brick_breaker_scores_{}",
            std::process::id()
        ));
        let hs = HighScores::from_scores([50, 5, 25]);
        hs.save(&path).unwrap();
        assert_eq!(HighScores::load(&path).unwrap(), hs);
        let _ = std::fs::remove_file(&path);
        assert!(HighScores::load(&path).unwrap().is_empty());
    }
}
