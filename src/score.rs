//! Score records: the persisted best score and a bounded leaderboard of
//! past runs. Pure in-memory value; the store module handles the disk.

use serde::{Deserialize, Serialize};

use crate::config::RecordPolicy;

/// One finished run on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Best score plus leaderboard entries, sorted by score descending.
/// Which of the two gets fed depends on the session's [`RecordPolicy`];
/// `best` tracks the maximum either way so the HUD can always show it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    best: u32,
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Fold one finished run into the record. Returns true when the run
    /// set a new best score.
    pub fn record(&mut self, name: &str, score: u32, policy: RecordPolicy) -> bool {
        let new_best = score > self.best;
        if let RecordPolicy::TopN(cap) = policy {
            self.entries.push(ScoreEntry {
                name: name.to_string(),
                score,
            });
            // Stable sort keeps earlier runs ahead on ties.
            self.entries.sort_by(|a, b| b.score.cmp(&a.score));
            self.entries.truncate(cap);
        }
        if new_best {
            self.best = score;
        }
        new_best
    }
}
