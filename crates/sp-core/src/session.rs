//! In-memory practice statistics for one run of the tool
//!
//! A single owner (the shell) holds the [`SessionStats`] value and mutates it
//! only through [`SessionStats::record_attempt`]. Nothing is persisted.

use serde::Serialize;

/// Running attempt counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    attempted: u32,
    correct: u32,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Attempts recorded, including queries that failed to execute
    pub attempted: u32,

    /// Attempts judged equivalent to the reference result
    pub correct: u32,

    /// `attempted - correct`
    pub incorrect: u32,

    /// `correct / attempted`, or 0.0 before the first attempt
    pub accuracy: f64,
}

impl StatsSnapshot {
    /// Accuracy scaled to 0..=100 for display
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempt; `correct` only when the outcome was equivalent
    pub fn record_attempt(&mut self, correct: bool) {
        self.attempted += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Snapshot the counters and derived accuracy
    pub fn current_stats(&self) -> StatsSnapshot {
        let accuracy = if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted)
        };

        StatsSnapshot {
            attempted: self.attempted,
            correct: self.correct,
            incorrect: self.attempted - self.correct,
            accuracy,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
