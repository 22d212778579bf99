//! Scoring module - line clear points and running totals
//!
//! A lock that clears `n` rows is worth `LINE_SCORES[n]`: 100, 300, 500 and
//! 800 for one to four rows. Anything above four pays the four-row amount.
//! There is no level multiplier and drops score nothing.

use crate::types::LINE_SCORES;

/// Points awarded for clearing `rows` rows with a single lock.
///
/// ```
/// use blockfall_core::scoring::line_clear_points;
///
/// assert_eq!(line_clear_points(0), 0);
/// assert_eq!(line_clear_points(2), 300);
/// assert_eq!(line_clear_points(4), 800);
/// ```
pub fn line_clear_points(rows: usize) -> u32 {
    LINE_SCORES[rows.min(LINE_SCORES.len() - 1)]
}

/// Running score and cleared-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    lines: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Credit a lock that cleared `rows` rows. Returns the points added.
    pub fn award(&mut self, rows: usize) -> u32 {
        let points = line_clear_points(rows);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);
        points
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
