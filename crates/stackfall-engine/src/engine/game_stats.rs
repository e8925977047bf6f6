use std::time::Duration;

use serde::Serialize;

/// Base score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Counts past the end of the table score nothing.
const LINE_POINTS: [usize; 5] = [0, 100, 300, 500, 800];

const LINES_PER_LEVEL: usize = 10;

const INITIAL_DROP_MILLIS: u64 = 1000;
const DROP_MILLIS_PER_LEVEL: u64 = 100;
const MIN_DROP_MILLIS: u64 = 150;

/// Returns the points for clearing `lines` rows at once on `level`.
///
/// # Example
///
/// ```
/// use stackfall_engine::line_clear_points;
///
/// assert_eq!(line_clear_points(2, 1), 300);
/// assert_eq!(line_clear_points(2, 3), 900);
/// assert_eq!(line_clear_points(5, 1), 0);
/// ```
#[must_use]
pub fn line_clear_points(lines: usize, level: usize) -> usize {
    LINE_POINTS.get(lines).copied().unwrap_or(0) * level
}

/// Returns the gravity interval for `level`: 1000 ms minus 100 ms per level
/// above the first, never below 150 ms.
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = INITIAL_DROP_MILLIS
        .saturating_sub(steps.saturating_mul(DROP_MILLIS_PER_LEVEL))
        .max(MIN_DROP_MILLIS);
    Duration::from_millis(millis)
}

/// Game statistics tracking score, lines, level and piece count.
///
/// - **Score**: line clear points (scaled by level) plus drop bonuses
/// - **Level**: `total_cleared_lines / 10 + 1`
/// - **Drop interval**: derived from the level, see [`drop_interval`]
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 rows
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    total_cleared_lines: usize,
    level: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a fresh tracker: score 0, no lines, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            total_cleared_lines: 0,
            level: 1,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces locked onto the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by simultaneous clear count.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]` to `[4]`: singles, doubles, triples and tetrises
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval(self.level)
    }

    /// Adds soft/hard drop bonus points.
    pub const fn add_drop_points(&mut self, points: usize) {
        self.score += points;
    }

    /// Records a locked piece that cleared `cleared_lines` rows.
    ///
    /// Awards the line clear points at the level in effect before the clear,
    /// then recomputes the level. Returns the new level if it changed.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> Option<usize> {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        if cleared_lines == 0 {
            return None;
        }

        self.total_cleared_lines += cleared_lines;
        self.score += line_clear_points(cleared_lines, self.level);

        let level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        if level == self.level {
            return None;
        }
        self.level = level;
        Some(level)
    }
}
