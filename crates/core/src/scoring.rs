//! Scoring module - classic line-clear scoring and level pacing
//!
//! - Points per lock use the fixed table `[0, 40, 100, 300, 1200]` times the level
//!   in force before the lock.
//! - Level is `lines / 10 + 1`.
//! - Gravity interval shrinks by 50ms per level, floored at 100ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Result of applying the scoring policy to one lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this lock
    pub points: u32,
    /// Total lines after this lock
    pub lines: u32,
    /// Level after this lock
    pub level: u32,
    /// Gravity interval for the new level
    pub drop_interval_ms: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared in one lock (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Level for a running line total
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS.saturating_sub(step).max(DROP_INTERVAL_MIN_MS)
}

/// Apply the whole policy for one lock event
pub fn calculate_score(lines_cleared: usize, level: u32, total_lines: u32) -> ScoreResult {
    let points = calculate_line_score(lines_cleared, level);
    let lines = total_lines.saturating_add(lines_cleared as u32);
    let level = calculate_level(lines);

    ScoreResult {
        points,
        lines,
        level,
        drop_interval_ms: get_drop_interval_ms(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 1
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 5);
        assert_eq!(calculate_line_score(4, 5), 1200 * 5);

        // More than four in one lock is not reachable with tetrominoes
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(2), 950);
        assert_eq!(get_drop_interval_ms(10), 550);
        assert_eq!(get_drop_interval_ms(19), 100);
        assert_eq!(get_drop_interval_ms(50), 100); // Floor at 100
        assert_eq!(get_drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_score_uses_level_before_lock() {
        // 9 lines at level 1, then a tetris: scored at level 1, lands on level 2
        let result = calculate_score(4, 1, 9);
        assert_eq!(result.points, 1200);
        assert_eq!(result.lines, 13);
        assert_eq!(result.level, 2);
        assert_eq!(result.drop_interval_ms, 950);
    }

    #[test]
    fn test_no_clear_keeps_progress() {
        let result = calculate_score(0, 3, 25);
        assert_eq!(result.points, 0);
        assert_eq!(result.lines, 25);
        assert_eq!(result.level, 3);
        assert_eq!(result.drop_interval_ms, 900);
    }
}
