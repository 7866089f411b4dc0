//! Scoring module - line clear points, levels and gravity speed
//!
//! Points for a clear are `LINE_SCORES[count] * level`, using the level in
//! effect when the rows were detected. The level is derived from the total
//! line count and only ever rises; each level shortens the gravity interval
//! by 10% down to a 200ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_DECAY, DROP_INTERVAL_MIN_MS, LINES_PER_LEVEL, LINE_SCORES, START_LEVEL,
};

/// Calculate line clear score
/// lines: number of rows cleared together (1-4)
/// level: current level (1-based)
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level management
/// Level increases every 10 lines cleared, starting from level 1
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Get drop interval for a level (in milliseconds)
///
/// `1000 * 0.9^(level - 1)`, rounded and clamped at the floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(START_LEVEL);
    // Past ~16 steps the floor always wins; avoid powi on huge exponents.
    if steps > 64 {
        return DROP_INTERVAL_MIN_MS;
    }
    let interval = (BASE_DROP_MS as f64 * DROP_DECAY.powi(steps as i32)).round() as u32;
    interval.max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_level_one() {
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(line_clear_points(1, 2), 200);
        assert_eq!(line_clear_points(4, 3), 2400);
        assert_eq!(line_clear_points(0, 5), 0);
        assert_eq!(line_clear_points(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(3), 810);
        assert_eq!(drop_interval_ms(4), 729);
        assert_eq!(drop_interval_ms(50), 200); // Floor at 200
        assert_eq!(drop_interval_ms(u32::MAX), 200);
    }

    #[test]
    fn test_drop_interval_strictly_decreases_until_floor() {
        let mut prev = drop_interval_ms(1);
        for level in 2..40 {
            let current = drop_interval_ms(level);
            if prev > DROP_INTERVAL_MIN_MS {
                assert!(current < prev, "level {level}: {current} >= {prev}");
            } else {
                assert_eq!(current, DROP_INTERVAL_MIN_MS);
            }
            prev = current;
        }
    }
}
