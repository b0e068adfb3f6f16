//! Scoring module - line-clear awards, combo streak and fall period
//!
//! Clearing `n` lines with one lock is worth `2^n - 1`. A lock that clears
//! exactly `shape_size` lines extends the combo streak, and the streak is added
//! to the line count before the award is computed, so back-to-back full-size
//! clears grow exponentially. Any other lock resets the streak first.

use crate::types::{BASE_PERIOD_MS, DEFAULT_SPEED_INDEX, MIN_PERIOD_MS, PERIOD_HALF_LINES, SPEED_STEPS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for this lock.
    pub awarded: u64,
    /// Combo streak after this lock.
    pub combo: u32,
}

/// `2^n - 1`, saturating at `u64::MAX`.
pub fn base_score(lines: u32) -> u64 {
    if lines >= 64 {
        u64::MAX
    } else {
        (1u64 << lines) - 1
    }
}

/// Score one lock that cleared `cleared` lines, given the streak before it.
pub fn score_lock(cleared: u32, shape_size: usize, combo: u32) -> ScoreResult {
    if cleared as usize == shape_size {
        let combo = combo.saturating_add(1);
        ScoreResult {
            awarded: base_score(cleared.saturating_add(combo)),
            combo,
        }
    } else {
        ScoreResult {
            awarded: base_score(cleared),
            combo: 0,
        }
    }
}

/// Milliseconds between gravity steps.
///
/// Halves after [`PERIOD_HALF_LINES`] lines, divides by `speed`, never drops
/// below [`MIN_PERIOD_MS`]. A speed that is not a positive number counts as
/// 1.00x.
pub fn fall_period_ms(lines: u64, speed: f64) -> u64 {
    let speed = if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        1.0
    };
    let scaled =
        (BASE_PERIOD_MS * PERIOD_HALF_LINES) as f64 / (PERIOD_HALF_LINES as f64 + lines as f64);
    let period = (scaled / speed) as u64;
    period.max(MIN_PERIOD_MS)
}

/// Multiplier for a speed step, clamped to the available steps.
pub fn speed_multiplier(index: usize) -> f64 {
    SPEED_STEPS
        .get(index)
        .or(SPEED_STEPS.last())
        .copied()
        .unwrap_or(SPEED_STEPS[DEFAULT_SPEED_INDEX])
}
