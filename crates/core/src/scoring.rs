//! Scoring module - placement points, line-clear combos and goal progress
//!
//! Rules:
//! - Placing a piece scores one point per cell it occupies.
//! - Each cleared line scores `LINE_CLEAR_POINTS`, plus a combo bonus of
//!   `(next_combo - 1) * COMBO_STEP_POINTS` per line.
//! - A turn without clears resets the next combo to `INITIAL_COMBO`, so the
//!   following clearing turn starts bonus-free.

use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{COMBO_STEP_POINTS, INITIAL_COMBO, LINE_CLEAR_POINTS};

/// Outcome of a line-clear step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClearGain {
    /// Combo streak value carried into the next turn
    pub next_combo: u32,
    /// Points earned by the clear (base + combo bonus)
    pub gained: u32,
}

/// Score a clear of `lines` lines given the current combo streak
///
/// # Examples
///
/// ```
/// use block_blast_core::calculate_clear_gain;
///
/// let gain = calculate_clear_gain(2, 1);
/// assert_eq!(gain.next_combo, 2);
/// assert_eq!(gain.gained, 66); // 50 base + 16 bonus
///
/// let miss = calculate_clear_gain(0, 4);
/// assert_eq!((miss.next_combo, miss.gained), (1, 0));
/// ```
pub fn calculate_clear_gain(lines: u32, combo: u32) -> ClearGain {
    if lines == 0 {
        return ClearGain {
            next_combo: INITIAL_COMBO,
            gained: 0,
        };
    }

    let next_combo = combo.saturating_add(1);
    let combo_bonus = (next_combo - 1)
        .saturating_mul(COMBO_STEP_POINTS)
        .saturating_mul(lines);
    let gained = lines
        .saturating_mul(LINE_CLEAR_POINTS)
        .saturating_add(combo_bonus);

    ClearGain { next_combo, gained }
}

/// Points for putting `piece` on the board
pub fn placement_score(piece: &Piece) -> u32 {
    piece.len() as u32
}

/// Position on the goal ladder
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GoalProgress {
    /// First goal above the score, or the last goal once all are reached
    pub target: u32,
    /// Greatest goal below `target`, or 0
    pub previous: u32,
    /// Fraction of the way from `previous` to `target`, in [0, 1]
    pub progress: f64,
    /// Score has reached the last goal on the ladder
    pub final_cleared: bool,
    /// Player-facing description
    pub text: String,
}

/// Locate `score` on an ascending goal ladder
///
/// # Examples
///
/// ```
/// use block_blast_core::goal_progress;
///
/// let goal = goal_progress(120, &[100, 250, 500]);
/// assert_eq!((goal.target, goal.previous), (250, 100));
/// assert!((goal.progress - 20.0 / 150.0).abs() < 1e-9);
/// assert!(goal.text.contains("130"));
/// ```
pub fn goal_progress(score: i64, goals: &[u32]) -> GoalProgress {
    let target = goals
        .iter()
        .copied()
        .find(|&goal| score < i64::from(goal))
        .or_else(|| goals.last().copied())
        .unwrap_or(0);
    let previous = goals
        .iter()
        .copied()
        .filter(|&goal| goal < target)
        .last()
        .unwrap_or(0);

    let denominator = match i64::from(target) - i64::from(previous) {
        0 => 1,
        d => d,
    };
    let progress = ((score - i64::from(previous)) as f64 / denominator as f64).clamp(0.0, 1.0);

    let final_cleared = score >= i64::from(target);
    let text = if final_cleared {
        format!("Final goal {}pt cleared! Keep pushing your score", target)
    } else {
        let remaining = (i64::from(target) - score).max(0);
        format!("Next goal: {}pt ({}pt to go)", target, remaining)
    };

    GoalProgress {
        target,
        previous,
        progress,
        final_cleared,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_GOALS;

    #[test]
    fn test_no_clear_resets_combo() {
        for combo in [0, 1, 4, 100] {
            assert_eq!(
                calculate_clear_gain(0, combo),
                ClearGain {
                    next_combo: 1,
                    gained: 0
                }
            );
        }
    }

    #[test]
    fn test_clear_from_baseline_combo() {
        // The bonus multiplier is next_combo - 1, so a clear from the baseline
        // streak value of 1 already earns one combo step.
        let gain = calculate_clear_gain(1, INITIAL_COMBO);
        assert_eq!(gain.next_combo, 2);
        assert_eq!(gain.gained, 25 + 8);

        assert_eq!(calculate_clear_gain(1, 0).gained, 25);
    }

    #[test]
    fn test_bonus_formula() {
        for lines in 1..=6u32 {
            for combo in 0..10u32 {
                let gain = calculate_clear_gain(lines, combo);
                assert_eq!(gain.next_combo, combo + 1);
                assert_eq!(gain.gained, lines * 25 + combo * 8 * lines);
            }
        }
    }

    #[test]
    fn test_clear_gain_saturates() {
        let gain = calculate_clear_gain(u32::MAX, u32::MAX);
        assert_eq!(gain.next_combo, u32::MAX);
        assert_eq!(gain.gained, u32::MAX);
    }

    #[test]
    fn test_goal_progress_spec_example() {
        let goal = goal_progress(120, &[100, 250, 500]);
        assert_eq!(goal.target, 250);
        assert_eq!(goal.previous, 100);
        assert!((goal.progress - 0.1333).abs() < 1e-3);
        assert!(goal.text.contains("130pt"));
    }

    #[test]
    fn test_goal_progress_below_first_goal() {
        let goal = goal_progress(40, &DEFAULT_GOALS);
        assert_eq!((goal.target, goal.previous), (100, 0));
        assert!((goal.progress - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_exact_threshold_moves_on() {
        let goal = goal_progress(100, &DEFAULT_GOALS);
        assert_eq!((goal.target, goal.previous), (250, 100));
        assert_eq!(goal.progress, 0.0);
    }

    #[test]
    fn test_goal_progress_past_final_goal() {
        let goal = goal_progress(5000, &DEFAULT_GOALS);
        assert_eq!((goal.target, goal.previous), (1400, 900));
        assert_eq!(goal.progress, 1.0);
        assert!(goal.text.contains("1400"));
        assert!(goal.final_cleared);
    }

    #[test]
    fn test_goal_progress_clamps_negative_score() {
        let goal = goal_progress(-50, &DEFAULT_GOALS);
        assert_eq!(goal.target, 100);
        assert_eq!(goal.progress, 0.0);
        assert!(goal.text.contains("150pt"));
    }

    #[test]
    fn test_goal_progress_degenerate_ladders() {
        // Single goal reached: target == previous candidate, denominator floored.
        let goal = goal_progress(10, &[10]);
        assert_eq!((goal.target, goal.previous), (10, 0));
        assert_eq!(goal.progress, 1.0);

        // Duplicate goals.
        let goal = goal_progress(30, &[20, 20]);
        assert_eq!((goal.target, goal.previous), (20, 0));
        assert_eq!(goal.progress, 1.0);

        let goal = goal_progress(0, &[0]);
        assert_eq!((goal.target, goal.previous), (0, 0));
        assert_eq!(goal.progress, 0.0);

        let goal = goal_progress(7, &[]);
        assert_eq!(goal.target, 0);
        assert_eq!(goal.progress, 1.0);
    }
}
