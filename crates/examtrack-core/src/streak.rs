//! Daily practice streak state machine.
//!
//! A pure function of (last practice date, today) over calendar days —
//! year/month/day comparison, not elapsed 24-hour windows. It runs on every
//! completed-attempt save; repeated submissions within one day collapse into
//! a no-op.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a completed attempt moves the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakTransition {
    /// Already practiced today; streak and last-practice date unchanged.
    NoOp,
    /// Practiced yesterday too; streak grows by one.
    Increment { today: NaiveDate },
    /// First practice ever, or at least one day was skipped; streak restarts
    /// at one.
    Reset { today: NaiveDate },
}

/// Decide the streak transition for a submission dated `today`.
pub fn advance(last_practice: Option<NaiveDate>, today: NaiveDate) -> StreakTransition {
    match last_practice {
        None => StreakTransition::Reset { today },
        Some(last) if last == today => StreakTransition::NoOp,
        Some(last) if last.succ_opt() == Some(today) => StreakTransition::Increment { today },
        // Gap of a day or more, or a clock that went backwards.
        Some(_) => StreakTransition::Reset { today },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_history_resets_to_one() {
        let today = date(2025, 6, 10);
        assert_eq!(advance(None, today), StreakTransition::Reset { today });
    }

    #[test]
    fn same_day_is_a_noop() {
        let today = date(2025, 6, 10);
        assert_eq!(advance(Some(today), today), StreakTransition::NoOp);
    }

    #[test]
    fn consecutive_day_increments() {
        let today = date(2025, 6, 11);
        assert_eq!(
            advance(Some(date(2025, 6, 10)), today),
            StreakTransition::Increment { today }
        );
    }

    #[test]
    fn gap_resets() {
        let today = date(2025, 6, 13);
        assert_eq!(
            advance(Some(date(2025, 6, 10)), today),
            StreakTransition::Reset { today }
        );
    }

    #[test]
    fn month_boundary_is_consecutive() {
        let today = date(2025, 2, 1);
        assert_eq!(
            advance(Some(date(2025, 1, 31)), today),
            StreakTransition::Increment { today }
        );
    }

    #[test]
    fn year_boundary_is_consecutive() {
        let today = date(2026, 1, 1);
        assert_eq!(
            advance(Some(date(2025, 12, 31)), today),
            StreakTransition::Increment { today }
        );
    }

    #[test]
    fn leap_day_is_consecutive() {
        let today = date(2024, 2, 29);
        assert_eq!(
            advance(Some(date(2024, 2, 28)), today),
            StreakTransition::Increment { today }
        );
    }

    #[test]
    fn backwards_clock_resets() {
        let today = date(2025, 6, 9);
        assert_eq!(
            advance(Some(date(2025, 6, 10)), today),
            StreakTransition::Reset { today }
        );
    }
}
