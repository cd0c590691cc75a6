//! Streak engine and the persisted streak record.
//!
//! [`compute`] is pure: it reads no clock and depends only on the dates it is
//! given. Weekly schedules are ignored; a streak is a run of consecutive
//! calendar days.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

/// Number of most recent check-in dates fed into [`compute`].
pub const STREAK_WINDOW: usize = 400;

/// Result of one streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
    pub current: u32,
    pub longest: u32,
    pub last_date: Option<NaiveDate>,
}

/// Derive the streak from check-in dates sorted newest first.
///
/// The current streak is the run of one-day steps starting at the newest
/// date. The longest streak never drops below `previous_longest`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use habit_buddy::domain::streak::compute;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date");
/// let outcome = compute(&[day(3), day(2), day(1)], 0);
/// assert_eq!((outcome.current, outcome.longest), (3, 3));
/// assert_eq!(outcome.last_date, Some(day(3)));
/// ```
#[must_use]
pub fn compute(dates_desc: &[NaiveDate], previous_longest: u32) -> StreakOutcome {
    let Some(&last_date) = dates_desc.first() else {
        return StreakOutcome {
            current: 0,
            longest: previous_longest,
            last_date: None,
        };
    };

    let steps = dates_desc
        .windows(2)
        .take_while(|pair| is_previous_day(pair[1], pair[0]))
        .count();
    let current = u32::try_from(steps.saturating_add(1)).unwrap_or(u32::MAX);

    StreakOutcome {
        current,
        longest: previous_longest.max(current),
        last_date: Some(last_date),
    }
}

fn is_previous_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    later.checked_sub_days(Days::new(1)) == Some(earlier)
}

/// Persisted streak materialisation for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakRecord {
    pub habit_id: Uuid,
    pub current: u32,
    pub longest: u32,
    pub last_checkin_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// Zeroed record for a habit without check-ins.
    #[must_use]
    pub const fn empty(habit_id: Uuid) -> Self {
        Self {
            habit_id,
            current: 0,
            longest: 0,
            last_checkin_date: None,
        }
    }

    /// Whether the longest streak covers the current one.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.longest >= self.current
    }
}
