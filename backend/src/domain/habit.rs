//! Habit entity and its validation rules.
//!
//! A habit is owned by exactly one user. Check-ins and the streak record hang
//! off the habit id and are removed with it.

use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Type tag applied when a draft does not name one.
pub const DEFAULT_HABIT_TYPE: &str = "daily";

/// Validation errors raised while building or patching a [`Habit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitValidationError {
    #[error("habit title must not be empty")]
    EmptyTitle,
    #[error("habit type must not be empty")]
    EmptyHabitType,
    #[error("target value must be zero or greater")]
    NegativeTargetValue,
    #[error("schedule day {day} is outside 1..=7")]
    InvalidScheduleDay { day: i16 },
    #[error("schedule day {day} appears more than once")]
    DuplicateScheduleDay { day: i16 },
}

/// Input payload for [`Habit::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct HabitDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub habit_type: Option<String>,
    pub target_value: Option<i32>,
    pub unit: Option<String>,
    pub schedule_days: Option<Vec<i16>>,
    pub reminder_time: Option<NaiveTime>,
    pub is_public: bool,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for an existing habit.
///
/// `None` leaves a field unchanged. For nullable fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub habit_type: Option<String>,
    pub target_value: Option<Option<i32>>,
    pub unit: Option<Option<String>>,
    pub schedule_days: Option<Option<Vec<i16>>>,
    pub reminder_time: Option<Option<NaiveTime>>,
    pub is_public: Option<bool>,
    pub color: Option<Option<String>>,
    pub icon: Option<Option<String>>,
}

impl HabitPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A validated habit.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use habit_buddy::domain::{Habit, HabitDraft, UserId};
/// use uuid::Uuid;
///
/// let now = Utc::now();
/// let habit = Habit::new(HabitDraft {
///     id: Uuid::new_v4(),
///     user_id: UserId::random(),
///     title: "  Read  ".to_owned(),
///     description: None,
///     habit_type: None,
///     target_value: None,
///     unit: None,
///     schedule_days: Some(vec![5, 1, 3]),
///     reminder_time: None,
///     is_public: false,
///     color: None,
///     icon: None,
///     created_at: now,
///     updated_at: now,
/// })
/// .expect("valid habit");
/// assert_eq!(habit.title(), "Read");
/// assert_eq!(habit.habit_type(), "daily");
/// assert_eq!(habit.schedule_days(), Some(&[1, 3, 5][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    id: Uuid,
    user_id: UserId,
    title: String,
    description: Option<String>,
    habit_type: String,
    target_value: Option<i32>,
    unit: Option<String>,
    schedule_days: Option<Vec<i16>>,
    reminder_time: Option<NaiveTime>,
    is_public: bool,
    color: Option<String>,
    icon: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Habit {
    /// Validate a draft and normalise its title, type and schedule.
    pub fn new(draft: HabitDraft) -> Result<Self, HabitValidationError> {
        let title = normalise_title(&draft.title)?;
        let habit_type = match draft.habit_type {
            Some(raw) => normalise_habit_type(&raw)?,
            None => DEFAULT_HABIT_TYPE.to_owned(),
        };
        validate_target_value(draft.target_value)?;
        let schedule_days = draft.schedule_days.map(normalise_schedule).transpose()?;

        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            title,
            description: draft.description,
            habit_type,
            target_value: draft.target_value,
            unit: draft.unit,
            schedule_days,
            reminder_time: draft.reminder_time,
            is_public: draft.is_public,
            color: draft.color,
            icon: draft.icon,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Apply a partial update, re-running creation validation.
    ///
    /// The receiver is left untouched when validation fails.
    pub fn apply_patch(
        &self,
        patch: HabitPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, HabitValidationError> {
        let HabitPatch {
            title,
            description,
            habit_type,
            target_value,
            unit,
            schedule_days,
            reminder_time,
            is_public,
            color,
            icon,
        } = patch;

        Self::new(HabitDraft {
            id: self.id,
            user_id: self.user_id.clone(),
            title: title.unwrap_or_else(|| self.title.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            habit_type: Some(habit_type.unwrap_or_else(|| self.habit_type.clone())),
            target_value: target_value.unwrap_or(self.target_value),
            unit: unit.unwrap_or_else(|| self.unit.clone()),
            schedule_days: schedule_days.unwrap_or_else(|| self.schedule_days.clone()),
            reminder_time: reminder_time.unwrap_or(self.reminder_time),
            is_public: is_public.unwrap_or(self.is_public),
            color: color.unwrap_or_else(|| self.color.clone()),
            icon: icon.unwrap_or_else(|| self.icon.clone()),
            created_at: self.created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn habit_type(&self) -> &str {
        self.habit_type.as_str()
    }

    pub fn target_value(&self) -> Option<i32> {
        self.target_value
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Weekday numbers (1 = Monday) sorted ascending.
    pub fn schedule_days(&self) -> Option<&[i16]> {
        self.schedule_days.as_deref()
    }

    pub fn reminder_time(&self) -> Option<NaiveTime> {
        self.reminder_time
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` owns this habit.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }
}

fn normalise_title(raw: &str) -> Result<String, HabitValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HabitValidationError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalise_habit_type(raw: &str) -> Result<String, HabitValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HabitValidationError::EmptyHabitType);
    }
    Ok(trimmed.to_owned())
}

fn validate_target_value(value: Option<i32>) -> Result<(), HabitValidationError> {
    match value {
        Some(v) if v < 0 => Err(HabitValidationError::NegativeTargetValue),
        _ => Ok(()),
    }
}

fn normalise_schedule(mut days: Vec<i16>) -> Result<Vec<i16>, HabitValidationError> {
    if let Some(&day) = days.iter().find(|day| !(1..=7).contains(*day)) {
        return Err(HabitValidationError::InvalidScheduleDay { day });
    }
    days.sort_unstable();
    if let Some(pair) = days.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(HabitValidationError::DuplicateScheduleDay { day: pair[0] });
    }
    Ok(days)
}
