//! Check-in records: one per habit per calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors raised while building a [`NewCheckIn`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInValidationError {
    #[error("check-in value must be zero or greater")]
    NegativeValue,
}

/// A check-in that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckIn {
    id: Uuid,
    habit_id: Uuid,
    user_id: UserId,
    checkin_date: NaiveDate,
    value: Option<i32>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewCheckIn {
    /// Build a pending check-in, rejecting negative values.
    pub fn new(
        id: Uuid,
        habit_id: Uuid,
        user_id: UserId,
        checkin_date: NaiveDate,
        value: Option<i32>,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CheckInValidationError> {
        if value.is_some_and(|v| v < 0) {
            return Err(CheckInValidationError::NegativeValue);
        }
        Ok(Self {
            id,
            habit_id,
            user_id,
            checkin_date,
            value,
            note,
            created_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn habit_id(&self) -> Uuid {
        self.habit_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn checkin_date(&self) -> NaiveDate {
        self.checkin_date
    }

    pub fn value(&self) -> Option<i32> {
        self.value
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A stored check-in. Never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: UserId,
    pub checkin_date: NaiveDate,
    pub value: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NewCheckIn> for CheckIn {
    fn from(value: NewCheckIn) -> Self {
        Self {
            id: value.id,
            habit_id: value.habit_id,
            user_id: value.user_id,
            checkin_date: value.checkin_date,
            value: value.value,
            note: value.note,
            created_at: value.created_at,
        }
    }
}
