//! Driving port for habit and check-in mutations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::{CheckIn, Error, Habit, HabitDraft, HabitPatch, UserId};

/// Identifies a habit on behalf of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedHabitRequest {
    pub owner: UserId,
    pub habit_id: Uuid,
}

/// Request to create a habit. Identifier and timestamps are assigned by the
/// service.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateHabitRequest {
    pub owner: UserId,
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
}

impl CreateHabitRequest {
    /// Turn the request into a draft with the supplied id and timestamp.
    pub fn into_draft(self, id: Uuid, now: DateTime<Utc>) -> HabitDraft {
        HabitDraft {
            id,
            user_id: self.owner,
            title: self.title,
            description: self.description,
            habit_type: self.habit_type,
            target_value: self.target_value,
            unit: self.unit,
            schedule_days: self.schedule_days,
            reminder_time: self.reminder_time,
            is_public: self.is_public,
            color: self.color,
            icon: self.icon,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to partially update a habit.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHabitRequest {
    pub owner: UserId,
    pub habit_id: Uuid,
    pub patch: HabitPatch,
}

/// Request to record a check-in for a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCheckInRequest {
    pub owner: UserId,
    pub habit_id: Uuid,
    pub checkin_date: NaiveDate,
    pub value: Option<i32>,
    pub note: Option<String>,
}

/// Driving port for habit write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitCommand: Send + Sync {
    /// Create a habit and its zeroed streak record.
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error>;

    /// Apply a partial update. Missing or foreign habits yield `NotFound`.
    async fn update_habit(&self, request: UpdateHabitRequest) -> Result<Habit, Error>;

    /// Delete a habit with its check-ins and streak record.
    async fn delete_habit(&self, request: OwnedHabitRequest) -> Result<(), Error>;

    /// Record a check-in and refresh the streak.
    ///
    /// A second check-in for the same date yields `Conflict` and leaves the
    /// streak untouched.
    async fn record_checkin(&self, request: RecordCheckInRequest) -> Result<CheckIn, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creation echoes the validated habit; every other operation reports the
/// habit as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitCommand;

#[async_trait]
impl HabitCommand for FixtureHabitCommand {
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error> {
        Habit::new(request.into_draft(Uuid::new_v4(), Utc::now()))
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn update_habit(&self, _request: UpdateHabitRequest) -> Result<Habit, Error> {
        Err(Error::not_found("habit not found"))
    }

    async fn delete_habit(&self, _request: OwnedHabitRequest) -> Result<(), Error> {
        Err(Error::not_found("habit not found"))
    }

    async fn record_checkin(&self, _request: RecordCheckInRequest) -> Result<CheckIn, Error> {
        Err(Error::not_found("habit not found"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn create_request(title: &str) -> CreateHabitRequest {
        CreateHabitRequest {
            owner: UserId::random(),
            title: title.to_owned(),
            description: None,
            habit_type: Some("weekly".to_owned()),
            target_value: None,
            unit: None,
            schedule_days: Some(vec![1, 3]),
            reminder_time: None,
            is_public: true,
            color: None,
            icon: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_echoes_request() {
        let request = create_request("Stretch");
        let owner = request.owner.clone();

        let habit = FixtureHabitCommand
            .create_habit(request)
            .await
            .expect("fixture create succeeds");

        assert_eq!(habit.title(), "Stretch");
        assert_eq!(habit.habit_type(), "weekly");
        assert!(habit.is_owned_by(&owner));
        assert_eq!(habit.created_at(), habit.updated_at());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_validates() {
        let err = FixtureHabitCommand
            .create_habit(create_request(" "))
            .await
            .expect_err("blank title rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
