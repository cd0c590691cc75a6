//! Driving port for habit, streak and check-in reads.

use async_trait::async_trait;

use crate::domain::{CheckIn, Error, Habit, StreakRecord, UserId};

use super::OwnedHabitRequest;

/// Check-ins returned when the caller does not ask for a limit.
pub const DEFAULT_CHECKIN_LIMIT: usize = 50;

/// Request for a habit's most recent check-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCheckInsRequest {
    pub owner: UserId,
    pub habit_id: uuid::Uuid,
    /// Requested page size; clamped to the streak window.
    pub limit: Option<usize>,
}

/// Driving port for habit read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitQuery: Send + Sync {
    /// The owner's habits, newest first.
    async fn list_habits(&self, owner: UserId) -> Result<Vec<Habit>, Error>;

    /// A single owned habit.
    async fn get_habit(&self, request: OwnedHabitRequest) -> Result<Habit, Error>;

    /// The habit's streak record, created or repaired on demand.
    async fn get_streak(&self, request: OwnedHabitRequest) -> Result<StreakRecord, Error>;

    /// Recent check-ins, newest date first.
    async fn list_checkins(&self, request: ListCheckInsRequest) -> Result<Vec<CheckIn>, Error>;
}

/// Fixture query implementation: the owner has no habits.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitQuery;

#[async_trait]
impl HabitQuery for FixtureHabitQuery {
    async fn list_habits(&self, _owner: UserId) -> Result<Vec<Habit>, Error> {
        Ok(Vec::new())
    }

    async fn get_habit(&self, _request: OwnedHabitRequest) -> Result<Habit, Error> {
        Err(Error::not_found("habit not found"))
    }

    async fn get_streak(&self, _request: OwnedHabitRequest) -> Result<StreakRecord, Error> {
        Err(Error::not_found("habit not found"))
    }

    async fn list_checkins(&self, _request: ListCheckInsRequest) -> Result<Vec<CheckIn>, Error> {
        Err(Error::not_found("habit not found"))
    }
}
