//! Habit domain service.
//!
//! Implements both driving ports. Check-ins go through the store first and
//! the streak record is refreshed afterwards as a separate step.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    CheckInRepository, CheckInRepositoryError, CreateHabitRequest, DEFAULT_CHECKIN_LIMIT,
    HabitCommand, HabitQuery, HabitRepository, HabitRepositoryError, ListCheckInsRequest,
    OwnedHabitRequest, RecordCheckInRequest, StreakRepository, UpdateHabitRequest,
};
use crate::domain::streak::STREAK_WINDOW;
use crate::domain::streak_manager::{StreakRecordManager, map_checkin_error};
use crate::domain::{CheckIn, Error, Habit, NewCheckIn, StreakRecord, UserId};

fn map_habit_error(error: HabitRepositoryError) -> Error {
    match error {
        HabitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("habit repository unavailable: {message}"))
        }
        HabitRepositoryError::Query { message } => {
            Error::internal(format!("habit repository error: {message}"))
        }
    }
}

fn habit_not_found() -> Error {
    Error::not_found("habit not found")
}

/// Habit service implementing [`HabitCommand`] and [`HabitQuery`].
pub struct HabitService<H, C, S> {
    habit_repo: Arc<H>,
    checkin_repo: Arc<C>,
    streaks: StreakRecordManager<S>,
    clock: Arc<dyn Clock>,
}

impl<H, C, S> HabitService<H, C, S> {
    /// Create a service over the three repositories.
    pub fn new(
        habit_repo: Arc<H>,
        checkin_repo: Arc<C>,
        streak_repo: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            streaks: StreakRecordManager::new(streak_repo),
            habit_repo,
            checkin_repo,
            clock,
        }
    }
}

impl<H, C, S> HabitService<H, C, S>
where
    H: HabitRepository,
    C: CheckInRepository,
    S: StreakRepository,
{
    async fn require_owned(&self, habit_id: &Uuid, owner: &UserId) -> Result<Habit, Error> {
        self.habit_repo
            .find_owned(habit_id, owner)
            .await
            .map_err(map_habit_error)?
            .ok_or_else(habit_not_found)
    }
}

#[async_trait]
impl<H, C, S> HabitCommand for HabitService<H, C, S>
where
    H: HabitRepository,
    C: CheckInRepository,
    S: StreakRepository,
{
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error> {
        let draft = request.into_draft(Uuid::new_v4(), self.clock.utc());
        let habit = Habit::new(draft).map_err(|err| {
            Error::invalid_request(format!("invalid habit: {err}"))
                .with_details(json!({ "code": "invalid_habit" }))
        })?;

        self.habit_repo
            .create_with_streak(&habit)
            .await
            .map_err(map_habit_error)?;
        Ok(habit)
    }

    async fn update_habit(&self, request: UpdateHabitRequest) -> Result<Habit, Error> {
        let UpdateHabitRequest {
            owner,
            habit_id,
            patch,
        } = request;
        let existing = self.require_owned(&habit_id, &owner).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = existing
            .apply_patch(patch, self.clock.utc())
            .map_err(|err| {
                Error::invalid_request(format!("invalid habit: {err}"))
                    .with_details(json!({ "code": "invalid_habit" }))
            })?;
        self.habit_repo
            .update(&updated)
            .await
            .map_err(map_habit_error)?;
        Ok(updated)
    }

    async fn delete_habit(&self, request: OwnedHabitRequest) -> Result<(), Error> {
        let deleted = self
            .habit_repo
            .delete_owned(&request.habit_id, &request.owner)
            .await
            .map_err(map_habit_error)?;
        if deleted {
            Ok(())
        } else {
            Err(habit_not_found())
        }
    }

    async fn record_checkin(&self, request: RecordCheckInRequest) -> Result<CheckIn, Error> {
        let habit = self.require_owned(&request.habit_id, &request.owner).await?;
        let pending = NewCheckIn::new(
            Uuid::new_v4(),
            habit.id(),
            request.owner,
            request.checkin_date,
            request.value,
            request.note,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(format!("invalid check-in: {err}")))?;

        let checkin = match self.checkin_repo.record(&pending).await {
            Ok(checkin) => checkin,
            Err(CheckInRepositoryError::Duplicate {
                habit_id,
                checkin_date,
            }) => {
                debug!(%habit_id, %checkin_date, "duplicate check-in rejected");
                return Err(Error::conflict("Already checked in for this date")
                    .with_details(json!({ "checkinDate": checkin_date })));
            }
            Err(CheckInRepositoryError::HabitMissing { habit_id }) => {
                debug!(%habit_id, "habit deleted before check-in was stored");
                return Err(habit_not_found());
            }
            Err(other) => return Err(map_checkin_error(other)),
        };

        self.streaks.refresh(&checkin.habit_id).await?;
        Ok(checkin)
    }
}

#[async_trait]
impl<H, C, S> HabitQuery for HabitService<H, C, S>
where
    H: HabitRepository,
    C: CheckInRepository,
    S: StreakRepository,
{
    async fn list_habits(&self, owner: UserId) -> Result<Vec<Habit>, Error> {
        self.habit_repo
            .list_for_owner(&owner)
            .await
            .map_err(map_habit_error)
    }

    async fn get_habit(&self, request: OwnedHabitRequest) -> Result<Habit, Error> {
        self.require_owned(&request.habit_id, &request.owner).await
    }

    async fn get_streak(&self, request: OwnedHabitRequest) -> Result<StreakRecord, Error> {
        let habit = self.require_owned(&request.habit_id, &request.owner).await?;
        self.streaks.current(&habit.id()).await
    }

    async fn list_checkins(&self, request: ListCheckInsRequest) -> Result<Vec<CheckIn>, Error> {
        let habit = self.require_owned(&request.habit_id, &request.owner).await?;
        let limit = request
            .limit
            .unwrap_or(DEFAULT_CHECKIN_LIMIT)
            .clamp(1, STREAK_WINDOW);
        self.checkin_repo
            .list_recent(&habit.id(), limit)
            .await
            .map_err(map_checkin_error)
    }
}

#[cfg(test)]
#[path = "habit_service_tests.rs"]
mod tests;
