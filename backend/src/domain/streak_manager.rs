//! Keeps the persisted streak record in step with the check-in store.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{CheckInRepositoryError, StreakRepository, StreakRepositoryError};
use crate::domain::streak::{STREAK_WINDOW, StreakRecord};

pub(crate) fn map_checkin_error(error: CheckInRepositoryError) -> Error {
    match error {
        CheckInRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("check-in repository unavailable: {message}"))
        }
        CheckInRepositoryError::Query { message } => {
            Error::internal(format!("check-in repository error: {message}"))
        }
        CheckInRepositoryError::HabitMissing { habit_id } => {
            Error::internal(format!("check-in target habit {habit_id} vanished"))
        }
        CheckInRepositoryError::Duplicate {
            habit_id,
            checkin_date,
        } => Error::internal(format!(
            "unexpected duplicate check-in for habit {habit_id} on {checkin_date}"
        )),
    }
}

fn map_streak_error(error: StreakRepositoryError) -> Error {
    match error {
        StreakRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("streak repository unavailable: {message}"))
        }
        StreakRepositoryError::Query { message } => {
            Error::internal(format!("streak repository error: {message}"))
        }
    }
}

/// Recomputes and repairs streak records.
pub struct StreakRecordManager<S> {
    streak_repo: Arc<S>,
}

// Derived `Clone` would demand `S: Clone`.
impl<S> Clone for StreakRecordManager<S> {
    fn clone(&self) -> Self {
        Self {
            streak_repo: Arc::clone(&self.streak_repo),
        }
    }
}

impl<S> StreakRecordManager<S> {
    pub fn new(streak_repo: Arc<S>) -> Self {
        Self { streak_repo }
    }
}

impl<S> StreakRecordManager<S>
where
    S: StreakRepository,
{
    /// Recompute the streak from the recent check-in window and store it.
    ///
    /// Running this twice without a check-in in between stores the same
    /// record.
    pub async fn refresh(&self, habit_id: &Uuid) -> Result<StreakRecord, Error> {
        self.streak_repo
            .refresh(habit_id, STREAK_WINDOW)
            .await
            .map_err(map_streak_error)
    }

    /// Read the stored record, recomputing it when missing or inconsistent.
    pub async fn current(&self, habit_id: &Uuid) -> Result<StreakRecord, Error> {
        let stored = self
            .streak_repo
            .find(habit_id)
            .await
            .map_err(map_streak_error)?;

        match stored {
            Some(record) if record.is_consistent() => Ok(record),
            Some(record) => {
                warn!(
                    %habit_id,
                    current = record.current,
                    longest = record.longest,
                    "streak record has longest below current; recomputing"
                );
                self.refresh(habit_id).await
            }
            None => {
                warn!(%habit_id, "habit has no streak record; recomputing");
                self.refresh(habit_id).await
            }
        }
    }
}
