//! Port for the check-in store.
//!
//! Recording a check-in has no streak side effects. Callers refresh the
//! streak record as a separate step.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{CheckIn, NewCheckIn};

use super::define_port_error;

define_port_error! {
    /// Errors raised by check-in repository adapters.
    pub enum CheckInRepositoryError {
        /// A check-in already exists for this habit and date.
        Duplicate { habit_id: Uuid, checkin_date: NaiveDate } =>
            "habit {habit_id} already has a check-in for {checkin_date}",
        /// The habit row disappeared before the check-in was stored.
        HabitMissing { habit_id: Uuid } =>
            "habit {habit_id} no longer exists",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "check-in repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "check-in repository query failed: {message}",
    }
}

/// Port for storing check-ins and reading recent history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert a check-in.
    ///
    /// Returns [`CheckInRepositoryError::Duplicate`] when the storage
    /// uniqueness constraint on `(habit_id, checkin_date)` rejects the row,
    /// and [`CheckInRepositoryError::HabitMissing`] when the habit was deleted
    /// concurrently.
    async fn record(&self, checkin: &NewCheckIn) -> Result<CheckIn, CheckInRepositoryError>;

    /// Up to `limit` most recent check-ins, newest date first.
    async fn list_recent(
        &self,
        habit_id: &Uuid,
        limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError>;
}

/// Fixture implementation that accepts every check-in and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckInRepository;

#[async_trait]
impl CheckInRepository for FixtureCheckInRepository {
    async fn record(&self, checkin: &NewCheckIn) -> Result<CheckIn, CheckInRepositoryError> {
        Ok(CheckIn::from(checkin.clone()))
    }

    async fn list_recent(
        &self,
        _habit_id: &Uuid,
        _limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(Vec::new())
    }
}
