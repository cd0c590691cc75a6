//! Port for the per-habit streak record.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::StreakRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by streak repository adapters.
    pub enum StreakRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "streak repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "streak repository query failed: {message}",
    }
}

/// Port for reading and writing streak records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Read the stored record, if any.
    async fn find(&self, habit_id: &Uuid) -> Result<Option<StreakRecord>, StreakRepositoryError>;

    /// Recompute the record from the newest `window` check-in dates and
    /// return what was stored.
    ///
    /// The read of the previous record, the read of the dates and the write
    /// form one atomic unit per habit. Creates the record when missing;
    /// `longest` never drops below the stored value.
    async fn refresh(
        &self,
        habit_id: &Uuid,
        window: usize,
    ) -> Result<StreakRecord, StreakRepositoryError>;
}

/// Fixture implementation for a store without check-ins.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStreakRepository;

#[async_trait]
impl StreakRepository for FixtureStreakRepository {
    async fn find(&self, _habit_id: &Uuid) -> Result<Option<StreakRecord>, StreakRepositoryError> {
        Ok(None)
    }

    async fn refresh(
        &self,
        habit_id: &Uuid,
        _window: usize,
    ) -> Result<StreakRecord, StreakRepositoryError> {
        Ok(StreakRecord::empty(*habit_id))
    }
}
