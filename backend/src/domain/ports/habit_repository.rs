//! Port for habit persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Habit, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by habit repository adapters.
    pub enum HabitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "habit repository query failed: {message}",
    }
}

/// Port for reading and writing habits.
///
/// All reads are scoped to an owner: a habit belonging to someone else is
/// indistinguishable from a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Insert a habit together with its zeroed streak record in one
    /// transaction.
    async fn create_with_streak(&self, habit: &Habit) -> Result<(), HabitRepositoryError>;

    /// Find a habit owned by `owner`.
    async fn find_owned(
        &self,
        habit_id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Habit>, HabitRepositoryError>;

    /// List the owner's habits, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError>;

    /// Overwrite the mutable columns of an existing habit.
    async fn update(&self, habit: &Habit) -> Result<(), HabitRepositoryError>;

    /// Delete a habit owned by `owner`. Returns `false` when nothing matched.
    ///
    /// Check-ins and the streak record go with it through foreign key
    /// cascades.
    async fn delete_owned(
        &self,
        habit_id: &Uuid,
        owner: &UserId,
    ) -> Result<bool, HabitRepositoryError>;
}

/// Fixture implementation for tests that do not exercise habit persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitRepository;

#[async_trait]
impl HabitRepository for FixtureHabitRepository {
    async fn create_with_streak(&self, _habit: &Habit) -> Result<(), HabitRepositoryError> {
        Ok(())
    }

    async fn find_owned(
        &self,
        _habit_id: &Uuid,
        _owner: &UserId,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(None)
    }

    async fn list_for_owner(&self, _owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(&self, _habit: &Habit) -> Result<(), HabitRepositoryError> {
        Ok(())
    }

    async fn delete_owned(
        &self,
        _habit_id: &Uuid,
        _owner: &UserId,
    ) -> Result<bool, HabitRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_missing_habits() {
        let repo = FixtureHabitRepository;
        let owner = UserId::random();
        let habit_id = Uuid::new_v4();

        let found = repo
            .find_owned(&habit_id, &owner)
            .await
            .expect("fixture lookup succeeds");
        let deleted = repo
            .delete_owned(&habit_id, &owner)
            .await
            .expect("fixture delete succeeds");

        assert!(found.is_none());
        assert!(!deleted);
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = HabitRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "habit repository connection failed: pool timed out"
        );
    }
}
