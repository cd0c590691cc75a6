//! PostgreSQL-backed `HabitRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{HabitRepository, HabitRepositoryError};
use crate::domain::{Habit, HabitDraft, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HabitRow, HabitUpdate, NewStreakRow};
use super::pool::{DbPool, PoolError};
use super::schema::{habit_streaks, habits};

/// Diesel-backed implementation of the habit repository port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use habit_buddy::outbound::persistence::{DbPool, DieselHabitRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/habits")).await?;
    /// let _repo = DieselHabitRepository::new(pool);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> HabitRepositoryError {
    map_pool_error(error, HabitRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> HabitRepositoryError {
    map_diesel_error(
        error,
        HabitRepositoryError::query,
        HabitRepositoryError::connection,
    )
}

fn habit_to_row(habit: &Habit) -> HabitRow {
    HabitRow {
        id: habit.id(),
        user_id: *habit.user_id().as_uuid(),
        title: habit.title().to_owned(),
        description: habit.description().map(str::to_owned),
        habit_type: habit.habit_type().to_owned(),
        target_value: habit.target_value(),
        unit: habit.unit().map(str::to_owned),
        schedule_days: habit.schedule_days().map(<[i16]>::to_vec),
        reminder_time: habit.reminder_time(),
        is_public: habit.is_public(),
        color: habit.color().map(str::to_owned),
        icon: habit.icon().map(str::to_owned),
        created_at: habit.created_at(),
        updated_at: habit.updated_at(),
    }
}

/// Rebuild a domain habit, rejecting rows that no longer validate.
fn row_to_habit(row: HabitRow) -> Result<Habit, HabitRepositoryError> {
    let HabitRow {
        id,
        user_id,
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
        created_at,
        updated_at,
    } = row;

    Habit::new(HabitDraft {
        id,
        user_id: UserId::from_uuid(user_id),
        title,
        description,
        habit_type: Some(habit_type),
        target_value,
        unit,
        schedule_days,
        reminder_time,
        is_public,
        color,
        icon,
        created_at,
        updated_at,
    })
    .map_err(|err| HabitRepositoryError::query(format!("stored habit {id} is invalid: {err}")))
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn create_with_streak(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let row = habit_to_row(habit);
        let streak = NewStreakRow {
            habit_id: habit.id(),
            current_streak: 0,
            longest_streak: 0,
            last_checkin_date: None,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(habits::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(habit_streaks::table)
                    .values(&streak)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn find_owned(
        &self,
        habit_id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = habits::table
            .filter(habits::id.eq(habit_id))
            .filter(habits::user_id.eq(owner.as_uuid()))
            .select(HabitRow::as_select())
            .first::<HabitRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_habit).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<HabitRow> = habits::table
            .filter(habits::user_id.eq(owner.as_uuid()))
            .order((habits::created_at.desc(), habits::id.desc()))
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_habit).collect()
    }

    async fn update(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let changes = HabitUpdate {
            title: habit.title(),
            description: habit.description(),
            habit_type: habit.habit_type(),
            target_value: habit.target_value(),
            unit: habit.unit(),
            schedule_days: habit.schedule_days(),
            reminder_time: habit.reminder_time(),
            is_public: habit.is_public(),
            color: habit.color(),
            icon: habit.icon(),
            updated_at: habit.updated_at(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            habits::table
                .filter(habits::id.eq(habit.id()))
                .filter(habits::user_id.eq(habit.user_id().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        if updated == 0 {
            return Err(HabitRepositoryError::query(format!(
                "habit {} vanished before update",
                habit.id()
            )));
        }
        Ok(())
    }

    async fn delete_owned(
        &self,
        habit_id: &Uuid,
        owner: &UserId,
    ) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(
            habits::table
                .filter(habits::id.eq(habit_id))
                .filter(habits::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.

    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn row() -> HabitRow {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 10, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        HabitRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Read".to_owned(),
            description: None,
            habit_type: "daily".to_owned(),
            target_value: Some(20),
            unit: Some("pages".to_owned()),
            schedule_days: Some(vec![1, 2, 3]),
            reminder_time: None,
            is_public: true,
            color: Some("#00aa88".to_owned()),
            icon: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn row_converts_to_habit_and_back(row: HabitRow) {
        let habit = row_to_habit(row.clone()).expect("valid row");

        assert_eq!(habit.user_id().as_uuid(), &row.user_id);
        assert_eq!(habit.schedule_days(), Some(&[1, 2, 3][..]));

        let rebuilt = habit_to_row(&habit);
        assert_eq!(rebuilt.title, row.title);
        assert_eq!(rebuilt.color, row.color);
    }

    #[rstest]
    fn invalid_row_maps_to_query_error(mut row: HabitRow) {
        row.title = " ".to_owned();
        let err = row_to_habit(row).expect_err("blank title rejected");
        assert!(matches!(err, HabitRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_failure_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, HabitRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
