//! PostgreSQL-backed streak record store.
//!
//! A refresh runs in one transaction that holds the streak row lock while it
//! reads the check-in window and writes the recomputed record, so concurrent
//! refreshes for a habit apply one after another.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{StreakRepository, StreakRepositoryError};
use crate::domain::streak::{StreakRecord, compute};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStreakRow, StreakRow};
use super::pool::{DbPool, PoolError};
use super::schema::{habit_checkins, habit_streaks};

/// Diesel-backed implementation of the streak repository port.
#[derive(Clone)]
pub struct DieselStreakRepository {
    pool: DbPool,
}

impl DieselStreakRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StreakRepositoryError {
    map_pool_error(error, StreakRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> StreakRepositoryError {
    map_diesel_error(
        error,
        StreakRepositoryError::query,
        StreakRepositoryError::connection,
    )
}

impl From<diesel::result::Error> for StreakRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        diesel_error(error)
    }
}

fn window_to_i64(window: usize) -> i64 {
    i64::try_from(window).unwrap_or(i64::MAX)
}

fn to_column(value: u32, field: &str) -> Result<i32, StreakRepositoryError> {
    i32::try_from(value)
        .map_err(|_| StreakRepositoryError::query(format!("{field} {value} exceeds column range")))
}

fn from_column(value: i32, field: &str) -> Result<u32, StreakRepositoryError> {
    u32::try_from(value)
        .map_err(|_| StreakRepositoryError::query(format!("stored {field} {value} is negative")))
}

fn row_to_record(row: StreakRow) -> Result<StreakRecord, StreakRepositoryError> {
    Ok(StreakRecord {
        habit_id: row.habit_id,
        current: from_column(row.current_streak, "current streak")?,
        longest: from_column(row.longest_streak, "longest streak")?,
        last_checkin_date: row.last_checkin_date,
    })
}

#[async_trait]
impl StreakRepository for DieselStreakRepository {
    async fn find(&self, habit_id: &Uuid) -> Result<Option<StreakRecord>, StreakRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = habit_streaks::table
            .filter(habit_streaks::habit_id.eq(habit_id))
            .select(StreakRow::as_select())
            .first::<StreakRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn refresh(
        &self,
        habit_id: &Uuid,
        window: usize,
    ) -> Result<StreakRecord, StreakRepositoryError> {
        let habit_id = *habit_id;
        let zeroed = NewStreakRow {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_checkin_date: None,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = conn
            .transaction(|conn| {
                async move {
                    // The lock below needs a row to hold.
                    diesel::insert_into(habit_streaks::table)
                        .values(&zeroed)
                        .on_conflict(habit_streaks::habit_id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    let previous_longest = habit_streaks::table
                        .filter(habit_streaks::habit_id.eq(habit_id))
                        .select(habit_streaks::longest_streak)
                        .for_update()
                        .first::<i32>(conn)
                        .await?;
                    let dates = habit_checkins::table
                        .filter(habit_checkins::habit_id.eq(habit_id))
                        .order(habit_checkins::checkin_date.desc())
                        .limit(window_to_i64(window))
                        .select(habit_checkins::checkin_date)
                        .load::<NaiveDate>(conn)
                        .await?;

                    let outcome =
                        compute(&dates, from_column(previous_longest, "longest streak")?);
                    let row = diesel::update(
                        habit_streaks::table.filter(habit_streaks::habit_id.eq(habit_id)),
                    )
                    .set((
                        habit_streaks::current_streak
                            .eq(to_column(outcome.current, "current streak")?),
                        habit_streaks::longest_streak
                            .eq(to_column(outcome.longest, "longest streak")?),
                        habit_streaks::last_checkin_date.eq(outcome.last_date),
                        habit_streaks::updated_at.eq(now),
                    ))
                    .returning(StreakRow::as_returning())
                    .get_result::<StreakRow>(conn)
                    .await?;
                    Ok::<_, StreakRepositoryError>(row)
                }
                .scope_boxed()
            })
            .await?;

        row_to_record(row)
    }
}
