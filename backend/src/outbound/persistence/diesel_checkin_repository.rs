//! PostgreSQL-backed check-in store.
//!
//! Duplicate detection relies on the `(habit_id, checkin_date)` unique
//! constraint rather than a read before the insert, so concurrent writers for
//! the same day cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CheckInRepository, CheckInRepositoryError};
use crate::domain::{CheckIn, NewCheckIn, UserId};

use super::diesel_error_mapping::{log_diesel_error, map_diesel_error, map_pool_error};
use super::models::{CheckInRow, NewCheckInRow};
use super::pool::{DbPool, PoolError};
use super::schema::habit_checkins;

/// Constraint name declared by the habits migration.
const UNIQUE_DAY_CONSTRAINT: &str = "habit_checkins_habit_id_checkin_date_key";

/// Diesel-backed implementation of the check-in repository port.
#[derive(Clone)]
pub struct DieselCheckInRepository {
    pool: DbPool,
}

impl DieselCheckInRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CheckInRepositoryError {
    map_pool_error(error, CheckInRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> CheckInRepositoryError {
    map_diesel_error(
        error,
        CheckInRepositoryError::query,
        CheckInRepositoryError::connection,
    )
}

/// Map an insert failure, turning the one-per-day violation into
/// [`CheckInRepositoryError::Duplicate`] and a vanished parent habit into
/// [`CheckInRepositoryError::HabitMissing`].
fn insert_error(error: DieselError, checkin: &NewCheckIn) -> CheckInRepositoryError {
    let mapped = match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info
                .constraint_name()
                .is_none_or(|name| name == UNIQUE_DAY_CONSTRAINT) =>
        {
            CheckInRepositoryError::duplicate(checkin.habit_id(), checkin.checkin_date())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            CheckInRepositoryError::habit_missing(checkin.habit_id())
        }
        _ => return diesel_error(error),
    };

    log_diesel_error(&error);
    mapped
}

fn limit_to_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn row_to_checkin(row: CheckInRow) -> CheckIn {
    CheckIn {
        id: row.id,
        habit_id: row.habit_id,
        user_id: UserId::from_uuid(row.user_id),
        checkin_date: row.checkin_date,
        value: row.value,
        note: row.note,
        created_at: row.created_at,
    }
}

#[async_trait]
impl CheckInRepository for DieselCheckInRepository {
    async fn record(&self, checkin: &NewCheckIn) -> Result<CheckIn, CheckInRepositoryError> {
        let new_row = NewCheckInRow {
            id: checkin.id(),
            habit_id: checkin.habit_id(),
            user_id: *checkin.user_id().as_uuid(),
            checkin_date: checkin.checkin_date(),
            value: checkin.value(),
            note: checkin.note(),
            created_at: checkin.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = diesel::insert_into(habit_checkins::table)
            .values(&new_row)
            .returning(CheckInRow::as_returning())
            .get_result::<CheckInRow>(&mut conn)
            .await
            .map_err(|err| insert_error(err, checkin))?;

        Ok(row_to_checkin(row))
    }

    async fn list_recent(
        &self,
        habit_id: &Uuid,
        limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CheckInRow> = habit_checkins::table
            .filter(habit_checkins::habit_id.eq(habit_id))
            .order(habit_checkins::checkin_date.desc())
            .limit(limit_to_i64(limit))
            .select(CheckInRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_checkin).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for insert error classification.

    use chrono::{NaiveDate, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn pending() -> NewCheckIn {
        NewCheckIn::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            UserId::random(),
            NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"),
            None,
            None,
            Utc::now(),
        )
        .expect("valid check-in")
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate(pending: NewCheckIn) {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );

        let mapped = insert_error(err, &pending);

        assert_eq!(
            mapped,
            CheckInRepositoryError::duplicate(pending.habit_id(), pending.checkin_date())
        );
    }

    #[rstest]
    fn foreign_key_violation_maps_to_habit_missing(pending: NewCheckIn) {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert violates foreign key".to_string()),
        );

        let mapped = insert_error(err, &pending);

        assert_eq!(mapped, CheckInRepositoryError::habit_missing(pending.habit_id()));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error(pending: NewCheckIn) {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection reset".to_string()),
        );

        let mapped = insert_error(err, &pending);

        assert!(matches!(mapped, CheckInRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn oversized_limits_saturate() {
        assert_eq!(limit_to_i64(400), 400);
        assert_eq!(limit_to_i64(usize::MAX), i64::MAX);
    }
}
