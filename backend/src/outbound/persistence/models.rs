//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; adapters convert them into
//! domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{habit_checkins, habit_streaks, habits};

/// Row read from and written to the habits table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub habit_type: String,
    pub target_value: Option<i32>,
    pub unit: Option<String>,
    pub schedule_days: Option<Vec<i16>>,
    pub reminder_time: Option<NaiveTime>,
    pub is_public: bool,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable habit columns. `None` writes SQL `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct HabitUpdate<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub habit_type: &'a str,
    pub target_value: Option<i32>,
    pub unit: Option<&'a str>,
    pub schedule_days: Option<&'a [i16]>,
    pub reminder_time: Option<NaiveTime>,
    pub is_public: bool,
    pub color: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habit_checkins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheckInRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub checkin_date: NaiveDate,
    pub value: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_checkins)]
pub(crate) struct NewCheckInRow<'a> {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub checkin_date: NaiveDate,
    pub value: Option<i32>,
    pub note: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Row read from the habit_streaks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habit_streaks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StreakRow {
    pub habit_id: Uuid,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_checkin_date: Option<NaiveDate>,
    #[expect(dead_code, reason = "audit column not surfaced to the domain")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable streak row; `updated_at` falls back to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_streaks)]
pub(crate) struct NewStreakRow {
    pub habit_id: Uuid,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_checkin_date: Option<NaiveDate>,
}
