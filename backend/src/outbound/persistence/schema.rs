//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Habits owned by users. `user_id` comes from the verified bearer token;
    /// there is no local users table.
    habits (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Text,
        description -> Nullable<Text>,
        habit_type -> Text,
        target_value -> Nullable<Int4>,
        unit -> Nullable<Text>,
        /// Weekday numbers, 1 = Monday.
        schedule_days -> Nullable<Array<Int2>>,
        reminder_time -> Nullable<Time>,
        is_public -> Bool,
        color -> Nullable<Text>,
        icon -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per habit per calendar day, enforced by
    /// `habit_checkins_habit_id_checkin_date_key`.
    habit_checkins (id) {
        id -> Uuid,
        habit_id -> Uuid,
        user_id -> Uuid,
        checkin_date -> Date,
        value -> Nullable<Int4>,
        note -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Materialised streak per habit.
    habit_streaks (habit_id) {
        habit_id -> Uuid,
        current_streak -> Int4,
        longest_streak -> Int4,
        last_checkin_date -> Nullable<Date>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(habit_checkins -> habits (habit_id));
diesel::joinable!(habit_streaks -> habits (habit_id));

diesel::allow_tables_to_appear_in_same_query!(habits, habit_checkins, habit_streaks);
