//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between row structs and domain types. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use habit_buddy::outbound::persistence::{
//!     DbPool, DieselCheckInRepository, DieselHabitRepository, DieselStreakRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), habit_buddy::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/habits")).await?;
//! let habits = Arc::new(DieselHabitRepository::new(pool.clone()));
//! let checkins = Arc::new(DieselCheckInRepository::new(pool.clone()));
//! let streaks = Arc::new(DieselStreakRepository::new(pool));
//! # let _ = (habits, checkins, streaks);
//! # Ok(())
//! # }
//! ```

mod diesel_checkin_repository;
mod diesel_error_mapping;
mod diesel_habit_repository;
mod diesel_streak_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_checkin_repository::DieselCheckInRepository;
pub use diesel_habit_repository::DieselHabitRepository;
pub use diesel_streak_repository::DieselStreakRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending, run_pending_async};
pub use pool::{DbPool, PoolConfig, PoolError};
