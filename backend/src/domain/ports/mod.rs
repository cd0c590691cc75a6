//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters.
//! Driving ports (`HabitCommand`, `HabitQuery`) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod checkin_repository;
mod habit_command;
mod habit_query;
mod habit_repository;
mod streak_repository;

#[cfg(test)]
pub use checkin_repository::MockCheckInRepository;
pub use checkin_repository::{
    CheckInRepository, CheckInRepositoryError, FixtureCheckInRepository,
};
#[cfg(test)]
pub use habit_command::MockHabitCommand;
pub use habit_command::{
    CreateHabitRequest, FixtureHabitCommand, HabitCommand, OwnedHabitRequest,
    RecordCheckInRequest, UpdateHabitRequest,
};
#[cfg(test)]
pub use habit_query::MockHabitQuery;
pub use habit_query::{DEFAULT_CHECKIN_LIMIT, FixtureHabitQuery, HabitQuery, ListCheckInsRequest};
#[cfg(test)]
pub use habit_repository::MockHabitRepository;
pub use habit_repository::{FixtureHabitRepository, HabitRepository, HabitRepositoryError};
#[cfg(test)]
pub use streak_repository::MockStreakRepository;
pub use streak_repository::{FixtureStreakRepository, StreakRepository, StreakRepositoryError};
