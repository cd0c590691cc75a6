//! Domain model, services and ports.
//!
//! Nothing here knows about HTTP or Diesel. Inbound adapters call the driving
//! ports and outbound adapters implement the repository ports.

pub mod checkin;
pub mod error;
pub mod habit;
mod habit_service;
pub mod ports;
pub mod streak;
mod streak_manager;
pub mod trace_id;
pub mod user;

pub use self::checkin::{CheckIn, CheckInValidationError, NewCheckIn};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::habit::{DEFAULT_HABIT_TYPE, Habit, HabitDraft, HabitPatch, HabitValidationError};
pub use self::habit_service::HabitService;
pub use self::streak::{STREAK_WINDOW, StreakOutcome, StreakRecord};
pub use self::streak_manager::StreakRecordManager;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};
