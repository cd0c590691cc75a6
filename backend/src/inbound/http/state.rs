//! Shared HTTP adapter state.
//!
//! Handlers only see the driving ports, never the concrete services or
//! repositories behind them.

use std::sync::Arc;

use crate::domain::ports::{HabitCommand, HabitQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
}

impl HttpState {
    /// Construct state from the habit command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use habit_buddy::domain::ports::{FixtureHabitCommand, FixtureHabitQuery};
    /// use habit_buddy::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureHabitCommand), Arc::new(FixtureHabitQuery));
    /// let _habits = state.habits.clone();
    /// ```
    pub fn new(habits: Arc<dyn HabitCommand>, habits_query: Arc<dyn HabitQuery>) -> Self {
        Self {
            habits,
            habits_query,
        }
    }
}
