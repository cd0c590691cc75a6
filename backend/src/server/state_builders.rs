//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use habit_buddy::domain::HabitService;
use habit_buddy::domain::ports::{
    FixtureHabitCommand, FixtureHabitQuery, HabitCommand, HabitQuery,
};
use habit_buddy::inbound::http::state::HttpState;
use habit_buddy::outbound::persistence::{
    DbPool, DieselCheckInRepository, DieselHabitRepository, DieselStreakRepository,
};

use super::ServerConfig;

type HabitPorts = (Arc<dyn HabitCommand>, Arc<dyn HabitQuery>);

/// Use one service for both ports when a pool is available, otherwise the
/// fixtures.
fn build_service_pair<Pool, S>(
    pool: &Option<Pool>,
    make_service: impl FnOnce(&Pool) -> S,
) -> HabitPorts
where
    S: HabitCommand + HabitQuery + 'static,
{
    match pool {
        Some(pool) => {
            let service = Arc::new(make_service(pool));
            (
                service.clone() as Arc<dyn HabitCommand>,
                service as Arc<dyn HabitQuery>,
            )
        }
        None => (Arc::new(FixtureHabitCommand), Arc::new(FixtureHabitQuery)),
    }
}

type DieselHabitService =
    HabitService<DieselHabitRepository, DieselCheckInRepository, DieselStreakRepository>;

fn diesel_habit_service(pool: &DbPool) -> DieselHabitService {
    HabitService::new(
        Arc::new(DieselHabitRepository::new(pool.clone())),
        Arc::new(DieselCheckInRepository::new(pool.clone())),
        Arc::new(DieselStreakRepository::new(pool.clone())),
        Arc::new(mockable::DefaultClock),
    )
}

/// Build the shared HTTP state from the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (habits, habits_query) = build_service_pair(&config.db_pool, diesel_habit_service);
    web::Data::new(HttpState::new(habits, habits_query))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use habit_buddy::domain::ports::{
        CreateHabitRequest, ListCheckInsRequest, OwnedHabitRequest, RecordCheckInRequest,
        UpdateHabitRequest,
    };
    use habit_buddy::domain::{CheckIn, Error, Habit, StreakRecord, UserId};
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    /// Stand-in for the database-backed service: every habit has a streak of 7.
    struct StubService;

    #[async_trait]
    impl HabitCommand for StubService {
        async fn create_habit(&self, _request: CreateHabitRequest) -> Result<Habit, Error> {
            Err(Error::service_unavailable("stub"))
        }

        async fn update_habit(&self, _request: UpdateHabitRequest) -> Result<Habit, Error> {
            Err(Error::service_unavailable("stub"))
        }

        async fn delete_habit(&self, _request: OwnedHabitRequest) -> Result<(), Error> {
            Ok(())
        }

        async fn record_checkin(
            &self,
            _request: RecordCheckInRequest,
        ) -> Result<CheckIn, Error> {
            Err(Error::service_unavailable("stub"))
        }
    }

    #[async_trait]
    impl HabitQuery for StubService {
        async fn list_habits(&self, _owner: UserId) -> Result<Vec<Habit>, Error> {
            Ok(Vec::new())
        }

        async fn get_habit(&self, _request: OwnedHabitRequest) -> Result<Habit, Error> {
            Err(Error::service_unavailable("stub"))
        }

        async fn get_streak(&self, request: OwnedHabitRequest) -> Result<StreakRecord, Error> {
            Ok(StreakRecord {
                current: 7,
                longest: 7,
                ..StreakRecord::empty(request.habit_id)
            })
        }

        async fn list_checkins(
            &self,
            _request: ListCheckInsRequest,
        ) -> Result<Vec<CheckIn>, Error> {
            Ok(Vec::new())
        }
    }

    fn owned() -> OwnedHabitRequest {
        OwnedHabitRequest {
            owner: UserId::random(),
            habit_id: Uuid::new_v4(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn pool_present_selects_the_service_for_both_ports() {
        let (command, query) = build_service_pair(&Some(()), |_| StubService);

        assert!(command.delete_habit(owned()).await.is_ok());
        let streak = query.get_streak(owned()).await.expect("stub streak");
        assert_eq!(streak.current, 7);
    }

    #[rstest]
    #[tokio::test]
    async fn pool_absent_falls_back_to_fixtures() {
        let (command, query) = build_service_pair::<(), StubService>(&None, |_| StubService);

        assert!(command.delete_habit(owned()).await.is_err());
        assert!(query.get_streak(owned()).await.is_err());
    }
}
