//! Tests for check-in and streak HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    FixtureHabitCommand, FixtureHabitQuery, MockHabitCommand, MockHabitQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::test_utils::{bearer_for, test_app};

#[fixture]
fn caller() -> UserId {
    UserId::random()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn stored_checkin(owner: &UserId, habit_id: Uuid, checkin_date: NaiveDate) -> CheckIn {
    CheckIn {
        id: Uuid::new_v4(),
        habit_id,
        user_id: owner.clone(),
        checkin_date,
        value: Some(3),
        note: Some("felt good".to_owned()),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 3, 20, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[rstest]
#[actix_web::test]
async fn record_checkin_returns_created(caller: UserId) {
    let habit_id = Uuid::new_v4();
    let owner = caller.clone();
    let mut command = MockHabitCommand::new();
    command
        .expect_record_checkin()
        .withf(move |request| {
            request.habit_id == habit_id
                && request.checkin_date == date(2024, 1, 3)
                && request.value == Some(3)
        })
        .times(1)
        .return_once(move |request| {
            Ok(stored_checkin(&owner, request.habit_id, request.checkin_date))
        });
    let app = actix_test::init_service(test_app(command, MockHabitQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/habits/{habit_id}/checkins"))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .set_json(json!({"checkinDate": "2024-01-03", "value": 3, "note": "felt good"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: CheckInResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.habit_id, habit_id.to_string());
    assert_eq!(body.user_id, caller.to_string());
    assert_eq!(body.checkin_date, "2024-01-03");
}

#[rstest]
#[actix_web::test]
async fn duplicate_checkin_is_a_conflict(caller: UserId) {
    let mut command = MockHabitCommand::new();
    command.expect_record_checkin().times(1).return_once(|_| {
        Err(Error::conflict("Already checked in for this date")
            .with_details(json!({"checkinDate": "2024-01-03"})))
    });
    let app = actix_test::init_service(test_app(command, MockHabitQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/habits/{}/checkins", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .set_json(json!({"checkinDate": "2024-01-03"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "Already checked in for this date");
}

#[rstest]
#[case("2024-13-01")]
#[case("yesterday")]
#[actix_web::test]
async fn record_checkin_rejects_bad_dates(caller: UserId, #[case] raw: &str) {
    let app = actix_test::init_service(test_app(FixtureHabitCommand, FixtureHabitQuery)).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/habits/{}/checkins", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .set_json(json!({"checkinDate": raw}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "checkinDate");
    assert_eq!(body["details"]["code"], "invalid_date");
}

#[rstest]
#[actix_web::test]
async fn record_checkin_on_foreign_habit_is_not_found(caller: UserId) {
    let app = actix_test::init_service(test_app(FixtureHabitCommand, FixtureHabitQuery)).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/habits/{}/checkins", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .set_json(json!({"checkinDate": "2024-01-03"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn streak_for_fresh_habit_is_zeroed(caller: UserId) {
    let habit_id = Uuid::new_v4();
    let mut query = MockHabitQuery::new();
    query
        .expect_get_streak()
        .withf(move |request| request.habit_id == habit_id)
        .times(1)
        .return_once(move |_| Ok(StreakRecord::empty(habit_id)));
    let app = actix_test::init_service(test_app(MockHabitCommand::new(), query)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/habits/{habit_id}/streak"))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "habitId": habit_id.to_string(),
            "currentStreak": 0,
            "longestStreak": 0,
            "lastCheckinDate": null
        })
    );
}

#[rstest]
#[actix_web::test]
async fn streak_reports_last_checkin_date(caller: UserId) {
    let habit_id = Uuid::new_v4();
    let mut query = MockHabitQuery::new();
    query.expect_get_streak().times(1).return_once(move |_| {
        Ok(StreakRecord {
            habit_id,
            current: 3,
            longest: 10,
            last_checkin_date: Some(date(2024, 1, 3)),
        })
    });
    let app = actix_test::init_service(test_app(MockHabitCommand::new(), query)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/habits/{habit_id}/streak"))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    let body: StreakResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.current_streak, 3);
    assert_eq!(body.longest_streak, 10);
    assert_eq!(body.last_checkin_date.as_deref(), Some("2024-01-03"));
}

#[rstest]
#[case(None, None)]
#[case(Some("10"), Some(10))]
#[case(Some("9000"), Some(9000))]
#[actix_web::test]
async fn list_checkins_forwards_the_requested_limit(
    caller: UserId,
    #[case] raw_limit: Option<&'static str>,
    #[case] expected: Option<usize>,
) {
    let habit_id = Uuid::new_v4();
    let owner = caller.clone();
    let mut query = MockHabitQuery::new();
    query
        .expect_list_checkins()
        .withf(move |request| request.limit == expected && request.habit_id == habit_id)
        .times(1)
        .return_once(move |request| {
            Ok(vec![
                stored_checkin(&owner, request.habit_id, date(2024, 1, 3)),
                stored_checkin(&owner, request.habit_id, date(2024, 1, 2)),
            ])
        });
    let app = actix_test::init_service(test_app(MockHabitCommand::new(), query)).await;

    let uri = match raw_limit {
        Some(limit) => format!("/api/v1/habits/{habit_id}/checkins?limit={limit}"),
        None => format!("/api/v1/habits/{habit_id}/checkins"),
    };
    let request = actix_test::TestRequest::get()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<CheckInResponseBody> = actix_test::read_body_json(response).await;
    let dates: Vec<&str> = body.iter().map(|c| c.checkin_date.as_str()).collect();
    assert_eq!(dates, ["2024-01-03", "2024-01-02"]);
}

#[rstest]
#[actix_web::test]
async fn list_checkins_rejects_zero_limit(caller: UserId) {
    let app = actix_test::init_service(test_app(FixtureHabitCommand, FixtureHabitQuery)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/habits/{}/checkins?limit=0", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, bearer_for(&caller)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_limit");
}
