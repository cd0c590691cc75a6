//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{NaiveTime, TimeZone, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use super::auth::{Claims, TokenVerifier};
use super::state::HttpState;
use super::{api_scope, json_config};
use crate::domain::ports::{HabitCommand, HabitQuery};
use crate::domain::{Habit, HabitDraft, UserId};

/// Shared secret used by handler tests.
pub const TEST_SECRET: &[u8] = b"habit-buddy-test-secret-0123456789abcdef";

pub fn test_verifier() -> TokenVerifier {
    TokenVerifier::from_secret(TEST_SECRET)
}

/// Issue a token for `user` that expires `ttl_secs` from now. Negative values
/// produce a token that is already past its leeway.
pub fn issue_token(user: &UserId, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.to_string(),
        exp: now + ttl_secs,
        iat: Some(now),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("test token encodes")
}

/// `Authorization` header value for `user`.
pub fn bearer_for(user: &UserId) -> String {
    format!("Bearer {}", issue_token(user, 3600))
}

/// App wired with the given habit ports, the test verifier and the crate's
/// JSON error handling.
pub fn test_app(
    command: impl HabitCommand + 'static,
    query: impl HabitQuery + 'static,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(command), Arc::new(query));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(test_verifier()))
        .app_data(json_config())
        .service(api_scope())
}

/// A valid habit owned by `owner`.
pub fn sample_habit(owner: &UserId) -> Habit {
    let at = Utc
        .with_ymd_and_hms(2026, 1, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Habit::new(HabitDraft {
        id: Uuid::new_v4(),
        user_id: owner.clone(),
        title: "Read".to_owned(),
        description: Some("Twenty pages".to_owned()),
        habit_type: None,
        target_value: Some(20),
        unit: Some("pages".to_owned()),
        schedule_days: Some(vec![1, 3, 5]),
        reminder_time: NaiveTime::from_hms_opt(7, 30, 0),
        is_public: false,
        color: None,
        icon: None,
        created_at: at,
        updated_at: at,
    })
    .expect("valid habit")
}
