//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers map requests onto the habit driving ports and translate domain
//! errors into JSON responses.

pub mod auth;
pub mod checkins;
pub mod error;
pub mod habits;
pub mod health;
pub mod schemas;
pub mod state;
pub mod token_config;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;

use actix_web::{Scope, error::JsonPayloadError, web};
use serde_json::json;

use crate::domain::Error;

/// JSON extractor configuration that reports malformed bodies with the
/// crate's error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
            other => format!("invalid request body: {other}"),
        };
        Error::invalid_request(message)
            .with_details(json!({ "code": "invalid_body" }))
            .into()
    })
}

/// The versioned API scope with every habit endpoint registered.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(habits::list_habits)
        .service(habits::create_habit)
        .service(habits::get_habit)
        .service(habits::update_habit)
        .service(habits::delete_habit)
        .service(checkins::record_checkin)
        .service(checkins::list_checkins)
        .service(checkins::get_streak)
}
