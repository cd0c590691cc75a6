//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every habit, check-in and health endpoint, the
//! request/response bodies, the domain error schemas and the bearer token
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::checkins::{
    CheckInResponseBody, RecordCheckInRequestBody, StreakResponseBody,
};
use crate::inbound::http::habits::{
    CreateHabitRequestBody, HabitResponseBody, UpdateHabitRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Security scheme name referenced by the document-level requirement.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit Buddy backend API",
        description = "Habits, daily check-ins and streaks for authenticated users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::get_habit,
        crate::inbound::http::habits::update_habit,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::checkins::record_checkin,
        crate::inbound::http::checkins::list_checkins,
        crate::inbound::http::checkins::get_streak,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        HabitResponseBody,
        CreateHabitRequestBody,
        UpdateHabitRequestBody,
        RecordCheckInRequestBody,
        CheckInResponseBody,
        StreakResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "habits", description = "Habit management"),
        (name = "checkins", description = "Daily check-ins and streaks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
