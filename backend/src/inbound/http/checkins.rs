//! Check-in and streak endpoints nested under a habit.
//!
//! ```text
//! POST /api/v1/habits/{habit_id}/checkins
//! GET  /api/v1/habits/{habit_id}/checkins?limit=N
//! GET  /api/v1/habits/{habit_id}/streak
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ListCheckInsRequest, OwnedHabitRequest, RecordCheckInRequest};
use crate::domain::{CheckIn, StreakRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::habits::owned_habit;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_limit};

const CHECKIN_DATE_FIELD: FieldName = FieldName::new("checkinDate");
const LIMIT_FIELD: FieldName = FieldName::new("limit");

/// Request body for recording a check-in.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCheckInRequestBody {
    /// Calendar date being checked in, `YYYY-MM-DD`.
    #[schema(format = "date", example = "2024-01-03")]
    pub checkin_date: String,
    /// Optional numeric progress; must not be negative.
    pub value: Option<i32>,
    pub note: Option<String>,
}

/// Check-in as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub habit_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "date")]
    pub checkin_date: String,
    pub value: Option<i32>,
    pub note: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<CheckIn> for CheckInResponseBody {
    fn from(checkin: CheckIn) -> Self {
        Self {
            id: checkin.id.to_string(),
            habit_id: checkin.habit_id.to_string(),
            user_id: checkin.user_id.to_string(),
            checkin_date: checkin.checkin_date.to_string(),
            value: checkin.value,
            note: checkin.note,
            created_at: checkin.created_at.to_rfc3339(),
        }
    }
}

/// Streak summary for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponseBody {
    #[schema(format = "uuid")]
    pub habit_id: String,
    /// Consecutive days ending at the most recent check-in.
    pub current_streak: u32,
    /// Best streak ever observed; never decreases.
    pub longest_streak: u32,
    #[schema(format = "date")]
    pub last_checkin_date: Option<String>,
}

impl From<StreakRecord> for StreakResponseBody {
    fn from(record: StreakRecord) -> Self {
        Self {
            habit_id: record.habit_id.to_string(),
            current_streak: record.current,
            longest_streak: record.longest,
            last_checkin_date: record.last_checkin_date.map(|date| date.to_string()),
        }
    }
}

/// Query string for listing check-ins.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCheckInsQuery {
    /// Maximum check-ins to return; defaults to 50 and is capped at 400.
    #[param(value_type = Option<u32>, example = 50)]
    pub limit: Option<String>,
}

/// Record a check-in for a calendar date and refresh the habit's streak.
#[utoipa::path(
    post,
    path = "/api/v1/habits/{habit_id}/checkins",
    params(
        ("habit_id" = String, Path, description = "Habit identifier")
    ),
    request_body = RecordCheckInRequestBody,
    responses(
        (status = 201, description = "Check-in recorded", body = CheckInResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema),
        (status = 409, description = "Already checked in for this date", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "recordCheckIn"
)]
#[post("/habits/{habit_id}/checkins")]
pub async fn record_checkin(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<RecordCheckInRequestBody>,
) -> ApiResult<HttpResponse> {
    let OwnedHabitRequest { owner, habit_id } = owned_habit(caller, &path)?;
    let RecordCheckInRequestBody {
        checkin_date,
        value,
        note,
    } = payload.into_inner();
    let checkin_date = parse_date(&checkin_date, CHECKIN_DATE_FIELD)?;

    let checkin = state
        .habits
        .record_checkin(RecordCheckInRequest {
            owner,
            habit_id,
            checkin_date,
            value,
            note,
        })
        .await?;
    Ok(HttpResponse::Created().json(CheckInResponseBody::from(checkin)))
}

/// List a habit's most recent check-ins, newest date first.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{habit_id}/checkins",
    params(
        ("habit_id" = String, Path, description = "Habit identifier"),
        ListCheckInsQuery
    ),
    responses(
        (status = 200, description = "Recent check-ins", body = [CheckInResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "listCheckIns"
)]
#[get("/habits/{habit_id}/checkins")]
pub async fn list_checkins(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<ListCheckInsQuery>,
) -> ApiResult<web::Json<Vec<CheckInResponseBody>>> {
    let OwnedHabitRequest { owner, habit_id } = owned_habit(caller, &path)?;
    let limit = query
        .into_inner()
        .limit
        .map(|raw| parse_limit(&raw, LIMIT_FIELD))
        .transpose()?;

    let checkins = state
        .habits_query
        .list_checkins(ListCheckInsRequest {
            owner,
            habit_id,
            limit,
        })
        .await?;
    Ok(web::Json(
        checkins.into_iter().map(CheckInResponseBody::from).collect(),
    ))
}

/// Fetch the habit's streak. Habits without check-ins report zeros.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{habit_id}/streak",
    params(
        ("habit_id" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 200, description = "Streak summary", body = StreakResponseBody),
        (status = 400, description = "Invalid habit id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "getStreak"
)]
#[get("/habits/{habit_id}/streak")]
pub async fn get_streak(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<StreakResponseBody>> {
    let request = owned_habit(caller, &path)?;
    let record = state.habits_query.get_streak(request).await?;
    Ok(web::Json(StreakResponseBody::from(record)))
}

#[cfg(test)]
#[path = "checkins_tests.rs"]
mod tests;
