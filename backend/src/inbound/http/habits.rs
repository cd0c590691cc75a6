//! Habit resource endpoints.
//!
//! ```text
//! GET    /api/v1/habits
//! POST   /api/v1/habits
//! GET    /api/v1/habits/{habit_id}
//! PATCH  /api/v1/habits/{habit_id}
//! DELETE /api/v1/habits/{habit_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateHabitRequest, OwnedHabitRequest, UpdateHabitRequest};
use crate::domain::{Error, Habit, HabitPatch, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, deserialize_some, parse_optional_time, parse_time, parse_uuid,
};

pub(crate) const HABIT_ID_FIELD: FieldName = FieldName::new("habitId");
const REMINDER_TIME_FIELD: FieldName = FieldName::new("reminderTime");

/// Habit as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "daily")]
    pub habit_type: String,
    pub target_value: Option<i32>,
    pub unit: Option<String>,
    /// ISO weekdays, 1 = Monday.
    pub schedule_days: Option<Vec<i16>>,
    #[schema(example = "07:30:00")]
    pub reminder_time: Option<String>,
    pub is_public: bool,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Habit> for HabitResponseBody {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id().to_string(),
            title: habit.title().to_owned(),
            description: habit.description().map(str::to_owned),
            habit_type: habit.habit_type().to_owned(),
            target_value: habit.target_value(),
            unit: habit.unit().map(str::to_owned),
            schedule_days: habit.schedule_days().map(<[i16]>::to_vec),
            reminder_time: habit
                .reminder_time()
                .map(|time| time.format("%H:%M:%S").to_string()),
            is_public: habit.is_public(),
            color: habit.color().map(str::to_owned),
            icon: habit.icon().map(str::to_owned),
            created_at: habit.created_at().to_rfc3339(),
            updated_at: habit.updated_at().to_rfc3339(),
        }
    }
}

/// Request body for `POST /api/v1/habits`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequestBody {
    #[schema(example = "Read 20 pages")]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `daily`.
    pub habit_type: Option<String>,
    pub target_value: Option<i32>,
    pub unit: Option<String>,
    pub schedule_days: Option<Vec<i16>>,
    /// `HH:MM` or `HH:MM:SS`.
    #[schema(example = "07:30")]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub color: Option<String>,
    pub icon: Option<String>,
}

fn parse_create_request(
    body: CreateHabitRequestBody,
    owner: UserId,
) -> Result<CreateHabitRequest, Error> {
    Ok(CreateHabitRequest {
        owner,
        title: body.title,
        description: body.description,
        habit_type: body.habit_type,
        target_value: body.target_value,
        unit: body.unit,
        schedule_days: body.schedule_days,
        reminder_time: parse_optional_time(body.reminder_time, REMINDER_TIME_FIELD)?,
        is_public: body.is_public,
        color: body.color,
        icon: body.icon,
    })
}

/// Request body for `PATCH /api/v1/habits/{habit_id}`.
///
/// Absent fields are left unchanged. An explicit `null` clears a nullable
/// field.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitRequestBody {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub habit_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>)]
    pub target_value: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Vec<i16>>)]
    pub schedule_days: Option<Option<Vec<i16>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>, example = "21:00")]
    pub reminder_time: Option<Option<String>>,
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
}

fn parse_patch(body: UpdateHabitRequestBody) -> Result<HabitPatch, Error> {
    let reminder_time = match body.reminder_time {
        Some(Some(raw)) => Some(Some(parse_time(&raw, REMINDER_TIME_FIELD)?)),
        Some(None) => Some(None),
        None => None,
    };

    Ok(HabitPatch {
        title: body.title,
        description: body.description,
        habit_type: body.habit_type,
        target_value: body.target_value,
        unit: body.unit,
        schedule_days: body.schedule_days,
        reminder_time,
        is_public: body.is_public,
        color: body.color,
        icon: body.icon,
    })
}

pub(crate) fn owned_habit(
    caller: AuthenticatedUser,
    habit_id: &str,
) -> ApiResult<OwnedHabitRequest> {
    Ok(OwnedHabitRequest {
        owner: caller.into_inner(),
        habit_id: parse_uuid(habit_id, HABIT_ID_FIELD)?,
    })
}

/// List the caller's habits, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/habits",
    responses(
        (status = 200, description = "Habits owned by the caller", body = [HabitResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "listHabits"
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<HabitResponseBody>>> {
    let habits = state.habits_query.list_habits(caller.into_inner()).await?;
    Ok(web::Json(
        habits.into_iter().map(HabitResponseBody::from).collect(),
    ))
}

/// Create a habit. Its streak starts at zero.
#[utoipa::path(
    post,
    path = "/api/v1/habits",
    request_body = CreateHabitRequestBody,
    responses(
        (status = 201, description = "Habit created", body = HabitResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "createHabit"
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateHabitRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner(), caller.into_inner())?;
    let habit = state.habits.create_habit(request).await?;
    Ok(HttpResponse::Created().json(HabitResponseBody::from(habit)))
}

/// Fetch one of the caller's habits.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{habit_id}",
    params(
        ("habit_id" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 200, description = "Habit", body = HabitResponseBody),
        (status = 400, description = "Invalid habit id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "getHabit"
)]
#[get("/habits/{habit_id}")]
pub async fn get_habit(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<HabitResponseBody>> {
    let request = owned_habit(caller, &path)?;
    let habit = state.habits_query.get_habit(request).await?;
    Ok(web::Json(HabitResponseBody::from(habit)))
}

/// Partially update one of the caller's habits.
#[utoipa::path(
    patch,
    path = "/api/v1/habits/{habit_id}",
    params(
        ("habit_id" = String, Path, description = "Habit identifier")
    ),
    request_body = UpdateHabitRequestBody,
    responses(
        (status = 200, description = "Updated habit", body = HabitResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "updateHabit"
)]
#[patch("/habits/{habit_id}")]
pub async fn update_habit(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateHabitRequestBody>,
) -> ApiResult<web::Json<HabitResponseBody>> {
    let OwnedHabitRequest { owner, habit_id } = owned_habit(caller, &path)?;
    let patch = parse_patch(payload.into_inner())?;
    let habit = state
        .habits
        .update_habit(UpdateHabitRequest {
            owner,
            habit_id,
            patch,
        })
        .await?;
    Ok(web::Json(HabitResponseBody::from(habit)))
}

/// Delete one of the caller's habits with its check-ins and streak.
#[utoipa::path(
    delete,
    path = "/api/v1/habits/{habit_id}",
    params(
        ("habit_id" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 400, description = "Invalid habit id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "deleteHabit"
)]
#[delete("/habits/{habit_id}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let request = owned_habit(caller, &path)?;
    state.habits.delete_habit(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "habits_tests.rs"]
mod tests;
