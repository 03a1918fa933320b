//! Exercise ledger API handlers.
//!
//! ```text
//! POST /api/users/{_id}/exercises   Append an exercise
//! GET  /api/users/{_id}/logs        Read an exercise log
//! ```
//!
//! Append bodies are accepted as JSON or form-encoded. Body fields are
//! always validated strictly; only the log-query parameters honour the
//! configured lenient/strict policy.

use actix_web::web::Either;
use actix_web::{get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ledger::USER_NOT_FOUND;
use crate::domain::{
    Description, DurationMinutes, Error, Exercise, ExerciseDraft, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::query::{LogQuery, decode_log_window, parse_calendar_date};
use crate::inbound::http::state::HttpState;

/// Duration as supplied on the wire: a JSON number or a numeric string.
///
/// Form-encoded bodies always arrive as text; JSON clients send either.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum DurationField {
    /// Plain JSON number of minutes.
    Number(f64),
    /// Numeric text, e.g. `"30"`.
    Text(String),
}

impl DurationField {
    fn into_minutes(self) -> Result<DurationMinutes, Error> {
        let parsed = match self {
            Self::Number(minutes) => DurationMinutes::new(minutes),
            Self::Text(raw) => DurationMinutes::parse(&raw),
        };
        parsed.map_err(|err| Error::invalid_input(err.to_string()))
    }
}

/// Append request body for `POST /api/users/{_id}/exercises`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateExerciseRequest {
    /// Free-text description of the activity.
    pub description: String,
    /// Duration in minutes.
    pub duration: DurationField,
    /// Calendar date, `YYYY-MM-DD` or RFC 3339; today when absent or empty.
    #[serde(default)]
    pub date: Option<String>,
}

/// Response for a successfully appended exercise.
///
/// `_id` is the owning user's identifier, not the entry's; entry
/// identifiers never leave the persistence layer.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ExerciseResponse {
    /// Owning user's identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user's username.
    pub username: String,
    /// Calendar date rendered as e.g. `Wed May 10 2023`.
    pub date: String,
    /// Duration in minutes.
    pub duration: f64,
    /// Free-text description of the activity.
    pub description: String,
}

/// One entry of the log envelope; ids and the owner are stripped.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LogEntry {
    /// Free-text description of the activity.
    pub description: String,
    /// Duration in minutes.
    pub duration: f64,
    /// Calendar date rendered as e.g. `Wed May 10 2023`.
    pub date: String,
}

/// Response envelope for `GET /api/users/{_id}/logs`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LogResponse {
    /// Owning user's identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user's username.
    pub username: String,
    /// Lifetime number of appended exercises, independent of the window.
    pub count: i32,
    /// Matching entries in chronological order.
    pub log: Vec<LogEntry>,
}

/// Render a calendar date in the historical `Wed May 10 2023` form.
fn render_calendar_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

impl LogEntry {
    fn from_exercise(entry: &Exercise) -> Self {
        Self {
            description: entry.description().to_string(),
            duration: entry.duration().minutes(),
            date: render_calendar_date(entry.performed_on()),
        }
    }
}

/// Resolve the `_id` path segment to a [`UserId`].
///
/// A string that is not a UUID cannot name any user, so it gets the same
/// `User not found.` answer as an absent id rather than leaking the id
/// format into the error contract.
fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(USER_NOT_FOUND))
}

fn build_draft(body: CreateExerciseRequest) -> Result<ExerciseDraft, Error> {
    let description =
        Description::new(body.description).map_err(|err| Error::invalid_input(err.to_string()))?;
    let duration = body.duration.into_minutes()?;

    // Body dates are strict: an unparseable value is a 400, never a junk
    // date in storage. An empty string counts as absent, as the historical
    // form clients submit the field even when untouched.
    let performed_on = match body.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            parse_calendar_date(raw)
                .ok_or_else(|| Error::invalid_input(format!("date is malformed: '{raw}'")))?,
        ),
    };

    Ok(ExerciseDraft {
        description,
        duration,
        performed_on,
    })
}

/// Append an exercise to a user's log.
#[utoipa::path(
    post,
    path = "/api/users/{_id}/exercises",
    request_body = CreateExerciseRequest,
    params(("_id" = String, Path, description = "Owning user's identifier")),
    responses(
        (status = 200, description = "Exercise appended", body = ExerciseResponse),
        (status = 400, description = "Invalid body field", body = ErrorMessage),
        (status = 404, description = "User not found", body = ErrorMessage),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    ),
    tags = ["exercises"],
    operation_id = "createExercise"
)]
#[post("/users/{_id}/exercises")]
pub async fn create_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Either<web::Json<CreateExerciseRequest>, web::Form<CreateExerciseRequest>>,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let draft = build_draft(payload.into_inner())?;

    let appended = state.ledger.append(&user_id, draft).await?;
    Ok(web::Json(ExerciseResponse {
        id: appended.user.id().to_string(),
        username: appended.user.username().to_string(),
        date: render_calendar_date(appended.entry.performed_on()),
        duration: appended.entry.duration().minutes(),
        description: appended.entry.description().to_string(),
    }))
}

/// Read a user's exercise log, optionally windowed and capped.
#[utoipa::path(
    get,
    path = "/api/users/{_id}/logs",
    params(
        ("_id" = String, Path, description = "Owning user's identifier"),
        LogQuery
    ),
    responses(
        (status = 200, description = "Matching log entries", body = LogResponse),
        (status = 400, description = "Malformed query parameter in strict mode", body = ErrorMessage),
        (status = 404, description = "User not found", body = ErrorMessage),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    ),
    tags = ["exercises"],
    operation_id = "getLogs"
)]
#[get("/users/{_id}/logs")]
pub async fn get_logs(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQuery>,
) -> ApiResult<web::Json<LogResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let window = decode_log_window(&query, state.query_policy)?;

    let log = state.ledger.read_log(&user_id, &window).await?;
    Ok(web::Json(LogResponse {
        id: log.user.id().to_string(),
        username: log.user.username().to_string(),
        count: log.user.exercise_count(),
        log: log.entries.iter().map(LogEntry::from_exercise).collect(),
    }))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
