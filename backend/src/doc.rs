//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. The
//! document is served by Swagger UI at `/docs` in debug builds and exported
//! via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::exercises::{
    CreateExerciseRequest, DurationField, ExerciseResponse, LogEntry, LogResponse,
};
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, append exercises, and query per-user \
                       exercise logs with optional date windows and caps."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::exercises::create_exercise,
        crate::inbound::http::exercises::get_logs,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        UserResponse,
        CreateExerciseRequest,
        DurationField,
        ExerciseResponse,
        LogEntry,
        LogResponse,
        ErrorMessage
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise appends and log queries"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
