//! User registry API handlers.
//!
//! ```text
//! GET  /api/users        List registered users
//! POST /api/users        Register a user {"username":"ada"}
//! ```
//!
//! Registration bodies are accepted as JSON or form-encoded, matching the
//! historical clients.

use actix_web::web::Either;
use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/users`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Name to register; must be non-blank and not already taken.
    pub username: String,
}

/// User projection returned by the registry endpoints.
///
/// The exercise count is deliberately absent; it only appears in the log
/// endpoint's envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// User identifier, rendered under the historical `_id` key.
    #[serde(rename = "_id")]
    pub id: String,
    /// Name the user registered under.
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// List registered users.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All registered users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.registry.list().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Blank username", body = ErrorMessage),
        (status = 401, description = "Username taken (legacy status)", body = ErrorMessage),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Either<web::Json<CreateUserRequest>, web::Form<CreateUserRequest>>,
) -> ApiResult<web::Json<UserResponse>> {
    let body = payload.into_inner();
    let username = Username::new(body.username).map_err(|err| Error::invalid_input(err.to_string()))?;
    let user = state.registry.register(username).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
