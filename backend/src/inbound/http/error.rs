//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent `{"message": ...}`
//! bodies and status codes. Internal causes are logged against the request's
//! trace identifier and never echoed to clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Body sent by clients on the generic 5xx path.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Wire envelope for error responses.
///
/// Exactly one field; the historical clients match on `message` alone.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorMessage {
    /// Human-readable description of the failure.
    pub message: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        // Long-standing clients test for 401 on a taken username; the
        // conventional 409 is deliberately not adopted.
        ErrorCode::Conflict => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::WriteFailure | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorMessage {
    let message = match error.code() {
        ErrorCode::WriteFailure | ErrorCode::Internal => {
            error!(
                code = ?error.code(),
                cause = %error.message(),
                trace_id = error.trace_id().unwrap_or("-"),
                "request failed"
            );
            INTERNAL_MESSAGE.to_owned()
        }
        _ => error.message().to_owned(),
    };
    ErrorMessage { message }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(body_for(self))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
