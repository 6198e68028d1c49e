pub mod guests;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guestlist_core::GuestListError;
use serde::Serialize;
use tracing::{error, info};

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by successful updates
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse { status: "ok" }
    }
}

/// Convert guest list errors to HTTP responses.
///
/// Store failures are reported with a fixed per-endpoint message; the cause
/// only goes to the log.
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Error mapper for an endpoint whose failures read `failure`.
    pub fn with_failure(failure: &'static str) -> impl FnOnce(GuestListError) -> ApiError {
        move |err| match err {
            GuestListError::GuestNotFound(name) => {
                info!(%name, "guest not found");
                ApiError {
                    status: StatusCode::NOT_FOUND,
                    message: "Invitado no encontrado",
                }
            }
            GuestListError::GroupNotFound(group_id) => {
                info!(%group_id, "group not found");
                ApiError {
                    status: StatusCode::NOT_FOUND,
                    message: "Grupo no encontrado",
                }
            }
            other => {
                error!(error = %other, "{}", failure);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: failure,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message.to_string(),
        });
        (self.status, body).into_response()
    }
}
