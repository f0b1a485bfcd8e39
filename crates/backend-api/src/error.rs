use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registrar_users::RegistrationError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;
use utoipa::ToSchema;

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// How failures are rendered for the calling client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Admin panel: message identifiers the UI translates
    Admin,
    /// Everyone else: a readable sentence
    Public,
}

/// Error envelope: `{ statusCode, error, message }`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub error: String,
    #[schema(value_type = Object)]
    pub message: Value,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Value>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<Value>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    /// Render a service failure for the given client.
    pub fn from_registration(error: RegistrationError, format: ResponseFormat) -> Self {
        if !error.is_client_error() {
            error!(error = ?error, "registration failed");
            return Self::internal_server_error();
        }

        match (format, error.message_id()) {
            (ResponseFormat::Admin, Some(id)) => {
                Self::bad_request(json!([{ "messages": [{ "id": id.as_str() }] }]))
            }
            _ => Self::bad_request(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            status_code: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
