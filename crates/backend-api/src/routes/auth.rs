use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use registrar_users::{
    RegisterRequest, RegistrationOutcome, ResendConfirmationRequest, ResendOutcome, SanitizedUser,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::{error::ResponseFormat, ApiError, AppState};

/// Registration body. Fields other than `email` and `password` are stored
/// on the user profile.
#[derive(Debug, ToSchema)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    /// Absent while email confirmation is pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    #[schema(value_type = Object)]
    pub user: SanitizedUser,
}

impl From<RegistrationOutcome> for RegistrationResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        match outcome {
            RegistrationOutcome::PendingConfirmation { user } => Self { jwt: None, user },
            RegistrationOutcome::Authenticated { jwt, user } => Self {
                jwt: Some(jwt),
                user,
            },
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConfirmationQuery {
    /// Token from the confirmation email
    pub confirmation: Option<String>,
}

#[derive(Debug, ToSchema)]
pub struct ResendBody {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResendResponse {
    pub email: String,
    pub sent: bool,
}

impl From<ResendOutcome> for ResendResponse {
    fn from(outcome: ResendOutcome) -> Self {
        Self {
            email: outcome.email,
            sent: outcome.sent,
        }
    }
}

async fn register_with(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
    format: ResponseFormat,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let Json(body) = payload?;
    // Any JSON body reaches the gate; mistyped credentials read as missing.
    let request = RegisterRequest::from_body(body);
    let outcome = state
        .registration()
        .register(request)
        .await
        .map_err(|err| ApiError::from_registration(err, format))?;

    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/auth/local/register",
    tag = "Auth",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Account created", body = RegistrationResponse),
        (status = 400, description = "Registration rejected", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage or signing failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    register_with(&state, payload, ResponseFormat::Public).await
}

#[utoipa::path(
    post,
    path = "/admin/auth/local/register",
    tag = "Auth",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Account created", body = RegistrationResponse),
        (status = 400, description = "Registration rejected, with message ids", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage or signing failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn admin_register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    register_with(&state, payload, ResponseFormat::Admin).await
}

#[utoipa::path(
    get,
    path = "/auth/email-confirmation",
    tag = "Auth",
    params(ConfirmationQuery),
    responses(
        (status = 302, description = "Confirmed, redirecting to the configured page"),
        (status = 400, description = "Unknown or used token", body = crate::error::ErrorResponse)
    )
)]
pub async fn email_confirmation(
    State(state): State<AppState>,
    query: Result<Query<ConfirmationQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let token = query.confirmation.unwrap_or_default();

    let outcome = state
        .confirmation()
        .confirm(&token)
        .await
        .map_err(|err| ApiError::from_registration(err, ResponseFormat::Public))?;

    Ok((StatusCode::FOUND, [(LOCATION, outcome.redirect_to)]).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/send-email-confirmation",
    tag = "Auth",
    request_body = ResendBody,
    responses(
        (status = 200, description = "Confirmation email sent again", body = ResendResponse),
        (status = 400, description = "Unknown, confirmed or blocked account", body = crate::error::ErrorResponse)
    )
)]
pub async fn send_email_confirmation(
    State(state): State<AppState>,
    payload: Result<Json<ResendConfirmationRequest>, JsonRejection>,
) -> Result<Json<ResendResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .confirmation()
        .resend(request.email.as_deref())
        .await
        .map_err(|err| ApiError::from_registration(err, ResponseFormat::Public))?;

    Ok(Json(outcome.into()))
}
