use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rrbusiness_contact::{ContactError, REQUIRED_FIELDS_RELAY_MESSAGE, RelayResponse};
use rrbusiness_notification::MailerError;
use thiserror::Error;

pub const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("Origin header required")]
    OriginMissing,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ContactError),

    #[error("Mail dispatch failed: {0}")]
    DispatchError(#[from] MailerError),

    #[error("Mail dispatch timed out after {0:?}")]
    DispatchTimeout(Duration),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            AppError::OriginNotAllowed(origin) => {
                tracing::warn!(origin = %origin, "Blocked by CORS");
                (
                    StatusCode::FORBIDDEN,
                    RelayResponse::rejected("Origin not allowed"),
                )
            }
            AppError::OriginMissing => {
                tracing::warn!("Blocked by CORS, request has no origin");
                (
                    StatusCode::FORBIDDEN,
                    RelayResponse::rejected("Origin not allowed"),
                )
            }
            AppError::InvalidBody(rejection) => {
                tracing::info!(error = %rejection, "Contact inquiry body rejected");
                (
                    StatusCode::BAD_REQUEST,
                    RelayResponse::rejected("Invalid request body"),
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(error = %e, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    RelayResponse::rejected(REQUIRED_FIELDS_RELAY_MESSAGE),
                )
            }
            AppError::DispatchError(e) => {
                tracing::error!(error = %e, "Email sending failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RelayResponse::failed(SEND_FAILED_MESSAGE, "mail_dispatch_failed"),
                )
            }
            AppError::DispatchTimeout(after) => {
                tracing::error!(timeout = ?after, "Email sending timed out");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RelayResponse::failed(SEND_FAILED_MESSAGE, "mail_dispatch_timeout"),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
