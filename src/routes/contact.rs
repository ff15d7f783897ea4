use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rrbusiness_contact::{ContactSubmission, RelayResponse};

use crate::{error::AppError, routes::AppState};

/// POST /api/send-email
///
/// Validates the inquiry, then hands it to the mail provider once, bounded by
/// the dispatch timeout. Origin checks happen in middleware before this runs.
///
/// A timed-out send is not cancelled: the mail may still go out, and a retry
/// from the visitor then produces a second copy.
pub async fn send_email(
    State(app_state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<RelayResponse>, AppError> {
    let Json(submission) = payload?;

    tracing::info!(
        name = %submission.full_name,
        email = %submission.email,
        has_phone = submission.phone().is_some(),
        has_company = submission.company().is_some(),
        "Email request received"
    );

    submission.check_required()?;

    let email = &app_state.config.email;
    let mail = rrbusiness_notification::compose_inquiry(
        &submission,
        email.from_header(),
        &email.contact_address,
    )?;

    let timeout = email.dispatch_timeout();
    let message_id = tokio::time::timeout(timeout, app_state.mailer.send(mail))
        .await
        .map_err(|_| AppError::DispatchTimeout(timeout))??;

    tracing::info!(message_id = %message_id, "Email sent successfully");

    Ok(Json(RelayResponse::sent(message_id)))
}
