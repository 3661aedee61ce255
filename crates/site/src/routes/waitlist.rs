//! Waitlist modal submission.
//!
//! The modal's form posts here. The handler replays the modal transitions
//! server-side (`begin_submit`, backend call, `finish_submit`) and renders
//! the landing page again with the modal open and the outcome shown.

use axum::{extract::State, response::IntoResponse};
use creatorum_core::waitlist::{WaitlistForm, WaitlistModal};
use tracing::instrument;
use url::form_urlencoded;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::home::HomeTemplate;
use crate::state::AppState;

/// Handle the signup form.
///
/// The body is decoded by hand because checkbox goals arrive as repeated
/// `goals` fields. An incomplete form is not sent to the backend.
#[instrument(skip_all)]
pub async fn submit(State(state): State<AppState>, body: String) -> Result<impl IntoResponse> {
    let form = WaitlistForm::from_fields(form_urlencoded::parse(body.as_bytes()))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let mut modal = WaitlistModal::with_form(form);

    let Some(submission) = modal.begin_submit() else {
        tracing::debug!("Incomplete waitlist form, not submitted");
        return Ok(HomeTemplate::new(&modal));
    };

    add_breadcrumb(
        "waitlist",
        "Waitlist signup submitted",
        Some(&[("role", submission.role.as_str())]),
    );

    let outcome = state
        .backend()
        .join_waitlist(&submission)
        .await
        .map_err(|e| e.to_string());

    match &outcome {
        Ok(()) => tracing::info!(role = %submission.role, "Waitlist signup accepted"),
        Err(message) => tracing::info!(%message, "Waitlist signup rejected"),
    }

    modal.finish_submit(outcome);
    Ok(HomeTemplate::new(&modal))
}
